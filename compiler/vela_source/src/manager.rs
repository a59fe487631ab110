//! The source manager: buffer storage and location arithmetic.

use rustc_hash::FxHashMap;

use crate::LineOffsetTable;

/// Index of a buffer inside a [`SourceManager`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(u32);

impl BufferId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A position in some buffer of a [`SourceManager`].
///
/// The value is an offset into the manager's global offset space; 0 is the
/// invalid location.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceLoc(u32);

impl SourceLoc {
    pub const INVALID: SourceLoc = SourceLoc(0);

    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub fn is_invalid(self) -> bool {
        self.0 == 0
    }

    /// The location `bytes` further along. Advancing an invalid location
    /// keeps it invalid.
    #[must_use]
    pub fn advanced(self, bytes: u32) -> SourceLoc {
        if self.is_invalid() {
            return self;
        }
        SourceLoc(self.0.saturating_add(bytes))
    }

    /// Build a location from a raw global offset.
    ///
    /// Mostly useful for tests and for locations that arrive from outside
    /// the manager; offsets that fall between buffers print as malformed.
    pub const fn from_raw(raw: u32) -> SourceLoc {
        SourceLoc(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// An inclusive range of locations: `end` points at the last byte covered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub start: SourceLoc,
    pub end: SourceLoc,
}

impl SourceRange {
    pub fn new(start: SourceLoc, end: SourceLoc) -> Self {
        SourceRange { start, end }
    }

    pub fn is_valid(self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }
}

/// A location split into its buffer, 1-based line and 0-based byte column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecomposedLoc {
    pub buffer: BufferId,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug)]
struct Buffer {
    identifier: String,
    text: String,
    /// Global offset of the first byte.
    start: u32,
    lines: LineOffsetTable,
}

impl Buffer {
    fn len(&self) -> u32 {
        u32::try_from(self.text.len()).unwrap_or(u32::MAX)
    }

    /// Contains `[start, start + len]`: the end-of-buffer position is a
    /// valid location.
    fn contains(&self, raw: u32) -> bool {
        raw >= self.start && raw - self.start <= self.len()
    }
}

/// Owns every source buffer the frontend has loaded.
#[derive(Debug, Default)]
pub struct SourceManager {
    buffers: Vec<Buffer>,
    by_identifier: FxHashMap<String, BufferId>,
    code_completion: Option<(BufferId, u32)>,
}

impl SourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a buffer, or return the existing one registered under
    /// `identifier`.
    pub fn add_buffer(&mut self, identifier: impl Into<String>, text: impl Into<String>) -> BufferId {
        let identifier = identifier.into();
        if let Some(&id) = self.by_identifier.get(&identifier) {
            return id;
        }

        // One spare offset between buffers so a buffer's end position never
        // aliases the next buffer's start.
        let start = self
            .buffers
            .last()
            .map_or(1, |last| last.start.saturating_add(last.len()).saturating_add(1));
        let text = text.into();
        let id = BufferId(u32::try_from(self.buffers.len()).unwrap_or(u32::MAX));
        self.buffers.push(Buffer {
            lines: LineOffsetTable::build(&text),
            identifier: identifier.clone(),
            text,
            start,
        });
        self.by_identifier.insert(identifier, id);
        id
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn buffer_ids(&self) -> impl Iterator<Item = BufferId> + '_ {
        (0..self.buffers.len()).map(|i| BufferId(u32::try_from(i).unwrap_or(u32::MAX)))
    }

    pub fn identifier(&self, id: BufferId) -> &str {
        &self.buffers[id.index()].identifier
    }

    pub fn text(&self, id: BufferId) -> &str {
        &self.buffers[id.index()].text
    }

    pub fn loc_for_buffer_start(&self, id: BufferId) -> SourceLoc {
        SourceLoc(self.buffers[id.index()].start)
    }

    /// The buffer a location points into, or `None` for invalid locations
    /// and offsets that fall outside every buffer.
    pub fn find_buffer_containing(&self, loc: SourceLoc) -> Option<BufferId> {
        if loc.is_invalid() {
            return None;
        }
        let idx = self
            .buffers
            .partition_point(|b| b.start <= loc.0)
            .checked_sub(1)?;
        if self.buffers[idx].contains(loc.0) {
            Some(BufferId(u32::try_from(idx).unwrap_or(u32::MAX)))
        } else {
            None
        }
    }

    /// Byte offset of `loc` within buffer `id`, or `None` if `loc` is not
    /// inside that buffer.
    pub fn loc_offset_in_buffer(&self, loc: SourceLoc, id: BufferId) -> Option<u32> {
        let buffer = self.buffers.get(id.index())?;
        if loc.is_valid() && buffer.contains(loc.0) {
            Some(loc.0 - buffer.start)
        } else {
            None
        }
    }

    /// Split `loc` into buffer, line and column.
    ///
    /// The column is the number of bytes back to the previous `\n` or `\r`,
    /// so the first byte of a line is column 0.
    pub fn decompose(&self, loc: SourceLoc) -> Option<DecomposedLoc> {
        let buffer = self.find_buffer_containing(loc)?;
        let offset = self.loc_offset_in_buffer(loc, buffer)?;
        let data = &self.buffers[buffer.index()];

        let before = &data.text.as_bytes()[..offset as usize];
        let line_start = memchr::memrchr2(b'\n', b'\r', before).map_or(0, |i| i + 1);

        Some(DecomposedLoc {
            buffer,
            line: data.lines.line_from_offset(offset),
            column: u32::try_from(before.len() - line_start).unwrap_or(u32::MAX),
        })
    }

    /// 1-based line and column of `loc`, both counted in bytes.
    pub fn line_and_column(&self, loc: SourceLoc) -> Option<(u32, u32)> {
        let buffer = self.find_buffer_containing(loc)?;
        let offset = self.loc_offset_in_buffer(loc, buffer)?;
        Some(self.buffers[buffer.index()].lines.line_and_column(offset))
    }

    /// Bytes covered by an inclusive range, when both ends sit in the same
    /// buffer. The end is clamped to the buffer length.
    pub fn range_bytes(&self, range: SourceRange) -> Option<&[u8]> {
        let buffer = self.find_buffer_containing(range.start)?;
        let start = self.loc_offset_in_buffer(range.start, buffer)? as usize;
        let end = self.loc_offset_in_buffer(range.end, buffer)? as usize;
        let bytes = self.buffers[buffer.index()].text.as_bytes();
        let end = (end + 1).min(bytes.len());
        bytes.get(start..end)
    }

    /// Record where code completion was requested.
    pub fn set_code_completion_point(&mut self, id: BufferId, offset: u32) {
        self.code_completion = Some((id, offset));
    }

    /// The code-completion location, or [`SourceLoc::INVALID`] when none was
    /// set.
    pub fn code_completion_loc(&self) -> SourceLoc {
        match self.code_completion {
            Some((id, offset)) => self.loc_for_buffer_start(id).advanced(offset),
            None => SourceLoc::INVALID,
        }
    }
}

#[cfg(test)]
mod tests;
