//! Pre-computed line starts for a single buffer.
//!
//! Built once when a buffer is added to the [`SourceManager`](crate::SourceManager);
//! lookups are a binary search and never allocate, which keeps them usable
//! while a crash report is being written.

/// Byte offsets of every line start in a buffer.
///
/// # Example
///
/// ```
/// use vela_source::LineOffsetTable;
///
/// let table = LineOffsetTable::build("let x\nx!\n");
/// assert_eq!(table.line_from_offset(0), 1);
/// assert_eq!(table.line_from_offset(6), 2);
/// assert_eq!(table.line_count(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineOffsetTable {
    /// `offsets[0] == 0`; `offsets[n]` is the byte after the n-th `\n`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Scan `source` for newlines.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        offsets.extend(
            memchr::memchr_iter(b'\n', source.as_bytes())
                .map(|i| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// Byte offset where `line` (1-based) starts.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// 1-based `(line, column)`; the column counts bytes from the line start.
    pub fn line_and_column(&self, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let start = self.line_start_offset(line).unwrap_or(0);
        (line, offset - start + 1)
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

#[cfg(test)]
mod tests;
