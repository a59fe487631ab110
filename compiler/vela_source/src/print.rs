//! Human-readable location printing.
//!
//! ```text
//! main.vela:3:7            first location printed from a buffer
//! line:4:1                 later locations from the same buffer
//! [main.vela:3:7 - line:3:9] RangeText="x!"
//! <invalid loc>            SourceLoc::INVALID
//! <malformed loc>          offset outside every buffer
//! ```
//!
//! Everything here writes through `core::fmt::Write` and never allocates.

use std::fmt;

use crate::{BufferId, SourceLoc, SourceManager, SourceRange};

/// Prints locations, abbreviating the buffer name after its first mention.
pub struct LocPrinter<'sm> {
    sources: &'sm SourceManager,
    last_buffer: Option<BufferId>,
}

impl<'sm> LocPrinter<'sm> {
    pub fn new(sources: &'sm SourceManager) -> Self {
        LocPrinter {
            sources,
            last_buffer: None,
        }
    }

    pub fn print_loc<W: fmt::Write + ?Sized>(&mut self, out: &mut W, loc: SourceLoc) -> fmt::Result {
        if loc.is_invalid() {
            return out.write_str("<invalid loc>");
        }
        let Some(buffer) = self.sources.find_buffer_containing(loc) else {
            return out.write_str("<malformed loc>");
        };

        if self.last_buffer == Some(buffer) {
            out.write_str("line")?;
        } else {
            out.write_str(self.sources.identifier(buffer))?;
            self.last_buffer = Some(buffer);
        }

        let (line, column) = self.sources.line_and_column(loc).unwrap_or((0, 0));
        write!(out, ":{line}:{column}")
    }

    /// Print `[start - end]`, followed by the covered text when `print_text`
    /// is set and both ends are valid.
    pub fn print_range<W: fmt::Write + ?Sized>(
        &mut self,
        out: &mut W,
        range: SourceRange,
        print_text: bool,
    ) -> fmt::Result {
        out.write_char('[')?;
        self.print_loc(out, range.start)?;
        out.write_str(" - ")?;
        self.print_loc(out, range.end)?;
        out.write_char(']')?;

        if !print_text || !range.is_valid() {
            return Ok(());
        }
        let Some(bytes) = self.sources.range_bytes(range) else {
            return Ok(());
        };

        out.write_str(" RangeText=\"")?;
        for chunk in bytes.utf8_chunks() {
            out.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                out.write_char(char::REPLACEMENT_CHARACTER)?;
            }
        }
        out.write_char('"')
    }
}

/// `Display` adapter for a single location, always printed with its buffer
/// name.
pub struct LocDisplay<'sm> {
    loc: SourceLoc,
    sources: &'sm SourceManager,
}

impl SourceLoc {
    pub fn display(self, sources: &SourceManager) -> LocDisplay<'_> {
        LocDisplay { loc: self, sources }
    }
}

impl fmt::Display for LocDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        LocPrinter::new(self.sources).print_loc(f, self.loc)
    }
}

/// `Display` adapter for a range, without the range text.
pub struct RangeDisplay<'sm> {
    range: SourceRange,
    sources: &'sm SourceManager,
}

impl SourceRange {
    pub fn display(self, sources: &SourceManager) -> RangeDisplay<'_> {
        RangeDisplay {
            range: self,
            sources,
        }
    }
}

impl fmt::Display for RangeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        LocPrinter::new(self.sources).print_range(f, self.range, false)
    }
}
