//! Source buffers and locations for the Vela frontend.
//!
//! Every buffer loaded into a [`SourceManager`] occupies its own slice of a
//! single global offset space, so a [`SourceLoc`] is just a `u32` and can be
//! mapped back to its buffer, line and column without carrying a buffer id.
//!
//! ```text
//!  0        1 ........ len(a)+1   len(a)+2 ........
//!  invalid  [ buffer a        ]   [ buffer b        ]
//! ```
//!
//! Offset 0 is never handed out, which is what makes [`SourceLoc::INVALID`]
//! distinguishable from the start of the first buffer.
//!
//! Printing (see [`LocPrinter`]) only needs `core::fmt::Write`, so locations
//! can be rendered into the fixed-size buffers used on the crash path.

mod line_table;
mod manager;
mod print;

pub use line_table::LineOffsetTable;
pub use manager::{BufferId, DecomposedLoc, SourceLoc, SourceManager, SourceRange};
pub use print::{LocDisplay, LocPrinter, RangeDisplay};
