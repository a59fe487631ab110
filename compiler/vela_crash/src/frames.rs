//! Crash frames: what each thread is doing, for the end of a stack dump.
//!
//! Frames form an intrusive singly-linked list per thread. Each node lives
//! on the stack of the [`with_crash_frame`] call that pushed it, and the
//! list head is a const-initialized thread-local, so walking the list from a
//! signal handler touches neither the heap nor any lock.

use std::cell::Cell;
use std::fmt;
use std::mem;
use std::path::Path;
use std::ptr;

use vela_source::{LocPrinter, SourceLoc, SourceManager, SourceRange};

/// One line of context in a crash report.
pub trait CrashFrame {
    /// Write the line, without a trailing newline.
    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result;
}

struct Node {
    frame: *const (dyn CrashFrame + 'static),
    prev: *const Node,
}

thread_local! {
    static TOP: Cell<*const Node> = const { Cell::new(ptr::null()) };
}

/// Restores the previous list head, also when `f` unwinds.
struct PopOnDrop(*const Node);

impl Drop for PopOnDrop {
    fn drop(&mut self) {
        TOP.with(|top| top.set(self.0));
    }
}

/// Run `f` with `frame` on this thread's crash-frame list.
///
/// ```
/// use vela_crash::{with_crash_frame, RunningUserCode};
/// use std::path::Path;
///
/// let path = Path::new("main.vela");
/// let answer = with_crash_frame(&RunningUserCode::new(path), || 42);
/// assert_eq!(answer, 42);
/// ```
pub fn with_crash_frame<R>(frame: &dyn CrashFrame, f: impl FnOnce() -> R) -> R {
    let frame: *const (dyn CrashFrame + '_) = frame;
    // SAFETY: only the lifetime bound changes. The node is unlinked by
    // `_pop` before this function returns, so the pointer is never read
    // after the borrow of `frame` ends.
    let frame: *const (dyn CrashFrame + 'static) = unsafe { mem::transmute(frame) };

    let node = Node {
        frame,
        prev: TOP.with(Cell::get),
    };
    TOP.with(|top| top.set(&node));
    let _pop = PopOnDrop(node.prev);
    f()
}

/// Visit this thread's frames, most recently pushed first.
pub(crate) fn for_each_active(
    mut visit: impl FnMut(&dyn CrashFrame) -> fmt::Result,
) -> fmt::Result {
    let mut node = TOP.try_with(Cell::get).unwrap_or(ptr::null());
    while !node.is_null() {
        // SAFETY: every node on the list belongs to a `with_crash_frame` call
        // that is still running on this thread.
        let current = unsafe { &*node };
        // SAFETY: as above, the frame outlives its node.
        visit(unsafe { &*current.frame })?;
        node = current.prev;
    }
    Ok(())
}

/// Number of frames pushed on the current thread.
pub fn active_frame_count() -> usize {
    let mut count = 0;
    let _ = for_each_active(|_| {
        count += 1;
        Ok(())
    });
    count
}

/// `While running user code "<path>"`
pub struct RunningUserCode<'a> {
    path: &'a Path,
}

impl<'a> RunningUserCode<'a> {
    pub fn new(path: &'a Path) -> Self {
        RunningUserCode { path }
    }
}

impl CrashFrame for RunningUserCode<'_> {
    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "While running user code \"{}\"", self.path.display())
    }
}

/// `While <action> at <file>:<line>:<col>`
pub struct AtLocation<'a> {
    action: &'a str,
    loc: SourceLoc,
    sources: &'a SourceManager,
}

impl<'a> AtLocation<'a> {
    pub fn new(action: &'a str, loc: SourceLoc, sources: &'a SourceManager) -> Self {
        AtLocation {
            action,
            loc,
            sources,
        }
    }
}

impl CrashFrame for AtLocation<'_> {
    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "While {} at ", self.action)?;
        LocPrinter::new(self.sources).print_loc(out, self.loc)
    }
}

/// `While <action> at [<start> - <end>]`
pub struct AtRange<'a> {
    action: &'a str,
    range: SourceRange,
    sources: &'a SourceManager,
}

impl<'a> AtRange<'a> {
    pub fn new(action: &'a str, range: SourceRange, sources: &'a SourceManager) -> Self {
        AtRange {
            action,
            range,
            sources,
        }
    }
}

impl CrashFrame for AtRange<'_> {
    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "While {} at ", self.action)?;
        LocPrinter::new(self.sources).print_range(out, self.range, false)
    }
}
