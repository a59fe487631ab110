//! Rendering the stack dump.
//!
//! Output, line by line:
//!
//! ```text
//! Stack dump:
//! Program arguments: <arg0> <arg1> ...
//! <tool> version <version>
//! Contents of <path>:        one block per echoed file
//! ---
//! <raw contents>
//! ---
//! While running user code "<path>"   one line per active crash frame
//! ```

use std::ffi::OsStr;
use std::fmt::{self, Write};
use std::marker::PhantomData;

use crate::frames;
use crate::sink::{FixedBuffer, ReportSink};
use crate::{EchoedFile, InvocationContext};

/// Size of the stack buffer echoed files are read through.
const READ_CHUNK: usize = 512;

/// A crash report for the current thread, ready to be written.
///
/// Borrows the context; file contents and crash frames are read while
/// writing, so nothing is copied up front. Not `Send`: the frames printed are
/// those of the thread that writes the report.
pub struct CrashReport<'a> {
    context: &'a InvocationContext,
    _thread_bound: PhantomData<*const ()>,
}

impl<'a> CrashReport<'a> {
    pub fn new(context: &'a InvocationContext) -> Self {
        CrashReport {
            context,
            _thread_bound: PhantomData,
        }
    }

    /// Write the full report to `sink` and flush it.
    pub fn write_to<S: ReportSink + ?Sized>(&self, sink: &mut S) {
        let mut out = FixedBuffer::new(sink);
        if self.render(&mut out).is_err() {
            out.write_bytes(b"\n<crash frame could not be printed>\n");
        }
        out.flush();
    }

    fn render<S: ReportSink + ?Sized>(&self, out: &mut FixedBuffer<'_, S>) -> fmt::Result {
        out.write_str("Stack dump:\n")?;

        out.write_str("Program arguments:")?;
        for arg in self.context.args() {
            out.write_char(' ')?;
            write_os_str(out, arg);
        }
        out.write_char('\n')?;

        let tool = self.context.tool();
        writeln!(out, "{} version {}", tool.name, tool.version)?;

        for file in self.context.echoed_files() {
            out.write_str("Contents of ")?;
            write_os_str(out, file.path().as_os_str());
            out.write_str(":\n---\n")?;
            echo_contents(out, file);
            out.write_str("---\n")?;
        }

        frames::for_each_active(|frame| {
            frame.describe(out)?;
            out.write_char('\n')
        })
    }
}

#[cfg(unix)]
fn write_os_str<S: ReportSink + ?Sized>(out: &mut FixedBuffer<'_, S>, s: &OsStr) {
    use std::os::unix::ffi::OsStrExt;

    out.write_bytes(s.as_bytes());
}

#[cfg(not(unix))]
fn write_os_str<S: ReportSink + ?Sized>(out: &mut FixedBuffer<'_, S>, s: &OsStr) {
    out.write_bytes(s.to_string_lossy().as_bytes());
}

/// Copy a file's bytes into the report, ending with exactly one newline.
///
/// Failures become a `<unable to read file: os error N>` line.
#[cfg(unix)]
fn echo_contents<S: ReportSink + ?Sized>(out: &mut FixedBuffer<'_, S>, file: &EchoedFile) {
    // SAFETY: `c_path` is a valid NUL-terminated string.
    let fd = unsafe { libc::open(file.c_path().as_ptr(), libc::O_RDONLY | libc::O_CLOEXEC) };
    if fd < 0 {
        write_read_failure(out, last_errno());
        return;
    }

    let mut chunk = [0u8; READ_CHUNK];
    let mut last = None;
    let mut failure = None;
    loop {
        // SAFETY: `chunk` is writable for its full length.
        let n = unsafe { libc::read(fd, chunk.as_mut_ptr().cast(), chunk.len()) };
        if n < 0 {
            let errno = last_errno();
            if errno == libc::EINTR {
                continue;
            }
            failure = Some(errno);
            break;
        }
        if n == 0 {
            break;
        }
        let read = &chunk[..n.unsigned_abs()];
        out.write_bytes(read);
        last = read.last().copied();
    }
    // SAFETY: `fd` was opened above and is closed exactly once.
    unsafe { libc::close(fd) };

    if last.is_some_and(|b| b != b'\n') {
        out.write_bytes(b"\n");
    }
    if let Some(errno) = failure {
        write_read_failure(out, errno);
    }
}

#[cfg(not(unix))]
fn echo_contents<S: ReportSink + ?Sized>(out: &mut FixedBuffer<'_, S>, file: &EchoedFile) {
    match std::fs::read(file.path()) {
        Ok(bytes) => {
            out.write_bytes(&bytes);
            if bytes.last().is_some_and(|b| *b != b'\n') {
                out.write_bytes(b"\n");
            }
        }
        Err(e) => write_read_failure(out, e.raw_os_error().unwrap_or(0)),
    }
}

fn write_read_failure<S: ReportSink + ?Sized>(out: &mut FixedBuffer<'_, S>, errno: i32) {
    let _ = writeln!(out, "<unable to read file: os error {errno}>");
}

#[cfg(unix)]
fn last_errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}
