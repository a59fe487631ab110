//! Report output: where bytes go, and the fixed buffer in front of it.

use std::fmt;

/// Size of the stack buffer reports are assembled in.
pub const REPORT_BUFFER_SIZE: usize = 1024;

/// Destination for report bytes.
///
/// Writes are best effort: a sink that cannot write drops the bytes rather
/// than failing, since there is nobody left to handle the error.
pub trait ReportSink {
    fn write_all(&mut self, bytes: &[u8]);
}

impl ReportSink for Vec<u8> {
    fn write_all(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Unbuffered writes to file descriptor 2.
///
/// Bypasses `std::io::stderr()`, whose lock may be held by the thread that
/// just crashed.
#[derive(Copy, Clone, Debug, Default)]
pub struct StderrSink;

impl ReportSink for StderrSink {
    #[cfg(unix)]
    fn write_all(&mut self, mut bytes: &[u8]) {
        while !bytes.is_empty() {
            // SAFETY: the pointer and length describe a live slice.
            let written =
                unsafe { libc::write(libc::STDERR_FILENO, bytes.as_ptr().cast(), bytes.len()) };
            if written < 0 {
                if std::io::Error::last_os_error().kind() == std::io::ErrorKind::Interrupted {
                    continue;
                }
                return;
            }
            if written == 0 {
                return;
            }
            bytes = &bytes[written.unsigned_abs()..];
        }
    }

    #[cfg(not(unix))]
    fn write_all(&mut self, bytes: &[u8]) {
        use std::io::Write;

        let _ = std::io::stderr().write_all(bytes);
    }
}

/// A fixed-capacity buffer that flushes to its sink whenever it fills up.
///
/// Nothing is ever truncated: oversized writes are flushed through in
/// pieces. Whatever is left is flushed on drop.
pub struct FixedBuffer<'s, S: ReportSink + ?Sized> {
    sink: &'s mut S,
    buf: [u8; REPORT_BUFFER_SIZE],
    len: usize,
}

impl<'s, S: ReportSink + ?Sized> FixedBuffer<'s, S> {
    pub fn new(sink: &'s mut S) -> Self {
        FixedBuffer {
            sink,
            buf: [0; REPORT_BUFFER_SIZE],
            len: 0,
        }
    }

    pub fn write_bytes(&mut self, mut bytes: &[u8]) {
        while !bytes.is_empty() {
            if self.len == REPORT_BUFFER_SIZE {
                self.flush();
            }
            let take = bytes.len().min(REPORT_BUFFER_SIZE - self.len);
            self.buf[self.len..self.len + take].copy_from_slice(&bytes[..take]);
            self.len += take;
            bytes = &bytes[take..];
        }
    }

    pub fn flush(&mut self) {
        if self.len > 0 {
            self.sink.write_all(&self.buf[..self.len]);
            self.len = 0;
        }
    }
}

impl<S: ReportSink + ?Sized> fmt::Write for FixedBuffer<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

impl<S: ReportSink + ?Sized> Drop for FixedBuffer<'_, S> {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests;
