//! Setup errors and the fatal fault taxonomy.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised while building the context or installing handlers.
///
/// None of these can occur on the fault path itself.
#[derive(Debug, thiserror::Error)]
pub enum CrashError {
    #[error("a crash reporter is already installed in this process")]
    AlreadyInstalled,

    #[error("path `{}` contains an interior NUL byte", .0.display())]
    InvalidPath(PathBuf),

    #[error("failed to install the {signal} handler")]
    Sigaction {
        signal: Signal,
        #[source]
        source: io::Error,
    },

    #[error("failed to set up the alternate signal stack")]
    AltStack(#[source] io::Error),
}

/// The fatal signals the reporter hooks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Invalid memory access.
    Segv,
    /// Bus error (misaligned or unmapped access).
    Bus,
    /// Arithmetic fault.
    Fpe,
    /// Illegal instruction; what a trapping instruction raises.
    Ill,
    /// Breakpoint trap.
    Trap,
    /// `abort()`.
    Abrt,
}

impl Signal {
    pub const ALL: [Signal; 6] = [
        Signal::Segv,
        Signal::Bus,
        Signal::Fpe,
        Signal::Ill,
        Signal::Trap,
        Signal::Abrt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Signal::Segv => "SIGSEGV",
            Signal::Bus => "SIGBUS",
            Signal::Fpe => "SIGFPE",
            Signal::Ill => "SIGILL",
            Signal::Trap => "SIGTRAP",
            Signal::Abrt => "SIGABRT",
        }
    }

    #[cfg(unix)]
    pub fn as_raw(self) -> libc::c_int {
        match self {
            Signal::Segv => libc::SIGSEGV,
            Signal::Bus => libc::SIGBUS,
            Signal::Fpe => libc::SIGFPE,
            Signal::Ill => libc::SIGILL,
            Signal::Trap => libc::SIGTRAP,
            Signal::Abrt => libc::SIGABRT,
        }
    }

    #[cfg(unix)]
    pub fn from_raw(raw: libc::c_int) -> Option<Signal> {
        Signal::ALL.into_iter().find(|s| s.as_raw() == raw)
    }

    /// Deliver this signal to the calling thread.
    ///
    /// With a reporter installed this produces a stack dump; without one the
    /// default action kills the process. Never returns either way.
    pub fn raise(self) -> ! {
        #[cfg(unix)]
        // SAFETY: raise has no preconditions.
        unsafe {
            libc::raise(self.as_raw());
        }
        std::process::abort()
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The one kind of failure the reporter handles: something unrecoverable.
///
/// OS-delivered signals and internal faults are handled identically apart
/// from the line printed before `Stack dump:`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FatalFault<'a> {
    /// A fatal signal was delivered.
    Signal(Signal),
    /// [`fatal_error`](crate::fatal_error) was called.
    Internal(&'a str),
    /// A Rust panic; the panic message has already been printed.
    Panic,
}

impl FatalFault<'_> {
    /// The signal used to terminate the process after the report.
    pub fn terminating_signal(&self) -> Signal {
        match self {
            FatalFault::Signal(signal) => *signal,
            FatalFault::Internal(_) | FatalFault::Panic => Signal::Abrt,
        }
    }
}

impl fmt::Display for FatalFault<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalFault::Signal(signal) => write!(f, "fatal signal {signal}"),
            FatalFault::Internal(message) => write!(f, "fatal error: {message}"),
            FatalFault::Panic => f.write_str("panic"),
        }
    }
}
