//! Fatal signal hooks and process termination.
//!
//! # Async-signal-safety
//!
//! The handler only calls into [`CrashReporter::fail`], which restricts
//! itself to atomics, const thread-locals, `open`/`read`/`write`/`close`,
//! `sigaction`, `pthread_sigmask`, `raise` and `_exit`.

use crate::{CrashError, Signal};

/// Alternate stacks smaller than this are rounded up.
#[cfg(unix)]
const MIN_ALT_STACK_SIZE: usize = 16 * 1024;

#[cfg(unix)]
mod platform {
    use std::ffi::c_void;
    use std::{io, mem, ptr};

    use super::{CrashError, Signal, MIN_ALT_STACK_SIZE};
    use crate::{CrashReporter, FatalFault};

    extern "C" fn handle_fatal_signal(
        raw: libc::c_int,
        _info: *mut libc::siginfo_t,
        _ucontext: *mut c_void,
    ) {
        let Some(signal) = Signal::from_raw(raw) else {
            // SAFETY: _exit is async-signal-safe.
            unsafe { libc::_exit(128 + raw) };
        };
        match CrashReporter::installed() {
            Some(reporter) => reporter.fail(FatalFault::Signal(signal)),
            None => terminate(signal),
        }
    }

    pub(super) fn install(alt_stack_size: usize) -> Result<(), CrashError> {
        if alt_stack_size > 0 {
            install_alt_stack(alt_stack_size.max(MIN_ALT_STACK_SIZE))?;
        }

        for signal in Signal::ALL {
            // SAFETY: `action` is fully initialized before use and the
            // handler has the SA_SIGINFO signature.
            let ret = unsafe {
                let mut action: libc::sigaction = mem::zeroed();
                action.sa_sigaction = handle_fatal_signal
                    as extern "C" fn(libc::c_int, *mut libc::siginfo_t, *mut c_void)
                    as libc::sighandler_t;
                action.sa_flags = libc::SA_SIGINFO | libc::SA_ONSTACK;
                // Block everything while the report is written.
                libc::sigfillset(&mut action.sa_mask);
                libc::sigaction(signal.as_raw(), &action, ptr::null_mut())
            };
            if ret != 0 {
                return Err(CrashError::Sigaction {
                    signal,
                    source: io::Error::last_os_error(),
                });
            }
        }
        Ok(())
    }

    /// Give the installing thread a stack to report a stack overflow on.
    /// The memory is leaked: it must stay valid for the life of the process.
    fn install_alt_stack(size: usize) -> Result<(), CrashError> {
        let stack: &'static mut [u8] = Box::leak(vec![0u8; size].into_boxed_slice());
        let ss = libc::stack_t {
            ss_sp: stack.as_mut_ptr().cast(),
            ss_flags: 0,
            ss_size: size,
        };
        // SAFETY: `ss` describes a live, leaked allocation of `size` bytes.
        if unsafe { libc::sigaltstack(&ss, ptr::null_mut()) } != 0 {
            return Err(CrashError::AltStack(io::Error::last_os_error()));
        }
        Ok(())
    }

    pub(super) fn terminate(signal: Signal) -> ! {
        let raw = signal.as_raw();
        // SAFETY: every call here is async-signal-safe and operates on
        // locally initialized structures.
        unsafe {
            let mut default: libc::sigaction = mem::zeroed();
            default.sa_sigaction = libc::SIG_DFL;
            libc::sigemptyset(&mut default.sa_mask);
            libc::sigaction(raw, &default, ptr::null_mut());

            let mut unblock: libc::sigset_t = mem::zeroed();
            libc::sigemptyset(&mut unblock);
            libc::sigaddset(&mut unblock, raw);
            libc::pthread_sigmask(libc::SIG_UNBLOCK, &unblock, ptr::null_mut());

            libc::raise(raw);
            libc::_exit(128 + raw)
        }
    }

    pub(super) fn park_forever() -> ! {
        loop {
            // SAFETY: pause has no preconditions.
            unsafe { libc::pause() };
        }
    }
}

#[cfg(not(unix))]
mod platform {
    use super::{CrashError, Signal};

    pub(super) fn install(_alt_stack_size: usize) -> Result<(), CrashError> {
        tracing::debug!("fatal signal hooks are not available on this platform");
        Ok(())
    }

    pub(super) fn terminate(_signal: Signal) -> ! {
        std::process::abort()
    }

    pub(super) fn park_forever() -> ! {
        loop {
            std::thread::park();
        }
    }
}

/// Hook every signal in [`Signal::ALL`].
pub(crate) fn install(alt_stack_size: usize) -> Result<(), CrashError> {
    platform::install(alt_stack_size)
}

/// Kill the process with `signal`'s default action.
pub(crate) fn terminate(signal: Signal) -> ! {
    platform::terminate(signal)
}

/// Wait for the thread that owns the report to kill the process.
pub(crate) fn park_forever() -> ! {
    platform::park_forever()
}
