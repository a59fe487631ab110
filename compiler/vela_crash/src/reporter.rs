//! The process-wide crash reporter.

use std::fmt::Write;
use std::sync::OnceLock;

use crate::gate::{Claim, ReportGate};
use crate::signals;
use crate::sink::{FixedBuffer, ReportSink, StderrSink};
use crate::{CrashError, CrashReport, FatalFault, InvocationContext};

/// Which fatal conditions to hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Hook fatal signals (`SIGSEGV`, `SIGILL`, ...).
    pub signals: bool,
    /// Treat panics as internal faults.
    pub panics: bool,
    /// Alternate signal stack for the installing thread; 0 disables it.
    pub alt_stack_size: usize,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        ReporterConfig {
            signals: true,
            panics: true,
            alt_stack_size: 64 * 1024,
        }
    }
}

impl ReporterConfig {
    #[must_use]
    pub fn with_signals(mut self, enabled: bool) -> Self {
        self.signals = enabled;
        self
    }

    #[must_use]
    pub fn with_panics(mut self, enabled: bool) -> Self {
        self.panics = enabled;
        self
    }

    #[must_use]
    pub fn with_alt_stack_size(mut self, bytes: usize) -> Self {
        self.alt_stack_size = bytes;
        self
    }
}

/// Result of [`CrashReporter::emit`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EmitOutcome {
    /// The report was written.
    Written,
    /// Another thread already claimed the report; nothing was written.
    AlreadyReported,
    /// This thread is in the middle of writing a report; nothing was written.
    Reentrant,
}

static INSTALLED: OnceLock<CrashReporter> = OnceLock::new();

/// Owns the invocation context and writes at most one report.
#[derive(Debug)]
pub struct CrashReporter {
    context: InvocationContext,
    config: ReporterConfig,
    gate: ReportGate,
}

impl CrashReporter {
    pub fn new(context: InvocationContext, config: ReporterConfig) -> Self {
        CrashReporter {
            context,
            config,
            gate: ReportGate::new(),
        }
    }

    /// Make this the process-wide reporter and hook the configured fatal
    /// conditions. Can succeed once per process.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn install(self) -> Result<&'static CrashReporter, CrashError> {
        let mut fresh = false;
        let reporter = INSTALLED.get_or_init(|| {
            fresh = true;
            self
        });
        if !fresh {
            return Err(CrashError::AlreadyInstalled);
        }

        if reporter.config.signals {
            signals::install(reporter.config.alt_stack_size)?;
        }
        if reporter.config.panics {
            install_panic_hook();
        }

        tracing::debug!(
            signals = reporter.config.signals,
            panics = reporter.config.panics,
            echoed = reporter.context.echoed_files().len(),
            "crash reporter installed"
        );
        Ok(reporter)
    }

    /// The installed reporter, if any.
    pub fn installed() -> Option<&'static CrashReporter> {
        INSTALLED.get()
    }

    pub fn context(&self) -> &InvocationContext {
        &self.context
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// An unwritten report for the current thread.
    pub fn report(&self) -> CrashReport<'_> {
        CrashReport::new(&self.context)
    }

    /// Write the report for `fault` to `sink`, unless a report has already
    /// been claimed. Does not terminate the process.
    pub fn emit<S: ReportSink + ?Sized>(&self, fault: &FatalFault<'_>, sink: &mut S) -> EmitOutcome {
        match self.gate.try_claim() {
            Claim::Claimed(_guard) => {
                self.write_report(fault, sink);
                EmitOutcome::Written
            }
            Claim::Reentrant => EmitOutcome::Reentrant,
            Claim::HeldElsewhere => EmitOutcome::AlreadyReported,
        }
    }

    /// Report `fault` on stderr and terminate.
    ///
    /// If another thread is already reporting, this thread waits for it to
    /// end the process. A fault raised while writing the report terminates
    /// right away.
    pub fn fail(&self, fault: FatalFault<'_>) -> ! {
        match self.gate.try_claim() {
            Claim::Claimed(guard) => {
                self.write_report(&fault, &mut StderrSink);
                // Stay marked as writing: a fault during termination must
                // not wait on itself.
                std::mem::forget(guard);
                signals::terminate(fault.terminating_signal())
            }
            Claim::Reentrant => signals::terminate(fault.terminating_signal()),
            Claim::HeldElsewhere => signals::park_forever(),
        }
    }

    fn write_report<S: ReportSink + ?Sized>(&self, fault: &FatalFault<'_>, sink: &mut S) {
        if let FatalFault::Internal(message) = fault {
            write_fatal_error_line(Some(&self.context.tool().name), message, sink);
        }
        self.report().write_to(sink);
    }
}

fn write_fatal_error_line<S: ReportSink + ?Sized>(tool: Option<&str>, message: &str, sink: &mut S) {
    let mut out = FixedBuffer::new(sink);
    let _ = match tool {
        Some(tool) => writeln!(out, "{tool}: fatal error: {message}"),
        None => writeln!(out, "fatal error: {message}"),
    };
}

/// Abort the process because of an internal, unrecoverable fault.
///
/// With a reporter installed this writes the full stack dump first;
/// without one only the message is printed.
#[cold]
pub fn fatal_error(message: &str) -> ! {
    match CrashReporter::installed() {
        Some(reporter) => reporter.fail(FatalFault::Internal(message)),
        None => {
            write_fatal_error_line(None, message, &mut StderrSink);
            signals::terminate(FatalFault::Internal(message).terminating_signal())
        }
    }
}

/// Chain onto the current panic hook so the panic message is printed first,
/// then report the panic as an internal fault.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        previous(info);
        if let Some(reporter) = CrashReporter::installed() {
            reporter.fail(FatalFault::Panic);
        }
    }));
}
