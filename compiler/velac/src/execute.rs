//! The seam between the frontend and whatever runs user code.

use vela_crash::Signal;
use vela_source::{BufferId, SourceManager};

/// A failure reported by an executor. User-code errors are ordinary errors;
/// only faults inside the executor itself reach the crash reporter.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ExecError {
    message: String,
}

impl ExecError {
    #[cold]
    pub fn new(message: impl Into<String>) -> Self {
        ExecError {
            message: message.into(),
        }
    }
}

/// Runs one input buffer. Called inside a `While running user code` crash
/// frame for that input.
pub trait Executor {
    fn execute(&self, sources: &SourceManager, buffer: BufferId) -> Result<(), ExecError>;
}

/// Executor used by the `velac` binary.
///
/// The evaluation engine lives outside the frontend, so this only walks the
/// input and can fault on request with `-debug-crash-in-user-code`.
#[derive(Copy, Clone, Debug, Default)]
pub struct DryRunExecutor {
    crash_in_user_code: bool,
}

impl DryRunExecutor {
    pub fn new(crash_in_user_code: bool) -> Self {
        DryRunExecutor { crash_in_user_code }
    }
}

impl Executor for DryRunExecutor {
    fn execute(&self, sources: &SourceManager, buffer: BufferId) -> Result<(), ExecError> {
        let text = sources.text(buffer);
        tracing::debug!(
            input = sources.identifier(buffer),
            bytes = text.len(),
            lines = text.lines().count(),
            "dry run"
        );
        if self.crash_in_user_code {
            Signal::Ill.raise();
        }
        Ok(())
    }
}
