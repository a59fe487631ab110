//! The Vela frontend driver.
//!
//! ```text
//! argv ──► FrontendOptions ──► InvocationContext ──► CrashReporter::install
//!                 │
//!                 ▼
//!      file lists + inputs ──► SourceManager ──► Executor (per input,
//!                                                 inside a crash frame)
//! ```
//!
//! Ordinary failures (bad options, unreadable inputs) come back as
//! [`OptionsError`] / [`FrontendError`] and end in `error: ...` with exit
//! status 1. Only internal faults and fatal signals reach the crash
//! reporter.

mod error;
pub mod execute;
pub mod filelist;
pub mod frontend;
pub mod inputs;
pub mod options;
mod tracing_setup;

pub use error::FrontendError;
pub use execute::{DryRunExecutor, ExecError, Executor};
pub use frontend::{
    install_crash_reporter, invocation_context, run, tool_identity, version_line, TOOL_NAME,
};
pub use inputs::{load_inputs, Input, LoadedInputs};
pub use options::{Action, DebugFault, FrontendOptions, OptionsError, USAGE};
pub use tracing_setup::init_tracing;
