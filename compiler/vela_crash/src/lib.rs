//! Crash reporting for the Vela frontend.
//!
//! When the frontend dies from a fatal signal or an internal fault, the
//! installed [`CrashReporter`] writes a stack dump to stderr before the
//! process terminates:
//!
//! ```text
//! Stack dump:
//! Program arguments: velac -interpret -filelist /tmp/inputs.txt
//! Vela version 0.1.0-alpha.8
//! Contents of /tmp/inputs.txt:
//! ---
//! crash-in-user-code.vela
//! ---
//! While running user code "/src/crash-in-user-code.vela"
//! ```
//!
//! # Pieces
//!
//! - [`InvocationContext`]: arguments, tool identity and echoed files,
//!   captured once at startup.
//! - [`CrashReport`]: a borrowed view over the context that renders the
//!   report.
//! - [`with_crash_frame`]: pushes a line such as `While running user code`
//!   for as long as a closure runs.
//! - [`ReportGate`]: lets exactly one thread write a report.
//! - [`CrashReporter`]: owns all of the above and hooks fatal signals and
//!   panics.
//!
//! # Fault-path restrictions
//!
//! Everything reachable from the signal handler avoids the heap and locks:
//! output goes through a fixed-size [`FixedBuffer`] straight to `write(2)`,
//! echoed files are streamed with `open`/`read` into stack buffers, and
//! paths are converted to C strings when the context is built.

#![warn(clippy::allow_attributes_without_reason)]
#![allow(
    unsafe_code,
    reason = "signal handlers, sigaltstack and raw fd I/O need libc calls"
)]

mod context;
mod error;
mod frames;
mod gate;
mod report;
mod reporter;
mod signals;
mod sink;

pub use context::{EchoedFile, InvocationContext, ToolIdentity};
pub use error::{CrashError, FatalFault, Signal};
pub use frames::{active_frame_count, with_crash_frame, AtLocation, AtRange, CrashFrame, RunningUserCode};
pub use gate::{Claim, ClaimGuard, ReportGate};
pub use report::CrashReport;
pub use reporter::{fatal_error, CrashReporter, EmitOutcome, ReporterConfig};
pub use sink::{FixedBuffer, ReportSink, StderrSink, REPORT_BUFFER_SIZE};
