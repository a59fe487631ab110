//! Driving one frontend invocation.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::sync::Barrier;

use vela_crash::{
    fatal_error, with_crash_frame, CrashError, CrashReporter, InvocationContext, ReporterConfig,
    RunningUserCode, Signal, ToolIdentity,
};

use crate::filelist::read_file_list;
use crate::{load_inputs, Action, DebugFault, Executor, FrontendError, FrontendOptions};

/// Tool name printed in the crash report's version line.
pub const TOOL_NAME: &str = "Vela";

pub fn tool_identity() -> ToolIdentity {
    ToolIdentity::new(TOOL_NAME, env!("CARGO_PKG_VERSION"))
}

pub fn version_line() -> String {
    let tool = tool_identity();
    format!("{} version {}", tool.name, tool.version)
}

/// Build the context a crash report describes: the full argument vector
/// (program name included) and every `-filelist` as an echoed file.
pub fn invocation_context(
    args: &[OsString],
    options: &FrontendOptions,
) -> Result<InvocationContext, CrashError> {
    let mut context = InvocationContext::new(tool_identity(), args.iter().cloned());
    for list in &options.file_lists {
        context.echo_file(list.clone())?;
    }
    Ok(context)
}

/// Install the process-wide crash reporter with the default configuration.
pub fn install_crash_reporter(
    args: &[OsString],
    options: &FrontendOptions,
) -> Result<&'static CrashReporter, CrashError> {
    let context = invocation_context(args, options)?;
    CrashReporter::new(context, ReporterConfig::default()).install()
}

/// Run the requested action. Debug faults that fire immediately do so
/// before any file list or input is read.
#[tracing::instrument(level = "debug", skip_all, fields(action = ?options.action))]
pub fn run(
    options: &FrontendOptions,
    executor: &dyn Executor,
    out: &mut dyn io::Write,
) -> Result<(), FrontendError> {
    if let Some(fault) = options.debug_fault.filter(|f| f.is_immediate()) {
        fire_immediate(fault);
    }

    let paths = collect_input_paths(options)?;
    let loaded = load_inputs(&paths)?;

    match options.action {
        Action::PrintInputs => {
            for input in &loaded.inputs {
                writeln!(out, "{}", input.resolved.display())?;
            }
        }
        Action::Interpret => {
            for input in &loaded.inputs {
                let frame = RunningUserCode::new(&input.resolved);
                with_crash_frame(&frame, || executor.execute(&loaded.sources, input.buffer))
                    .map_err(|source| FrontendError::Execution {
                        path: input.resolved.clone(),
                        source,
                    })?;
            }
        }
        Action::Version | Action::Help => {}
    }
    Ok(())
}

/// Positional inputs first, then each file list's entries in list order.
fn collect_input_paths(options: &FrontendOptions) -> Result<Vec<PathBuf>, FrontendError> {
    let mut paths = options.inputs.clone();
    for list in &options.file_lists {
        paths.extend(read_file_list(list)?);
    }
    Ok(paths)
}

fn fire_immediate(fault: DebugFault) {
    tracing::debug!(?fault, "firing debug fault");
    match fault {
        DebugFault::CrashImmediately => Signal::Ill.raise(),
        DebugFault::AssertImmediately => {
            panic!("assertion failed: -debug-assert-immediately");
        }
        DebugFault::UnreachableImmediately => {
            fatal_error("reached unreachable code (-debug-unreachable-immediately)")
        }
        DebugFault::CrashConcurrently => crash_concurrently(),
        DebugFault::CrashInUserCode => {}
    }
}

fn crash_concurrently() {
    let barrier = Barrier::new(2);
    std::thread::scope(|scope| {
        for _ in 0..2 {
            scope.spawn(|| {
                barrier.wait();
                Signal::Segv.raise();
            });
        }
    });
}

#[cfg(test)]
mod tests;
