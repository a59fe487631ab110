//! Command-line parsing.
//!
//! Options follow the single-dash style of compiler frontends
//! (`-interpret`, `-filelist <path>`); anything that does not start with a
//! dash is an input file.

use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str = "\
Vela frontend

Usage: velac [action] [options] [inputs...]

Actions:
  -interpret                      Run user code (default)
  -print-inputs                   Print each resolved input path
  -version, --version             Show version information
  -help, --help                   Show this help message

Options:
  -filelist <path>                Read input paths from <path>, one per line

Debugging:
  -debug-crash-immediately        Raise SIGILL right after startup
  -debug-assert-immediately       Fail an internal assertion right after startup
  -debug-unreachable-immediately  Hit an unreachable path right after startup
  -debug-crash-in-user-code       Raise SIGILL while user code is running
  -debug-crash-concurrently       Fault on two threads at once
";

/// What the frontend was asked to do.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Action {
    #[default]
    Interpret,
    PrintInputs,
    Version,
    Help,
}

/// Deliberate faults for exercising the crash reporter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DebugFault {
    CrashImmediately,
    AssertImmediately,
    UnreachableImmediately,
    CrashInUserCode,
    CrashConcurrently,
}

impl DebugFault {
    /// Faults that fire before any input is touched.
    pub fn is_immediate(self) -> bool {
        !matches!(self, DebugFault::CrashInUserCode)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("option `{0}` expects a value")]
    MissingValue(&'static str),
    #[error("no input files")]
    NoInputs,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontendOptions {
    pub action: Action,
    /// Positional inputs, in command-line order.
    pub inputs: Vec<PathBuf>,
    /// `-filelist` arguments, in command-line order.
    pub file_lists: Vec<PathBuf>,
    pub debug_fault: Option<DebugFault>,
}

impl FrontendOptions {
    /// Parse everything after the program name.
    pub fn parse<I>(args: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut options = FrontendOptions::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let Some(flag) = arg.to_str().filter(|s| s.starts_with('-') && s.len() > 1) else {
                options.inputs.push(PathBuf::from(arg));
                continue;
            };

            match flag {
                "-interpret" => options.action = Action::Interpret,
                "-print-inputs" => options.action = Action::PrintInputs,
                "-version" | "--version" => options.action = Action::Version,
                "-help" | "--help" | "-h" => options.action = Action::Help,
                "-filelist" => {
                    let Some(path) = args.next() else {
                        return Err(OptionsError::MissingValue("-filelist"));
                    };
                    options.file_lists.push(PathBuf::from(path));
                }
                "-debug-crash-immediately" => {
                    options.debug_fault = Some(DebugFault::CrashImmediately);
                }
                "-debug-assert-immediately" => {
                    options.debug_fault = Some(DebugFault::AssertImmediately);
                }
                "-debug-unreachable-immediately" => {
                    options.debug_fault = Some(DebugFault::UnreachableImmediately);
                }
                "-debug-crash-in-user-code" => {
                    options.debug_fault = Some(DebugFault::CrashInUserCode);
                }
                "-debug-crash-concurrently" => {
                    options.debug_fault = Some(DebugFault::CrashConcurrently);
                }
                other => return Err(OptionsError::UnknownOption(other.to_string())),
            }
        }

        if options.needs_inputs() && options.inputs.is_empty() && options.file_lists.is_empty() {
            return Err(OptionsError::NoInputs);
        }
        Ok(options)
    }

    fn needs_inputs(&self) -> bool {
        let immediate_fault = self.debug_fault.is_some_and(DebugFault::is_immediate);
        matches!(self.action, Action::Interpret | Action::PrintInputs) && !immediate_fault
    }
}
