//! What the process was invoked with, captured once at startup.

#[cfg(unix)]
use std::ffi::CString;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::CrashError;

/// Name and version printed in the `<name> version <version>` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolIdentity {
    pub name: String,
    pub version: String,
}

impl ToolIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        ToolIdentity {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// A file whose contents are copied into the report.
#[derive(Debug)]
pub struct EchoedFile {
    path: PathBuf,
    /// Pre-converted so the fault path can `open(2)` without allocating.
    #[cfg(unix)]
    c_path: CString,
}

impl EchoedFile {
    fn new(path: PathBuf) -> Result<Self, CrashError> {
        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStrExt;

            let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
                return Err(CrashError::InvalidPath(path));
            };
            Ok(EchoedFile { path, c_path })
        }
        #[cfg(not(unix))]
        {
            Ok(EchoedFile { path })
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(unix)]
    pub(crate) fn c_path(&self) -> &std::ffi::CStr {
        &self.c_path
    }
}

/// The frontend's invocation: tool identity, the exact argument vector,
/// and the files to echo into a crash report.
///
/// Built by the frontend before anything can fail, then moved into the
/// [`CrashReporter`](crate::CrashReporter), which only ever hands out shared
/// references to it.
#[derive(Debug)]
pub struct InvocationContext {
    tool: ToolIdentity,
    args: Vec<OsString>,
    echoed: Vec<EchoedFile>,
}

impl InvocationContext {
    pub fn new<I, A>(tool: ToolIdentity, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        InvocationContext {
            tool,
            args: args.into_iter().map(Into::into).collect(),
            echoed: Vec::new(),
        }
    }

    /// Append a file to echo. Files are reported in the order they were
    /// added; the same path may appear more than once.
    pub fn echo_file(&mut self, path: impl Into<PathBuf>) -> Result<(), CrashError> {
        self.echoed.push(EchoedFile::new(path.into())?);
        Ok(())
    }

    pub fn tool(&self) -> &ToolIdentity {
        &self.tool
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn echoed_files(&self) -> &[EchoedFile] {
        &self.echoed
    }
}

#[cfg(test)]
mod tests;
