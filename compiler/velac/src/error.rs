use std::io;
use std::path::PathBuf;

use crate::ExecError;

/// Ordinary, user-facing frontend failures. These end with an `error:`
/// line and exit status 1, never with a stack dump.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("cannot read file list `{}`: {source}", path.display())]
    ReadFileList { path: PathBuf, source: io::Error },

    #[error("cannot read input `{}`: {source}", path.display())]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("running `{}` failed: {source}", path.display())]
    Execution { path: PathBuf, source: ExecError },

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}
