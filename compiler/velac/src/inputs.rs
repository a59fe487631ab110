//! Loading input files into a [`SourceManager`].

use std::path::{Path, PathBuf};

use vela_source::{BufferId, SourceManager};

use crate::FrontendError;

/// One loaded input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Input {
    /// The path as it was given.
    pub path: PathBuf,
    /// Canonical path, or `path` again when it cannot be canonicalized.
    pub resolved: PathBuf,
    pub buffer: BufferId,
}

/// Every input of one invocation, in order, plus the buffers holding them.
#[derive(Debug, Default)]
pub struct LoadedInputs {
    pub sources: SourceManager,
    pub inputs: Vec<Input>,
}

/// Canonicalize `path` when possible.
pub fn resolve_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[tracing::instrument(level = "debug", skip_all, fields(count = paths.len()))]
pub fn load_inputs(paths: &[PathBuf]) -> Result<LoadedInputs, FrontendError> {
    let mut loaded = LoadedInputs::default();
    for path in paths {
        let text = std::fs::read_to_string(path).map_err(|source| FrontendError::ReadInput {
            path: path.clone(),
            source,
        })?;
        let resolved = resolve_path(path);
        let buffer = loaded
            .sources
            .add_buffer(resolved.display().to_string(), text);
        tracing::debug!(input = %resolved.display(), "loaded input");
        loaded.inputs.push(Input {
            path: path.clone(),
            resolved,
            buffer,
        });
    }
    Ok(loaded)
}

#[cfg(test)]
mod tests;
