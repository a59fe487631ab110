use std::cell::RefCell;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use vela_crash::active_frame_count;
use vela_source::{BufferId, SourceManager};

use super::*;
use crate::ExecError;

/// Records which buffers ran and how many crash frames were active.
#[derive(Default)]
struct RecordingExecutor {
    runs: RefCell<Vec<(String, usize)>>,
}

impl Executor for RecordingExecutor {
    fn execute(&self, sources: &SourceManager, buffer: BufferId) -> Result<(), ExecError> {
        self.runs
            .borrow_mut()
            .push((sources.identifier(buffer).to_string(), active_frame_count()));
        Ok(())
    }
}

struct FailingExecutor;

impl Executor for FailingExecutor {
    fn execute(&self, _: &SourceManager, _: BufferId) -> Result<(), ExecError> {
        Err(ExecError::new("division by zero"))
    }
}

fn write_input(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn canonical(path: &Path) -> String {
    std::fs::canonicalize(path).unwrap().display().to_string()
}

#[test]
fn test_version_line() {
    assert_eq!(
        version_line(),
        format!("Vela version {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_interpret_runs_each_input_inside_one_frame() {
    let dir = tempdir().unwrap();
    let a = write_input(dir.path(), "a.vela", "print(1)\n");
    let b = write_input(dir.path(), "b.vela", "print(2)\n");
    let options = FrontendOptions {
        inputs: vec![a.clone(), b.clone()],
        ..FrontendOptions::default()
    };

    let executor = RecordingExecutor::default();
    let mut out = Vec::new();
    run(&options, &executor, &mut out).unwrap();

    assert_eq!(
        executor.runs.into_inner(),
        [(canonical(&a), 1), (canonical(&b), 1)]
    );
    assert_eq!(active_frame_count(), 0);
    assert!(out.is_empty());
}

#[test]
fn test_executor_error_names_the_input() {
    let dir = tempdir().unwrap();
    let a = write_input(dir.path(), "a.vela", "1 / 0\n");
    let options = FrontendOptions {
        inputs: vec![a.clone()],
        ..FrontendOptions::default()
    };

    let err = run(&options, &FailingExecutor, &mut Vec::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("running `{}` failed: division by zero", canonical(&a))
    );
    assert_eq!(active_frame_count(), 0);
}

#[test]
fn test_print_inputs_lists_positional_then_file_list_entries() {
    let dir = tempdir().unwrap();
    let listed = write_input(dir.path(), "listed.vela", "");
    let direct = write_input(dir.path(), "direct.vela", "");
    let list = write_input(
        dir.path(),
        "inputs.txt",
        &format!("{}\n", listed.display()),
    );
    let options = FrontendOptions {
        action: Action::PrintInputs,
        inputs: vec![direct.clone()],
        file_lists: vec![list],
        debug_fault: None,
    };

    let mut out = Vec::new();
    run(&options, &RecordingExecutor::default(), &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{}\n{}\n", canonical(&direct), canonical(&listed))
    );
}

#[test]
fn test_missing_file_list_is_an_ordinary_error() {
    let dir = tempdir().unwrap();
    let options = FrontendOptions {
        file_lists: vec![dir.path().join("absent.txt")],
        ..FrontendOptions::default()
    };

    let err = run(&options, &RecordingExecutor::default(), &mut Vec::new()).unwrap_err();
    assert!(matches!(err, FrontendError::ReadFileList { .. }));
}

#[test]
fn test_invocation_context_echoes_every_file_list() {
    let options = FrontendOptions {
        file_lists: vec![PathBuf::from("one.txt"), PathBuf::from("two.txt")],
        ..FrontendOptions::default()
    };
    let args: Vec<OsString> = ["velac", "-filelist", "one.txt", "-filelist", "two.txt"]
        .into_iter()
        .map(OsString::from)
        .collect();

    let context = invocation_context(&args, &options).unwrap();

    assert_eq!(context.args(), args.as_slice());
    assert_eq!(context.tool(), &tool_identity());
    let echoed: Vec<&Path> = context.echoed_files().iter().map(|f| f.path()).collect();
    assert_eq!(echoed, [Path::new("one.txt"), Path::new("two.txt")]);
}
