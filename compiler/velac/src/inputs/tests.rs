use tempfile::tempdir;

use super::*;

#[test]
fn test_inputs_load_in_order_with_resolved_paths() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.vela");
    let second = dir.path().join("second.vela");
    std::fs::write(&first, "let x: Int? = nil\n").unwrap();
    std::fs::write(&second, "x!\n").unwrap();

    let loaded = load_inputs(&[second.clone(), first.clone()]).unwrap();

    assert_eq!(loaded.inputs.len(), 2);
    assert_eq!(loaded.inputs[0].path, second);
    assert_eq!(loaded.inputs[0].resolved, std::fs::canonicalize(&second).unwrap());
    assert_eq!(loaded.sources.text(loaded.inputs[0].buffer), "x!\n");
    assert_eq!(
        loaded.sources.text(loaded.inputs[1].buffer),
        "let x: Int? = nil\n"
    );
}

#[test]
fn test_buffer_identifier_is_resolved_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("main.vela");
    std::fs::write(&path, "").unwrap();

    let loaded = load_inputs(std::slice::from_ref(&path)).unwrap();
    let input = &loaded.inputs[0];
    assert_eq!(
        loaded.sources.identifier(input.buffer),
        input.resolved.display().to_string()
    );
}

#[test]
fn test_unreadable_input_is_an_ordinary_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.vela");

    let err = load_inputs(&[missing.clone()]).unwrap_err();
    assert!(matches!(err, FrontendError::ReadInput { ref path, .. } if *path == missing));
}

#[test]
fn test_resolve_falls_back_to_given_path() {
    let path = Path::new("definitely/not/here.vela");
    assert_eq!(resolve_path(path), path);
}
