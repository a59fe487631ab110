use std::path::Path;

use super::*;

fn tool() -> ToolIdentity {
    ToolIdentity::new("Vela", "1.2.3")
}

#[test]
fn test_args_are_kept_in_order() {
    let ctx = InvocationContext::new(tool(), ["velac", "-interpret", "a.vela"]);
    let args: Vec<_> = ctx.args().iter().map(|a| a.to_str().unwrap()).collect();
    assert_eq!(args, ["velac", "-interpret", "a.vela"]);
}

#[test]
fn test_empty_context() {
    let ctx = InvocationContext::new(tool(), Vec::<String>::new());
    assert!(ctx.args().is_empty());
    assert!(ctx.echoed_files().is_empty());
    assert_eq!(ctx.tool().name, "Vela");
}

#[test]
fn test_echoed_files_keep_insertion_order_and_duplicates() {
    let mut ctx = InvocationContext::new(tool(), ["velac"]);
    ctx.echo_file("b.txt").unwrap();
    ctx.echo_file("a.txt").unwrap();
    ctx.echo_file("b.txt").unwrap();

    let paths: Vec<&Path> = ctx.echoed_files().iter().map(EchoedFile::path).collect();
    assert_eq!(paths, [Path::new("b.txt"), Path::new("a.txt"), Path::new("b.txt")]);
}

#[cfg(unix)]
#[test]
fn test_interior_nul_is_rejected() {
    let mut ctx = InvocationContext::new(tool(), ["velac"]);
    let err = ctx.echo_file("bad\0name").unwrap_err();
    assert!(matches!(err, CrashError::InvalidPath(_)));
    assert!(ctx.echoed_files().is_empty());
}

#[cfg(unix)]
#[test]
fn test_non_utf8_argument_survives() {
    use std::os::unix::ffi::OsStringExt;

    let raw = OsString::from_vec(vec![b'a', 0xff, b'b']);
    let ctx = InvocationContext::new(tool(), [raw.clone()]);
    assert_eq!(ctx.args(), [raw]);
}
