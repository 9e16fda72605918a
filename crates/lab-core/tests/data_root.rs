use std::ffi::OsString;

use lab_core::{DataRoot, ErrorKind};

#[test]
fn unset_variable_is_a_config_error() {
    let err = DataRoot::from_var(None).expect_err("unset must fail");
    assert_eq!(err.kind(), ErrorKind::Config);
    assert_eq!(err.info().code, "lab_core.root_unset");
}

#[test]
fn empty_variable_is_a_config_error() {
    let err = DataRoot::from_var(Some(OsString::new())).expect_err("empty must fail");
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn relative_root_is_rejected() {
    let err = DataRoot::new("relative/data").expect_err("relative must fail");
    assert_eq!(err.kind(), ErrorKind::Config);
    assert_eq!(err.info().code, "lab_core.root_relative");
}

#[test]
fn absolute_root_is_kept_verbatim() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let root = DataRoot::from_var(Some(dir.path().as_os_str().to_owned())).expect("root");
    assert_eq!(root.path(), dir.path());
}
