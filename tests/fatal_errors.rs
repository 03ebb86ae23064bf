#![cfg(unix)]

mod common;

use common::{stderr, stdout, Workspace, AFTER, BEFORE};

#[test]
fn no_test_pairs_aborts_without_report() {
    let ws = Workspace::new();
    ws.write_fixture("test_lonely_after.cpp", AFTER);
    ws.write_fixture("readme.txt", "nothing here\n");

    let out = ws.run_with_plugin(&[]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("No test pairs found in"), "{}", err);
    assert!(!ws.report().exists());
    assert!(!stdout(&out).contains("Tests  :"));
}

#[test]
fn failed_new_api_query_aborts_before_discovery() {
    let ws = Workspace::new();
    ws.write_pair("foo", BEFORE, AFTER);

    let out = ws.run_with_plugin(&["--new-package", "sdl3-not-installed"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(
        err.contains("ERROR: pkg-config --cflags sdl3-not-installed: Package sdl3-not-installed was not found in the pkg-config search path."),
        "{}",
        err
    );
    assert!(!ws.report().exists());
    assert!(stdout(&out).is_empty());
}

#[test]
fn failed_query_wins_over_missing_fixture_dir() {
    let ws = Workspace::new();
    let out = ws.run_with_plugin(&["--old-package", "sdl2-missing", "--tests-dir", "/nonexistent/migcheck"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("pkg-config --cflags sdl2-missing"), "{}", err);
    assert!(!err.contains("failed to read"));
}

#[test]
fn missing_pkg_config_is_fatal() {
    let ws = Workspace::new();
    ws.write_pair("foo", BEFORE, AFTER);
    let out = ws.run_with_plugin(&["--pkg-config", "/nonexistent/pkg-config"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("ERROR: pkg-config --cflags sdl2"));
    assert!(!ws.report().exists());
}
