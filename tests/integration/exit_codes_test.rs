use crate::{fixture_arg, specdiff_in, workspace};
use predicates::prelude::*;

#[test]
fn exit_code_0_when_compatible() {
    let tmp = workspace();
    specdiff_in(tmp.path())
        .args([
            "diff",
            &fixture_arg("old.yaml"),
            &fixture_arg("old.yaml"),
            "--quiet",
        ])
        .assert()
        .code(0);
}

#[test]
fn exit_code_1_when_incompatible() {
    let tmp = workspace();
    specdiff_in(tmp.path())
        .args([
            "diff",
            &fixture_arg("old.yaml"),
            &fixture_arg("new.yaml"),
            "--quiet",
        ])
        .assert()
        .code(1);
}

#[test]
fn no_fail_exits_0_when_incompatible() {
    let tmp = workspace();
    specdiff_in(tmp.path())
        .args([
            "diff",
            &fixture_arg("old.yaml"),
            &fixture_arg("new.yaml"),
            "--no-fail",
            "--quiet",
        ])
        .assert()
        .code(0);
}

#[test]
fn missing_file_is_an_error() {
    let tmp = workspace();
    specdiff_in(tmp.path())
        .args([
            "diff",
            "/nonexistent/old.yaml",
            &fixture_arg("new.yaml"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not read specification"));
}

#[test]
fn malformed_document_is_an_error() {
    let tmp = workspace();
    let bad = tmp.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();

    specdiff_in(tmp.path())
        .args([
            "diff",
            bad.to_str().unwrap(),
            &fixture_arg("new.yaml"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}
