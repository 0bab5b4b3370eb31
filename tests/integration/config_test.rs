use crate::{specdiff_in, workspace};
use assert_cmd::Command;
use predicates::prelude::*;

fn config_show(tmp: &tempfile::TempDir) -> Command {
    let mut cmd = specdiff_in(tmp.path());
    cmd.args(["config", "show", "--path", tmp.path().to_str().unwrap()]);
    cmd
}

#[test]
fn config_show_defaults() {
    let tmp = workspace();
    config_show(&tmp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved settings:"))
        .stdout(predicate::str::contains("defaults.format: text <- default"))
        .stdout(predicate::str::contains(
            "defaults.report: incompatibilities <- default",
        ))
        .stdout(predicate::str::contains(
            "defaults.fail_on_incompatible: true <- default",
        ));
}

#[test]
fn config_show_with_project_config() {
    let tmp = workspace();
    std::fs::write(
        tmp.path().join(".specdiff.toml"),
        r#"
[defaults]
format = "csv"
quiet = true
"#,
    )
    .unwrap();

    config_show(&tmp)
        .assert()
        .success()
        .stdout(predicate::str::contains(".specdiff.toml"))
        .stdout(predicate::str::contains("defaults.format: csv <- project config"))
        .stdout(predicate::str::contains("defaults.quiet: true <- project config"))
        .stdout(predicate::str::contains(
            "defaults.report: incompatibilities <- default",
        ));
}

#[test]
fn config_show_with_env_var() {
    let tmp = workspace();
    config_show(&tmp)
        .env("SPECDIFF_REPORT", "changes")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "defaults.report: changes <- env var (SPECDIFF_REPORT)",
        ));
}

#[test]
fn config_show_rejects_invalid_project_config() {
    let tmp = workspace();
    std::fs::write(
        tmp.path().join(".specdiff.toml"),
        "[defaults]\nreport = \"everything\"\n",
    )
    .unwrap();

    config_show(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
