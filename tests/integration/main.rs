mod config_test;
mod diff_test;
mod exit_codes_test;

use assert_cmd::Command;
use std::path::{Path, PathBuf};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("petstore")
        .join(name)
}

pub fn fixture_arg(name: &str) -> String {
    fixture_path(name).to_string_lossy().into_owned()
}

/// Scratch directory with an empty `.specdiff.toml`, so no project config above it applies.
pub fn workspace() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".specdiff.toml"), "").unwrap();
    tmp
}

/// `specdiff` run from `dir`, with the user config directory pointed at `dir`
/// and every `SPECDIFF_*` variable cleared.
pub fn specdiff_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("specdiff").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("SPECDIFF_FORMAT")
        .env_remove("SPECDIFF_REPORT")
        .env_remove("SPECDIFF_QUIET")
        .env_remove("SPECDIFF_FAIL_ON_INCOMPATIBLE");
    cmd
}
