use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("mimic")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("format"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("chunk-size"))
        .stdout(predicate::str::contains("interval-ms"));
}

#[test]
fn test_format_help_shows_text_flag() {
    cargo_bin_cmd!("mimic")
        .args(["format", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--text"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("mimic")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("mimic")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_unknown_theme_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("mimic")
        .env("MIMIC_HOME", dir.path())
        .args(["--theme", "solarized", "format", "--text", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown theme"));
}
