#[path = "common/mod.rs"]
mod common;

use assert_cmd::Command;
use common::{BASIC_DEFINITION, write_definition};
use predicates::str::contains;
use tempfile::tempdir;

fn svk() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("svk"))
}

#[test]
fn bare_invocation_prints_usage() {
    svk().assert().failure().stderr(contains("Usage"));
}

#[test]
fn help_describes_the_tool() {
    svk()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("systemd"))
        .stdout(contains("render"));
}

#[test]
fn install_rejects_a_missing_definition() {
    svk()
        .arg("install")
        .arg("-c")
        .arg("/nonexistent/svckit.yaml")
        .assert()
        .failure();
}

#[test]
fn malformed_yaml_is_rejected() {
    let temp = tempdir().expect("failed to create tempdir");
    let config = write_definition(temp.path(), "name: [unclosed\n");

    svk()
        .arg("render")
        .arg("-c")
        .arg(config.to_str().unwrap())
        .assert()
        .failure();
}

#[test]
fn definitions_without_a_name_are_rejected() {
    let temp = tempdir().expect("failed to create tempdir");
    let config = write_definition(temp.path(), "executable: /bin/true\n");

    svk()
        .arg("render")
        .arg("-c")
        .arg(config.to_str().unwrap())
        .assert()
        .failure();
}

#[test]
fn traversal_names_are_rejected() {
    let temp = tempdir().expect("failed to create tempdir");
    let config = write_definition(temp.path(), "name: ../escape\nexecutable: /bin/true\n");

    svk()
        .arg("render")
        .arg("-c")
        .arg(config.to_str().unwrap())
        .assert()
        .failure();
}

#[test]
fn invalid_log_levels_are_rejected() {
    let temp = tempdir().expect("failed to create tempdir");
    let config = write_definition(temp.path(), BASIC_DEFINITION);

    svk()
        .arg("--log-level")
        .arg("loud")
        .arg("render")
        .arg("-c")
        .arg(config.to_str().unwrap())
        .assert()
        .failure()
        .stderr(contains("invalid log level"));
}
