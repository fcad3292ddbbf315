#[path = "common/mod.rs"]
mod common;

use assert_cmd::Command;
use common::{BASIC_DEFINITION, SOCKET_DEFINITION, write_definition};
use predicates::str::contains;
use tempfile::tempdir;

fn render(args: &[&str]) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("svk"));
    cmd.arg("render");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

#[test]
fn render_prints_the_service_unit() {
    let temp = tempdir().expect("failed to create tempdir");
    let config = write_definition(temp.path(), BASIC_DEFINITION);

    render(&["-c", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("ExecStart=/usr/bin/demo --port 8080"))
        .stdout(contains("Description=Demo daemon"))
        .stdout(contains("Restart=always"))
        .stdout(contains("EnvironmentFile=-/etc/sysconfig/demo"))
        .stdout(contains("WantedBy=multi-user.target"));
}

#[test]
fn render_omits_unset_optional_lines() {
    let temp = tempdir().expect("failed to create tempdir");
    let config = write_definition(temp.path(), BASIC_DEFINITION);

    let output = render(&["-c", config.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = String::from_utf8(output.stdout).expect("stdout not UTF-8");

    assert!(!stdout.contains("User="));
    assert!(!stdout.contains("WorkingDirectory="));
    assert!(!stdout.contains("RootDirectory="));
    assert!(!stdout.contains("ExecReload="));
    assert!(!stdout.contains("PIDFile="));
}

#[test]
fn render_socket_prints_both_units() {
    let temp = tempdir().expect("failed to create tempdir");
    let config = write_definition(temp.path(), SOCKET_DEFINITION);

    render(&["-c", config.to_str().unwrap(), "--socket"])
        .assert()
        .success()
        .stdout(contains("Requires=demo.socket"))
        .stdout(contains("NonBlocking=true"))
        .stdout(contains("[Socket]"))
        .stdout(contains("ListenStream=8080"))
        .stdout(contains("Description=Demo listener"));
}

#[test]
fn render_socket_fails_when_none_is_defined() {
    let temp = tempdir().expect("failed to create tempdir");
    let config = write_definition(temp.path(), BASIC_DEFINITION);

    render(&["-c", config.to_str().unwrap(), "--socket"])
        .assert()
        .failure();
}

#[test]
fn rendered_exec_start_survives_shell_tokenization() {
    let temp = tempdir().expect("failed to create tempdir");
    let config = write_definition(
        temp.path(),
        r#"name: spacey
executable: "/opt/my tools/serve"
args: ["--label", "two words", "$literal"]
"#,
    );

    let output = render(&["-c", config.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = String::from_utf8(output.stdout).expect("stdout not UTF-8");

    let line = stdout
        .lines()
        .find_map(|l| l.strip_prefix("ExecStart="))
        .expect("missing ExecStart line");
    let tokens = shlex::split(line).expect("unparseable ExecStart line");

    assert_eq!(
        tokens,
        vec!["/opt/my tools/serve", "--label", "two words", "$literal"]
    );
}

#[test]
fn render_rejects_a_missing_definition() {
    render(&["-c", "/nonexistent/svckit.yaml"]).assert().failure();
}
