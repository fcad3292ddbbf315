#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

/// Writes a service definition into `dir` and returns its path.
pub fn write_definition(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("svckit.yaml");
    fs::write(&path, contents).expect("failed to write definition");
    path
}

/// A definition with an explicit executable and arguments.
pub const BASIC_DEFINITION: &str = r#"name: demo
description: Demo daemon
executable: /usr/bin/demo
args: ["--port", "8080"]
"#;

/// A definition that requests socket activation.
pub const SOCKET_DEFINITION: &str = r#"name: demo
executable: /usr/bin/demo
socket:
  description: Demo listener
  port: 8080
"#;
