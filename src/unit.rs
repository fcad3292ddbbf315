//! Rendering of systemd unit text from a service descriptor.
use std::path::Path;

use crate::descriptor::{ServiceDescriptor, SocketActivation};
use crate::escape::{escape_path, quote_arg};

/// Renders the `.service` unit text for a descriptor.
///
/// The executable path is resolved by the caller so rendering stays a
/// pure function. Optional descriptor fields produce a line only when
/// present; restart policy, start limiting, and the environment-file
/// reference are fixed template constants.
pub fn service_unit(descriptor: &ServiceDescriptor, executable: &Path) -> String {
    let exec_path = escape_path(&executable.to_string_lossy());
    let mut exec_start = exec_path.clone();
    for arg in &descriptor.args {
        exec_start.push(' ');
        exec_start.push_str(&quote_arg(arg));
    }

    let description = descriptor
        .description
        .as_deref()
        .unwrap_or_else(|| descriptor.label());

    let mut unit = format!(
        "[Unit]\nDescription={description}\nConditionFileIsExecutable={exec_path}\n"
    );
    if descriptor.socket.is_some() {
        unit.push_str(&format!("Requires={}.socket\n", descriptor.name));
    }

    unit.push_str("\n[Service]\n");
    if descriptor.socket.is_some() {
        unit.push_str("NonBlocking=true\n");
    }
    unit.push_str(&format!(
        "StartLimitInterval=5\nStartLimitBurst=10\nLimitNOFILE={}\n",
        descriptor.limit_nofile
    ));
    unit.push_str(&format!("ExecStart={exec_start}\n"));
    if let Some(chroot) = &descriptor.chroot {
        unit.push_str(&format!(
            "RootDirectory={}\n",
            quote_arg(&chroot.to_string_lossy())
        ));
    }
    if let Some(dir) = &descriptor.working_directory {
        unit.push_str(&format!(
            "WorkingDirectory={}\n",
            escape_path(&dir.to_string_lossy())
        ));
    }
    if let Some(user) = &descriptor.user {
        unit.push_str(&format!("User={user}\n"));
    }
    if let Some(signal) = descriptor.options.reload_signal {
        unit.push_str(&format!(
            "ExecReload=/bin/kill -{} \"$MAINPID\"\n",
            signal.as_str()
        ));
    }
    if let Some(pid_file) = &descriptor.options.pid_file {
        unit.push_str(&format!(
            "PIDFile={}\n",
            quote_arg(&pid_file.to_string_lossy())
        ));
    }
    unit.push_str(&format!(
        "UMask={}\nRestart=always\nRestartSec=120\nEnvironmentFile=-/etc/sysconfig/{}\n",
        descriptor.umask, descriptor.name
    ));
    unit.push_str("\n[Install]\nWantedBy=multi-user.target\n");
    unit
}

/// Renders the `.socket` unit text for socket activation.
pub fn socket_unit(socket: &SocketActivation) -> String {
    format!(
        r#"[Unit]
Description={description}

[Socket]
ListenStream={port}
NoDelay=true
"#,
        description = socket.description,
        port = socket.port
    )
}
