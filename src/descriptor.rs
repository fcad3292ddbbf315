//! Service descriptors and the YAML definition files that produce them.
use nix::sys::signal::Signal;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};

use crate::error::ServiceError;

fn default_umask() -> String {
    "022".to_string()
}

fn default_limit_nofile() -> u64 {
    1024
}

/// Describes a program to be managed as a background service.
///
/// Built once and handed to the adapter, which owns it for the process
/// lifetime; nothing mutates it after construction.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDescriptor {
    /// Unit name, without the `.service` suffix.
    pub name: String,
    /// Human-readable name for frontends. Falls back to `name`.
    pub display_name: Option<String>,
    /// One-line description rendered into the unit file. Falls back to
    /// the display name.
    pub description: Option<String>,
    /// Path to the executable. Defaults to the binary currently running.
    pub executable: Option<PathBuf>,
    /// Arguments for the `ExecStart=` line, in order.
    #[serde(default)]
    pub args: Vec<String>,
    /// System user the service runs as.
    pub user: Option<String>,
    /// Working directory set before the executable starts.
    pub working_directory: Option<PathBuf>,
    /// Root directory the service is chrooted into.
    pub chroot: Option<PathBuf>,
    /// File-mode creation mask, as an octal string.
    #[serde(default = "default_umask")]
    pub umask: String,
    /// Open-file-descriptor limit for the service.
    #[serde(default = "default_limit_nofile")]
    pub limit_nofile: u64,
    /// Socket-activation parameters. A value here requests a matching
    /// `.socket` unit at install time.
    pub socket: Option<SocketActivation>,
    /// Behavior toggles with per-field defaults.
    #[serde(default)]
    pub options: ServiceOptions,
}

/// Parameters for a socket-activation unit.
#[derive(Debug, Clone, Deserialize)]
pub struct SocketActivation {
    /// Description line of the socket unit.
    pub description: String,
    /// TCP port for the `ListenStream=` directive.
    pub port: u16,
}

/// Behavior toggles for a service, each with a documented default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceOptions {
    /// Request a user-scope unit instead of a system-wide one.
    /// Defaults to `false`; the systemd adapter rejects `true`.
    pub user_service: bool,
    /// Signal sent to the main PID by `ExecReload=`, named as accepted
    /// by `kill` (e.g. `SIGHUP`). Defaults to none.
    #[serde(deserialize_with = "signal_from_name")]
    pub reload_signal: Option<Signal>,
    /// PID file path recorded in the unit. Defaults to none.
    pub pid_file: Option<PathBuf>,
    /// Whether `run()` blocks until a termination signal arrives.
    /// Defaults to `true`.
    pub run_wait: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        ServiceOptions {
            user_service: false,
            reload_signal: None,
            pid_file: None,
            run_wait: true,
        }
    }
}

fn signal_from_name<'de, D>(deserializer: D) -> Result<Option<Signal>, D::Error>
where
    D: Deserializer<'de>,
{
    let name: Option<String> = Option::deserialize(deserializer)?;
    name.map(|name| name.parse::<Signal>().map_err(serde::de::Error::custom))
        .transpose()
}

impl ServiceDescriptor {
    /// Creates a descriptor with the given name and default settings.
    pub fn new(name: impl Into<String>) -> Self {
        ServiceDescriptor {
            name: name.into(),
            display_name: None,
            description: None,
            executable: None,
            args: Vec::new(),
            user: None,
            working_directory: None,
            chroot: None,
            umask: default_umask(),
            limit_nofile: default_limit_nofile(),
            socket: None,
            options: ServiceOptions::default(),
        }
    }

    /// Loads and validates a descriptor from a YAML definition file.
    pub fn from_file(path: &Path) -> Result<Self, ServiceError> {
        let raw = fs::read_to_string(path)?;
        let descriptor: ServiceDescriptor = serde_yaml::from_str(&raw)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Checks that the name can serve as a unit-file stem. Unit paths are
    /// derived by joining the name onto a fixed directory, so characters
    /// like `/` must never appear in it.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let re = Regex::new(r"^[A-Za-z0-9:_.\-]+$").unwrap();
        if !re.is_match(&self.name) {
            return Err(ServiceError::InvalidName(self.name.clone()));
        }
        Ok(())
    }

    /// Human-readable label: the display name when set, else the name.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Executable path, defaulting to the binary currently running.
    pub fn executable_path(&self) -> Result<PathBuf, ServiceError> {
        match &self.executable {
            Some(path) => Ok(path.clone()),
            None => Ok(env::current_exe()?),
        }
    }
}

impl fmt::Display for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
