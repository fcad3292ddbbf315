//! Error handling for svckit.
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Defines all possible errors that can occur in the service adapter.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Error for descriptors requesting a user-scope unit, which this
    /// adapter does not support.
    #[error("User-scope services are not supported on systemd targets")]
    UserServiceUnsupported,

    /// Error when a service name is empty or contains characters that are
    /// not valid in a unit name.
    #[error("Invalid service name '{0}'")]
    InvalidName(String),

    /// Error when the service unit file already exists at install time.
    #[error("Unit file already exists: {0}")]
    UnitExists(PathBuf),

    /// Error when the socket unit file already exists at install time.
    #[error("Socket unit file already exists: {0}")]
    SocketExists(PathBuf),

    /// Error when a control-plane command exits with a non-zero status.
    #[error("Command '{command}' failed with {status}")]
    ControlCommand {
        /// The command line that was invoked.
        command: String,
        /// The exit status it returned.
        status: ExitStatus,
    },

    /// Error reading, writing, or removing a unit file.
    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a YAML service definition.
    #[error("Invalid service definition: {0}")]
    Definition(#[from] serde_yaml::Error),

    /// Error returned by the program's start hook.
    #[error("Start hook for service '{service}' failed: {source}")]
    StartHook {
        /// The service whose start hook failed.
        service: String,
        /// The underlying error that occurred.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error returned by the program's stop hook.
    #[error("Stop hook for service '{service}' failed: {source}")]
    StopHook {
        /// The service whose stop hook failed.
        service: String,
        /// The underlying error that occurred.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error when no supported init system is present on this host.
    #[error("No supported init system detected on this host")]
    UnsupportedPlatform,
}
