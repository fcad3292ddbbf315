//! Svckit turns a program into a managed background service on Linux hosts
//! running systemd. It synthesizes and installs unit files, drives the
//! service's lifecycle through systemctl, and bridges OS termination
//! signals to the program's own start and stop hooks when the process runs
//! under the init daemon's supervision.

/// CLI interface.
pub mod cli;

/// Control-plane command execution.
pub mod control;

/// Service descriptors and definition files.
pub mod descriptor;

/// Error handling.
pub mod error;

/// Shell escaping for command lines embedded in unit files.
pub mod escape;

/// Loggers for supervised programs.
pub mod logger;

/// Generic service contracts.
pub mod service;

/// The systemd platform adapter.
pub mod systemd;

/// Unit-file rendering.
pub mod unit;
