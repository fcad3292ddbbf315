//! Command-line interface for svckit.
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

/// Wrapper around `LevelFilter` so clap can parse log level names.
#[derive(Clone, Copy, Debug)]
pub struct LogLevelArg(LevelFilter);

impl LogLevelArg {
    /// String representation suitable for `RUST_LOG`.
    pub fn as_str(&self) -> &'static str {
        match self.0 {
            LevelFilter::OFF => "off",
            LevelFilter::ERROR => "error",
            LevelFilter::WARN => "warn",
            LevelFilter::INFO => "info",
            LevelFilter::DEBUG => "debug",
            LevelFilter::TRACE => "trace",
        }
    }
}

impl FromStr for LogLevelArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let level = match value.trim().to_ascii_lowercase().as_str() {
            "off" => LevelFilter::OFF,
            "error" => LevelFilter::ERROR,
            "warn" | "warning" => LevelFilter::WARN,
            "info" => LevelFilter::INFO,
            "debug" => LevelFilter::DEBUG,
            "trace" => LevelFilter::TRACE,
            other => return Err(format!("invalid log level '{other}'")),
        };
        Ok(LogLevelArg(level))
    }
}

/// Command-line interface for svckit.
#[derive(Parser)]
#[command(name = "svk", version, author)]
#[command(about = "Install and run programs as systemd services", long_about = None)]
pub struct Cli {
    /// Override the logging verbosity for this invocation only.
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for svk.
#[derive(Subcommand)]
pub enum Commands {
    /// Install the service described by the definition file.
    Install {
        /// Path to the service definition file (defaults to `svckit.yaml`).
        #[arg(short, long, default_value = "svckit.yaml")]
        config: String,
    },

    /// Remove the service from the init system.
    Uninstall {
        /// Path to the service definition file (defaults to `svckit.yaml`).
        #[arg(short, long, default_value = "svckit.yaml")]
        config: String,
    },

    /// Start the installed service.
    Start {
        /// Path to the service definition file (defaults to `svckit.yaml`).
        #[arg(short, long, default_value = "svckit.yaml")]
        config: String,
    },

    /// Stop the running service.
    Stop {
        /// Path to the service definition file (defaults to `svckit.yaml`).
        #[arg(short, long, default_value = "svckit.yaml")]
        config: String,
    },

    /// Restart the service.
    Restart {
        /// Path to the service definition file (defaults to `svckit.yaml`).
        #[arg(short, long, default_value = "svckit.yaml")]
        config: String,
    },

    /// Show the service's current state.
    Status {
        /// Path to the service definition file (defaults to `svckit.yaml`).
        #[arg(short, long, default_value = "svckit.yaml")]
        config: String,

        /// Emit machine-readable JSON output instead of a label.
        #[arg(long)]
        json: bool,
    },

    /// Print the rendered unit text without touching the system.
    Render {
        /// Path to the service definition file (defaults to `svckit.yaml`).
        #[arg(short, long, default_value = "svckit.yaml")]
        config: String,

        /// Also print the socket unit the definition requests.
        #[arg(long)]
        socket: bool,
    },
}

/// Parses command-line arguments into a [`Cli`].
pub fn parse_args() -> Cli {
    Cli::parse()
}
