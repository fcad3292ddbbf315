//! Control-plane commands issued to systemctl.
use std::process::{Command, ExitStatus, Stdio};

use strum_macros::AsRefStr;
use tracing::debug;

use crate::error::ServiceError;

const SYSTEMCTL: &str = "systemctl";

/// Mutating verbs accepted by the control plane. `as_ref()` yields the
/// exact command-line spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ControlVerb {
    Enable,
    Disable,
    Start,
    Stop,
    Restart,
    DaemonReload,
}

/// Executes control-plane commands on behalf of the adapter.
///
/// The production implementation shells out to `systemctl`; tests
/// substitute recording or failing stand-ins.
pub trait CommandRunner: Send + Sync {
    /// Runs a verb, optionally against a unit. Any non-zero exit maps to
    /// [`ServiceError::ControlCommand`].
    fn run(&self, verb: ControlVerb, unit: Option<&str>) -> Result<(), ServiceError>;

    /// Reports whether a unit is currently active. The command's exit
    /// status is the only signal consulted.
    fn is_active(&self, unit: &str) -> Result<bool, ServiceError>;
}

/// Invokes the `systemctl` binary with its output discarded; the exit
/// status is the sole success signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct Systemctl;

impl Systemctl {
    fn invoke(&self, args: &[&str]) -> Result<ExitStatus, ServiceError> {
        debug!("Running {SYSTEMCTL} {}", args.join(" "));
        let status = Command::new(SYSTEMCTL)
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        Ok(status)
    }
}

impl CommandRunner for Systemctl {
    fn run(&self, verb: ControlVerb, unit: Option<&str>) -> Result<(), ServiceError> {
        let mut args = vec![verb.as_ref()];
        if let Some(unit) = unit {
            args.push(unit);
        }
        let status = self.invoke(&args)?;
        if !status.success() {
            return Err(ServiceError::ControlCommand {
                command: format!("{SYSTEMCTL} {}", args.join(" ")),
                status,
            });
        }
        Ok(())
    }

    fn is_active(&self, unit: &str) -> Result<bool, ServiceError> {
        let status = self.invoke(&["is-active", "--quiet", unit])?;
        Ok(status.success())
    }
}
