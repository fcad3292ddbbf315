//! Generic service contracts shared by platform adapters.
use serde::Serialize;
use std::{io, sync::mpsc};
use strum_macros::AsRefStr;

use crate::descriptor::ServiceDescriptor;
use crate::error::ServiceError;
use crate::logger::Logger;
use crate::systemd::Systemd;

/// Error type produced by program start and stop hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// A program that can run under a service manager.
///
/// `start` must not block; long-running work belongs on a thread the hook
/// spawns. `stop` undoes it before the process exits.
pub trait Program {
    /// Called when the service begins running.
    fn start(&mut self) -> Result<(), HookError>;

    /// Called when the service is asked to shut down.
    fn stop(&mut self) -> Result<(), HookError>;
}

/// Adapts a pair of closures into a [`Program`].
pub struct ProgramFn<S, T>
where
    S: FnMut() -> Result<(), HookError>,
    T: FnMut() -> Result<(), HookError>,
{
    on_start: S,
    on_stop: T,
}

impl<S, T> ProgramFn<S, T>
where
    S: FnMut() -> Result<(), HookError>,
    T: FnMut() -> Result<(), HookError>,
{
    /// Wraps start and stop closures.
    pub fn new(on_start: S, on_stop: T) -> Self {
        ProgramFn { on_start, on_stop }
    }
}

impl<S, T> Program for ProgramFn<S, T>
where
    S: FnMut() -> Result<(), HookError>,
    T: FnMut() -> Result<(), HookError>,
{
    fn start(&mut self) -> Result<(), HookError> {
        (self.on_start)()
    }

    fn stop(&mut self) -> Result<(), HookError> {
        (self.on_stop)()
    }
}

/// State of a service as reported live by the init system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// The unit is installed and active.
    Running,
    /// The unit is installed but not active.
    Stopped,
    /// No unit file exists for the service.
    NotInstalled,
}

/// Capability surface every platform adapter provides.
pub trait ServiceManager {
    /// Registers the service with the init system.
    fn install(&self) -> Result<(), ServiceError>;

    /// Removes the service from the init system.
    fn uninstall(&self) -> Result<(), ServiceError>;

    /// Starts the service via the init system.
    fn start(&self) -> Result<(), ServiceError>;

    /// Stops the service via the init system.
    fn stop(&self) -> Result<(), ServiceError>;

    /// Restarts the service via the init system.
    fn restart(&self) -> Result<(), ServiceError>;

    /// Queries the live state of the service.
    fn status(&self) -> Result<ServiceStatus, ServiceError>;

    /// Runs the program under the init system's supervision: the start
    /// hook, then by default a blocking wait for a termination signal,
    /// then the stop hook.
    fn run(&mut self) -> Result<(), ServiceError>;

    /// Builds the logger appropriate for the current environment. Write
    /// failures inside the logger are reported through `errors` when a
    /// sender is supplied.
    fn logger(
        &self,
        errors: Option<mpsc::Sender<io::Error>>,
    ) -> Result<Box<dyn Logger>, ServiceError>;
}

/// Builds the service manager for this host.
///
/// Platform adapters form a closed set selected once at startup; systemd
/// is the only backend on Linux hosts, so the concrete adapter is
/// returned directly. Hosts not running systemd get
/// [`ServiceError::UnsupportedPlatform`].
pub fn new_service_manager<P: Program>(
    program: P,
    descriptor: ServiceDescriptor,
) -> Result<Systemd<P>, ServiceError> {
    if !crate::systemd::is_available() {
        return Err(ServiceError::UnsupportedPlatform);
    }
    Ok(Systemd::new(program, descriptor))
}
