//! The systemd platform adapter.
//!
//! Owns the full lifecycle of one service: synthesizing unit files under
//! `/etc/systemd/system`, registering them with the control plane, and
//! bridging OS termination signals to the program's start/stop hooks when
//! the process runs under systemd's supervision. Every operation is
//! synchronous and fail-fast: the first error aborts with no rollback, so
//! files written by a failed install stay in place until the caller
//! uninstalls.
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
};

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use tracing::{debug, info};

use crate::control::{CommandRunner, ControlVerb, Systemctl};
use crate::descriptor::ServiceDescriptor;
use crate::error::ServiceError;
use crate::logger::{self, Logger};
use crate::service::{Program, ServiceManager, ServiceStatus};
use crate::unit;

/// Directory holding system-scope unit files.
const UNIT_DIR: &str = "/etc/systemd/system";

/// Present exactly when systemd is the running init system.
const SYSTEMD_RUNTIME_DIR: &str = "/run/systemd/system";

/// Set once the run loop has performed its blocking signal wait. A later
/// call must not subscribe to signals a second time.
static SIGNAL_WAIT_DONE: AtomicBool = AtomicBool::new(false);

/// Reports whether this host is running systemd.
pub fn is_available() -> bool {
    Path::new(SYSTEMD_RUNTIME_DIR).exists()
}

/// Service adapter for hosts running systemd.
pub struct Systemd<P: Program> {
    program: P,
    descriptor: ServiceDescriptor,
    runner: Box<dyn CommandRunner>,
    unit_dir: PathBuf,
}

impl<P: Program> Systemd<P> {
    /// Creates an adapter that manages `descriptor` and runs `program`.
    ///
    /// No init-system detection happens here; use
    /// [`new_service_manager`](crate::service::new_service_manager) to
    /// select an adapter for the running host.
    pub fn new(program: P, descriptor: ServiceDescriptor) -> Self {
        Self::with_runner(program, descriptor, Box::new(Systemctl))
    }

    /// Creates an adapter that issues control-plane commands through
    /// `runner` instead of the `systemctl` binary.
    pub fn with_runner(
        program: P,
        descriptor: ServiceDescriptor,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Systemd {
            program,
            descriptor,
            runner,
            unit_dir: PathBuf::from(UNIT_DIR),
        }
    }

    /// The descriptor this adapter manages.
    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    /// Unit name on the control plane, `<name>.service`.
    fn service_unit_name(&self) -> String {
        format!("{}.service", self.descriptor.name)
    }

    fn unit_path(&self) -> PathBuf {
        self.unit_dir.join(self.service_unit_name())
    }

    fn socket_path(&self) -> PathBuf {
        self.unit_dir.join(format!("{}.socket", self.descriptor.name))
    }

    /// Rejects descriptors this adapter cannot express. Runs before any
    /// unit path is computed.
    fn guard(&self) -> Result<(), ServiceError> {
        if self.descriptor.options.user_service {
            return Err(ServiceError::UserServiceUnsupported);
        }
        self.descriptor.validate()
    }
}

impl<P: Program> ServiceManager for Systemd<P> {
    fn install(&self) -> Result<(), ServiceError> {
        self.guard()?;

        let unit_path = self.unit_path();
        if unit_path.exists() {
            return Err(ServiceError::UnitExists(unit_path));
        }
        let executable = self.descriptor.executable_path()?;
        fs::write(&unit_path, unit::service_unit(&self.descriptor, &executable))?;
        debug!("Wrote unit file {}", unit_path.display());

        if let Some(socket) = &self.descriptor.socket {
            let socket_path = self.socket_path();
            if socket_path.exists() {
                return Err(ServiceError::SocketExists(socket_path));
            }
            fs::write(&socket_path, unit::socket_unit(socket))?;
            debug!("Wrote socket unit {}", socket_path.display());
        }

        self.runner
            .run(ControlVerb::Enable, Some(&self.service_unit_name()))?;
        self.runner.run(ControlVerb::DaemonReload, None)?;
        info!("Installed service '{}'", self.descriptor.name);
        Ok(())
    }

    fn uninstall(&self) -> Result<(), ServiceError> {
        self.guard()?;

        self.runner
            .run(ControlVerb::Disable, Some(&self.service_unit_name()))?;
        fs::remove_file(self.unit_path())?;

        // The socket unit may never have been installed.
        match fs::remove_file(self.socket_path()) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        info!("Uninstalled service '{}'", self.descriptor.name);
        Ok(())
    }

    fn start(&self) -> Result<(), ServiceError> {
        self.runner
            .run(ControlVerb::Start, Some(&self.service_unit_name()))
    }

    fn stop(&self) -> Result<(), ServiceError> {
        self.runner
            .run(ControlVerb::Stop, Some(&self.service_unit_name()))
    }

    fn restart(&self) -> Result<(), ServiceError> {
        self.runner
            .run(ControlVerb::Restart, Some(&self.service_unit_name()))
    }

    fn status(&self) -> Result<ServiceStatus, ServiceError> {
        self.guard()?;

        if !self.unit_path().exists() {
            return Ok(ServiceStatus::NotInstalled);
        }
        if self.runner.is_active(&self.service_unit_name())? {
            Ok(ServiceStatus::Running)
        } else {
            Ok(ServiceStatus::Stopped)
        }
    }

    fn run(&mut self) -> Result<(), ServiceError> {
        let service = self.descriptor.name.clone();
        self.program.start().map_err(|source| ServiceError::StartHook {
            service: service.clone(),
            source,
        })?;
        info!("Service '{service}' started");

        if self.descriptor.options.run_wait {
            wait_for_termination()?;
        }

        info!("Service '{service}' stopping");
        self.program
            .stop()
            .map_err(|source| ServiceError::StopHook { service, source })
    }

    fn logger(
        &self,
        errors: Option<mpsc::Sender<io::Error>>,
    ) -> Result<Box<dyn Logger>, ServiceError> {
        logger::select(&self.descriptor.name, errors)
    }
}

/// Blocks until SIGTERM or SIGINT arrives.
///
/// The subscription is created and torn down inside this call. Only the
/// first call per process performs the wait; later calls return
/// immediately so the process-wide signal handler is never registered
/// twice.
fn wait_for_termination() -> Result<(), ServiceError> {
    if SIGNAL_WAIT_DONE.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let mut signals = Signals::new([SIGTERM, SIGINT])?;
    if let Some(signal) = signals.forever().next() {
        debug!("Received termination signal {signal}");
    }
    Ok(())
}
