//! Loggers handed to supervised programs.
//!
//! Interactive runs get a console logger on stderr. Runs under the init
//! daemon get a logger that speaks RFC 3164 datagrams to the system log
//! socket, tagged with the service name.
use chrono::Local;
use std::{
    io::{self, IsTerminal},
    os::unix::net::UnixDatagram,
    path::Path,
    sync::mpsc,
};

use crate::error::ServiceError;

const SYSLOG_PATH: &str = "/dev/log";

/// Syslog facility for system daemons.
const FACILITY_DAEMON: u8 = 3;

#[derive(Debug, Clone, Copy)]
enum Severity {
    Error = 3,
    Warning = 4,
    Info = 6,
}

impl Severity {
    fn priority(self) -> u8 {
        FACILITY_DAEMON * 8 + self as u8
    }

    fn label(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

/// Destination-agnostic logger for a supervised program.
pub trait Logger: Send + Sync {
    /// Records a message at error severity.
    fn error(&self, message: &str);

    /// Records a message at warning severity.
    fn warning(&self, message: &str);

    /// Records a message at info severity.
    fn info(&self, message: &str);
}

/// Chooses the logger for the current environment: console when stdout is
/// attached to a terminal, system log otherwise.
pub fn select(
    name: &str,
    errors: Option<mpsc::Sender<io::Error>>,
) -> Result<Box<dyn Logger>, ServiceError> {
    if io::stdout().is_terminal() {
        Ok(Box::new(ConsoleLogger))
    } else {
        Ok(Box::new(SyslogLogger::new(name, errors)?))
    }
}

/// Logger for interactive runs; timestamped lines on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    fn write(&self, severity: Severity, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S");
        eprintln!("{timestamp} {} {message}", severity.label());
    }
}

impl Logger for ConsoleLogger {
    fn error(&self, message: &str) {
        self.write(Severity::Error, message);
    }

    fn warning(&self, message: &str) {
        self.write(Severity::Warning, message);
    }

    fn info(&self, message: &str) {
        self.write(Severity::Info, message);
    }
}

/// Logger backed by the system log socket.
///
/// Frames are RFC 3164 without the hostname field, the local-socket
/// convention: `<PRI>Mmm dd hh:mm:ss tag[pid]: message`. Sending never
/// blocks the caller on a logging failure; write errors go to the error
/// channel when one was supplied and are dropped otherwise.
pub struct SyslogLogger {
    socket: UnixDatagram,
    tag: String,
    errors: Option<mpsc::Sender<io::Error>>,
}

impl SyslogLogger {
    /// Connects to the system log socket, tagging messages with `name`.
    pub fn new(
        name: &str,
        errors: Option<mpsc::Sender<io::Error>>,
    ) -> Result<Self, ServiceError> {
        Self::connect(Path::new(SYSLOG_PATH), name, errors)
    }

    fn connect(
        path: &Path,
        name: &str,
        errors: Option<mpsc::Sender<io::Error>>,
    ) -> Result<Self, ServiceError> {
        let socket = UnixDatagram::unbound()?;
        socket.connect(path)?;
        Ok(SyslogLogger {
            socket,
            tag: name.to_string(),
            errors,
        })
    }

    fn send(&self, severity: Severity, message: &str) {
        let timestamp = Local::now().format("%b %e %H:%M:%S");
        let frame = format!(
            "<{}>{timestamp} {}[{}]: {message}",
            severity.priority(),
            self.tag,
            std::process::id()
        );
        if let Err(e) = self.socket.send(frame.as_bytes()) {
            if let Some(errors) = &self.errors {
                let _ = errors.send(e);
            }
        }
    }
}

impl Logger for SyslogLogger {
    fn error(&self, message: &str) {
        self.send(Severity::Error, message);
    }

    fn warning(&self, message: &str) {
        self.send(Severity::Warning, message);
    }

    fn info(&self, message: &str) {
        self.send(Severity::Info, message);
    }
}
