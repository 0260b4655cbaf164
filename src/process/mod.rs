use std::fmt;

pub mod executor;
pub mod signal;

pub use executor::{ChildHandle, ExitOutcome, Spawner, SystemSpawner};

/// Status for a command that could not be located.
pub const STATUS_NOT_FOUND: i32 = 127;
/// Status for a file that exists but cannot be executed.
pub const STATUS_NOT_EXECUTABLE: i32 = 126;
/// Status reserved for failing to create or reap a child.
pub const STATUS_SPAWN_FAILED: i32 = 125;

#[derive(Debug)]
pub enum ProcessError {
    NotFound(String),
    PermissionDenied(String),
    ExecFormat(String),
    Spawn(std::io::Error),
    Wait(std::io::Error),
    SignalError(String),
}

impl ProcessError {
    pub fn from_spawn(program: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ProcessError::NotFound(program.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                ProcessError::PermissionDenied(program.to_string())
            }
            _ if err.raw_os_error() == Some(libc::ENOEXEC) => {
                ProcessError::ExecFormat(program.to_string())
            }
            _ => ProcessError::Spawn(err),
        }
    }

    /// Status recorded for the segment that hit this error.
    pub fn status(&self) -> i32 {
        match self {
            ProcessError::NotFound(_) => STATUS_NOT_FOUND,
            ProcessError::PermissionDenied(_) | ProcessError::ExecFormat(_) => {
                STATUS_NOT_EXECUTABLE
            }
            ProcessError::Spawn(_) | ProcessError::Wait(_) | ProcessError::SignalError(_) => {
                STATUS_SPAWN_FAILED
            }
        }
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::NotFound(_) => write!(f, "not found"),
            ProcessError::PermissionDenied(_) => write!(f, "Permission denied"),
            ProcessError::ExecFormat(_) => write!(f, "Exec format error"),
            ProcessError::Spawn(e) => write!(f, "cannot spawn: {}", e),
            ProcessError::Wait(e) => write!(f, "cannot wait for child: {}", e),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}
