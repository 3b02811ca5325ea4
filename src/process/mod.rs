use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

pub mod executor;
pub mod jobs;
pub mod signal;

pub use executor::{Direction, ProcessLauncher};
pub use jobs::{Job, JobTable};
pub use signal::SignalBridge;

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    SpawnFailure {
        command: String,
        source: std::io::Error,
    },
    NonZeroExit {
        command: String,
        status: ExitStatus,
    },
    Redirect {
        path: PathBuf,
        source: std::io::Error,
    },
    Wait(std::io::Error),
    SignalError(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(cmd) => write!(f, "Command '{}' not found.", cmd),
            ProcessError::SpawnFailure { command, source } => {
                write!(f, "Failed to start '{}': {}", command, source)
            }
            ProcessError::NonZeroExit { command, status } => {
                write!(f, "Error executing command '{}': {}", command, status)
            }
            ProcessError::Redirect { path, source } => {
                write!(f, "Cannot open '{}': {}", path.display(), source)
            }
            ProcessError::Wait(e) => write!(f, "Failed to wait for process: {}", e),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::SpawnFailure { source, .. } | ProcessError::Redirect { source, .. } => {
                Some(source)
            }
            ProcessError::Wait(e) => Some(e),
            _ => None,
        }
    }
}
