use crate::input::HistoryError;
use crate::process::ProcessError;

#[derive(Debug)]
pub enum ShellError {
    Readline(rustyline::error::ReadlineError),
    Io(std::io::Error),
    HomeDirNotFound,
    ProcessError(ProcessError),
    History(HistoryError),
    FlagError(String),
    Logger(String),
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::Readline(err)
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<log::SetLoggerError> for ShellError {
    fn from(err: log::SetLoggerError) -> Self {
        ShellError::Logger(err.to_string())
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        ShellError::ProcessError(err)
    }
}

impl From<HistoryError> for ShellError {
    fn from(err: HistoryError) -> Self {
        ShellError::History(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Readline(e) => write!(f, "Readline error: {}", e),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::HomeDirNotFound => write!(f, "Home directory not found"),
            ShellError::FlagError(msg) => write!(f, "Flag error: {}", msg),
            ShellError::Logger(msg) => write!(f, "Logger error: {}", msg),
            ShellError::ProcessError(e) => write!(f, "Process error: {}", e),
            ShellError::History(e) => write!(f, "History error: {}", e),
        }
    }
}

impl std::error::Error for ShellError {}
