mod paths;
mod vars;

pub use paths::SearchPath;
pub use vars::Environment;

#[derive(Debug)]
pub enum EnvError {
    MissingAssignment(String),
    EmptyName,
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::MissingAssignment(arg) => {
                write!(f, "expected VAR=VALUE, got '{}'", arg)
            }
            EnvError::EmptyName => write!(f, "variable name cannot be empty"),
        }
    }
}

impl std::error::Error for EnvError {}
