use crate::core::env::Environment;
use crate::input::History;
use crate::process::{JobTable, SignalBridge};

/// Everything a line may read or change. Owned by the interpreter and lent
/// to built-ins; there is no other copy.
pub struct ShellState {
    pub env: Environment,
    pub history: History,
    pub jobs: JobTable,
    pub signals: SignalBridge,
    /// Whether stdout is a terminal, which decides how `clear` is rendered.
    pub interactive: bool,
}

impl ShellState {
    pub fn new(env: Environment, history: History, signals: SignalBridge, interactive: bool) -> Self {
        Self {
            env,
            history,
            jobs: JobTable::new(),
            signals,
            interactive,
        }
    }
}
