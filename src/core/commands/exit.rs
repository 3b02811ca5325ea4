use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;
use std::io::Write;

/// Ends the session; the shell flushes history before the process exits.
#[derive(Clone)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(
        &self,
        _args: &[String],
        _state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        writeln!(out, "Exiting the shell.")?;
        Ok(Outcome::Terminate)
    }
}
