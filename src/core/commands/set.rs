use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;
use std::io::Write;

const USAGE: &str = "Please specify a variable in the format VAR=VALUE.";

/// `set KEY=VALUE`: updates the overlay handed to every later child.
#[derive(Clone)]
pub struct SetCommand;

impl Command for SetCommand {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        if args.is_empty() {
            return Err(CommandError::InvalidArguments(USAGE.to_string()));
        }

        let assignment = args.join(" ");
        let (name, value) = state
            .env
            .assign(&assignment)
            .map_err(|e| CommandError::InvalidArguments(format!("{} ({})", USAGE, e)))?;

        writeln!(out, "Set {} to {}", name, value)?;
        Ok(Outcome::Handled)
    }
}
