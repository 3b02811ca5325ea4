use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;
use std::io::Write;

#[derive(Clone)]
pub struct EchoCommand;

impl Command for EchoCommand {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        match args {
            // a leading `$NAME` reads the overlay and the rest is ignored;
            // unset names print empty
            [first, ..] if first.starts_with('$') => {
                writeln!(out, "{}", state.env.get(&first[1..]).unwrap_or_default())?;
            }
            words => writeln!(out, "{}", words.join(" "))?,
        }
        Ok(Outcome::Handled)
    }
}
