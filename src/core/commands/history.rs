use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;
use std::io::Write;

#[derive(Clone)]
pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(
        &self,
        _args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        for (index, entry) in state.history.iter().enumerate() {
            writeln!(out, "{}: {}", index + 1, entry)?;
        }
        Ok(Outcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing;

    #[test]
    fn test_history_is_one_indexed() -> Result<(), CommandError> {
        let (mut state, _dir) = testing::state();
        state.history.add("ls");
        state.history.add("cd /tmp");

        let (result, output) = testing::run(&HistoryCommand, &[], &mut state);
        result?;
        assert_eq!(output, "1: ls\n2: cd /tmp\n");
        Ok(())
    }
}
