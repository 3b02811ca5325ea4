use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;
use crate::path::PathExpander;
use std::env;
use std::io::Write;

#[derive(Clone)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        args: &[String],
        _state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let Some(target) = args.first() else {
            writeln!(out, "{}", env::current_dir()?.display())?;
            return Ok(Outcome::Handled);
        };

        let expanded_path = self.path_expander.expand(target);
        env::set_current_dir(&expanded_path)
            .map_err(CommandError::fs(format!("changing directory to '{}'", target)))?;
        log::debug!("working directory now {}", expanded_path.display());
        Ok(Outcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing;
    use crate::test_support::cwd_lock;

    #[test]
    fn test_cd_without_args_prints_cwd() -> Result<(), CommandError> {
        let _lock = cwd_lock();
        let (mut state, _dir) = testing::state();
        let (result, output) = testing::run(&CdCommand::new(), &[], &mut state);
        assert_eq!(result?, Outcome::Handled);
        assert_eq!(output, format!("{}\n", env::current_dir()?.display()));
        Ok(())
    }

    #[test]
    fn test_cd_temp() -> Result<(), CommandError> {
        let _lock = cwd_lock();
        let original = env::current_dir()?;
        let (mut state, dir) = testing::state();
        let target = dir.path().canonicalize()?;
        let env_before = state.env.clone();

        let (result, _) = testing::run(
            &CdCommand::new(),
            &[&target.to_string_lossy()],
            &mut state,
        );
        result?;
        assert_eq!(env::current_dir()?, target);
        // only `set` writes the overlay
        assert_eq!(state.env, env_before);

        env::set_current_dir(original)?;
        Ok(())
    }

    #[test]
    fn test_cd_invalid_is_reported() -> Result<(), CommandError> {
        let _lock = cwd_lock();
        let before = env::current_dir()?;
        let (mut state, _dir) = testing::state();
        let (result, _) = testing::run(&CdCommand::new(), &["/nonexistent/path"], &mut state);
        assert!(matches!(result, Err(CommandError::FileSystem { .. })));
        assert_eq!(env::current_dir()?, before);
        Ok(())
    }
}
