use std::ffi::CStr;
use std::io::Write;

use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;

const CLEAR_SEQUENCE: &str = "\x1B[2J\x1B[1;1H";

/// Clears a terminal directly. Without one, emits the line `clear` which a
/// front-end reading our stdout treats as its own clear instruction.
pub fn clear_screen(state: &ShellState, out: &mut dyn Write) -> std::io::Result<()> {
    if state.interactive {
        write!(out, "{}", CLEAR_SEQUENCE)
    } else {
        writeln!(out, "clear")
    }
}

#[derive(Clone)]
pub struct ClearCommand;

impl Command for ClearCommand {
    fn execute(
        &self,
        _args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        clear_screen(state, out)?;
        Ok(Outcome::Handled)
    }
}

#[derive(Clone)]
pub struct WhoamiCommand;

impl WhoamiCommand {
    fn passwd_name() -> Option<String> {
        // SAFETY: getpwuid returns null or a pointer to static storage that
        // stays valid until the next getpw* call on this thread.
        unsafe {
            let entry = libc::getpwuid(libc::geteuid());
            if entry.is_null() || (*entry).pw_name.is_null() {
                return None;
            }
            Some(CStr::from_ptr((*entry).pw_name).to_string_lossy().into_owned())
        }
    }
}

impl Command for WhoamiCommand {
    fn execute(
        &self,
        _args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let name = ["LOGNAME", "USER", "LNAME", "USERNAME"]
            .iter()
            .find_map(|var| state.env.get(var).filter(|v| !v.is_empty()).map(String::from))
            .or_else(Self::passwd_name)
            .ok_or_else(|| {
                CommandError::InvalidArguments("cannot determine the current user".to_string())
            })?;

        writeln!(out, "{}", name)?;
        Ok(Outcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing;

    #[test]
    fn test_clear_without_terminal_emits_marker_line() -> Result<(), CommandError> {
        let (mut state, _dir) = testing::state();
        let (result, output) = testing::run(&ClearCommand, &[], &mut state);
        result?;
        assert_eq!(output, "clear\n");

        state.interactive = true;
        let (result, output) = testing::run(&ClearCommand, &[], &mut state);
        result?;
        assert_eq!(output, CLEAR_SEQUENCE);
        Ok(())
    }

    #[test]
    fn test_whoami_prefers_overlay() -> Result<(), CommandError> {
        let (mut state, _dir) = testing::state();
        state
            .env
            .set("LOGNAME", "husk-user")
            .map_err(|e| CommandError::InvalidArguments(e.to_string()))?;
        let (result, output) = testing::run(&WhoamiCommand, &[], &mut state);
        result?;
        assert_eq!(output, "husk-user\n");
        Ok(())
    }
}
