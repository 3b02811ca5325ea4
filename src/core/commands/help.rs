use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;
use std::io::Write;

const HELP_TEXT: &str = "\
Available commands:
  exit                - Exit the shell
  clear, cls          - Clear the screen
  whoami              - Display the current user
  cd [path]           - Change the current directory (no path: print it)
  mkdir <name>        - Create a new directory
  copy <src> <dst>    - Copy a file, e.g. copy example.txt ./test2/example.txt
  move <src> <dst>    - Move a file, e.g. move example.txt ../test2
  del <target>        - Delete a file, or a directory and its contents
  set VAR=VALUE       - Set an environment variable for launched commands
  echo $VAR           - Display an environment variable's value
  echo <words>        - Print words
  history             - Show command history
  tree                - Display the current directory as a tree
  top                 - Refresh a process view every 2 seconds until Ctrl-C
  jobs                - List background jobs
  fg                  - Wait for the most recent background job
  help                - Display this help message

Anything else runs as an external program, e.g. ps aux, ping, kill.
  cmd1 | cmd2         - Pipe output of cmd1 into cmd2
  cmd > file          - Write output to file (>> appends)
  cmd < file          - Read input from file
  cmd &               - Run in the background";

#[derive(Clone)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(
        &self,
        _args: &[String],
        _state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        writeln!(out, "{}", HELP_TEXT)?;
        Ok(Outcome::Handled)
    }
}
