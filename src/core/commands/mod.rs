use std::collections::BTreeMap;
use std::io::Write;

mod cd;
mod echo;
mod exit;
mod fs;
mod help;
mod history;
mod jobs;
mod set;
mod terminal;
mod top;
mod tree;

pub use cd::CdCommand;
pub use echo::EchoCommand;
pub use exit::ExitCommand;
pub use fs::{CopyCommand, DelCommand, MkdirCommand, MoveCommand};
pub use help::HelpCommand;
pub use history::HistoryCommand;
pub use jobs::{FgCommand, JobsCommand};
pub use set::SetCommand;
pub use terminal::{ClearCommand, WhoamiCommand};
pub use top::TopCommand;
pub use tree::TreeCommand;

use crate::core::state::ShellState;
use crate::process::ProcessError;

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    NotFound(String),
    FileSystem {
        context: String,
        source: std::io::Error,
    },
    Process(ProcessError),
    Io(std::io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "Error: {}", msg),
            CommandError::NotFound(target) => write!(f, "Error: '{}' does not exist.", target),
            CommandError::FileSystem { context, source } => {
                write!(f, "Error {}: {}", context, source)
            }
            CommandError::Process(err) => write!(f, "{}", err),
            CommandError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::Io(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::Process(err)
    }
}

impl CommandError {
    pub(crate) fn fs(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> Self {
        let context = context.into();
        move |source| CommandError::FileSystem { context, source }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    NotABuiltin,
    Terminate,
}

pub trait Command {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError>;
}

/// The fixed name → handler table.
pub struct Builtins {
    commands: BTreeMap<&'static str, Box<dyn Command>>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let mut commands: BTreeMap<&'static str, Box<dyn Command>> = BTreeMap::new();

        commands.insert("cd", Box::new(CdCommand::new()));
        commands.insert("mkdir", Box::new(MkdirCommand::new()));
        commands.insert("copy", Box::new(CopyCommand::new()));
        commands.insert("move", Box::new(MoveCommand::new()));
        commands.insert("del", Box::new(DelCommand::new()));
        commands.insert("set", Box::new(SetCommand));
        commands.insert("echo", Box::new(EchoCommand));
        commands.insert("history", Box::new(HistoryCommand));
        commands.insert("tree", Box::new(TreeCommand));
        commands.insert("top", Box::new(TopCommand::new()));
        commands.insert("help", Box::new(HelpCommand));
        commands.insert("exit", Box::new(ExitCommand));
        commands.insert("fg", Box::new(FgCommand));
        commands.insert("jobs", Box::new(JobsCommand));
        commands.insert("clear", Box::new(ClearCommand));
        commands.insert("cls", Box::new(ClearCommand));
        commands.insert("whoami", Box::new(WhoamiCommand));

        Self { commands }
    }

    pub fn execute(
        &self,
        name: &str,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        match self.commands.get(name) {
            Some(cmd) => cmd.execute(args, state, out),
            None => Ok(Outcome::NotABuiltin),
        }
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}
