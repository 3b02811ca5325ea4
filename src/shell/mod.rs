use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

mod interpreter;
pub mod parser;

pub use interpreter::{Flow, Interpreter};
pub use parser::{parse_line, ParseError, Shape};

use crate::{
    core::{env::Environment, state::ShellState},
    error::ShellError,
    flags::Flags,
    highlight::Palette,
    input::{History, HISTORY_CAPACITY},
    path::PathExpander,
    process::SignalBridge,
};

const HISTORY_FILE: &str = ".husk_history";

pub struct Shell {
    editor: DefaultEditor,
    interpreter: Interpreter,
    flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let config = Config::builder()
            .max_history_size(HISTORY_CAPACITY)?
            .auto_add_history(false)
            .build();
        let mut editor = DefaultEditor::with_config(config)?;

        let history = History::new(history_path(&flags)?, HISTORY_CAPACITY)?;
        for entry in history.iter() {
            editor.add_history_entry(entry.as_str())?;
        }

        let signals = SignalBridge::new();
        signals.install()?;

        let state = ShellState::new(
            Environment::from_process(),
            history,
            signals,
            io::stdout().is_terminal(),
        );

        Ok(Shell {
            editor,
            interpreter: Interpreter::new(state, Palette::detect()),
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        // stdout stays unlocked so the interrupt handler can print
        let mut out = io::stdout();
        if !self.flags.is_set("quiet") {
            writeln!(out, "{}", banner())?;
        }

        let editor = &mut self.editor;
        run_session(&mut self.interpreter, &mut out, |prompt| {
            let line = editor.readline(prompt)?;
            if !line.trim().is_empty() {
                if let Err(e) = editor.add_history_entry(line.trim()) {
                    log::warn!("couldn't add to line editor history: {}", e);
                }
            }
            Ok(line)
        })
    }
}

/// Feeds lines from `read_line` to the interpreter until `exit` or end of
/// input. Both endings flush history; so does a reader failure.
fn run_session<R>(
    interpreter: &mut Interpreter,
    out: &mut dyn Write,
    mut read_line: R,
) -> Result<(), ShellError>
where
    R: FnMut(&str) -> Result<String, ReadlineError>,
{
    loop {
        let prompt = format!("{} > ", current_dir_display());
        match read_line(&prompt) {
            Ok(line) => {
                let flow = interpreter.execute_line(&line, out)?;
                out.flush()?;
                if flow == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                interpreter.on_interrupt(out)?;
            }
            Err(ReadlineError::Eof) => {
                writeln!(out, "\nExiting shell.")?;
                break;
            }
            Err(e) => {
                interpreter.shutdown()?;
                return Err(e.into());
            }
        }
    }

    interpreter.shutdown()?;
    Ok(())
}

fn history_path(flags: &Flags) -> Result<PathBuf, ShellError> {
    if let Some(path) = flags.get_value("history") {
        return Ok(PathExpander::new().expand(path));
    }
    Ok(dirs::home_dir()
        .ok_or(ShellError::HomeDirNotFound)?
        .join(HISTORY_FILE))
}

fn current_dir_display() -> String {
    env::current_dir()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|_| "?".to_string())
}

fn banner() -> String {
    format!(
        "husk {}\nType 'help' to list built-in commands, 'exit' to leave.",
        env!("CARGO_PKG_VERSION")
    )
}
