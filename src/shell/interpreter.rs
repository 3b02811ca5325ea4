use std::io::{self, Write};

use super::parser::{self, Shape};
use crate::core::commands::{Builtins, CommandError, Outcome};
use crate::core::state::ShellState;
use crate::highlight::Palette;
use crate::input::HistoryError;
use crate::process::signal::INTERRUPT_NOTICE;
use crate::process::{Job, ProcessLauncher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interprets one line at a time against a single [`ShellState`].
pub struct Interpreter {
    state: ShellState,
    builtins: Builtins,
    palette: Palette,
}

impl Interpreter {
    pub fn new(state: ShellState, palette: Palette) -> Self {
        Self {
            state,
            builtins: Builtins::new(),
            palette,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Runs one input line. Every per-line failure is reported to `out`;
    /// only a failure to write that report is returned.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        self.state.history.add(line);

        let builtins = &self.builtins;
        let shape = match parser::parse_line(line, |name| builtins.is_builtin(name)) {
            Ok(Some(shape)) => shape,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                self.report(out, &e)?;
                return Ok(Flow::Continue);
            }
        };
        log::debug!("parsed {:?}", shape);

        match self.dispatch(shape, line, out) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                self.report(out, &e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch(&mut self, shape: Shape, line: &str, out: &mut dyn Write) -> Result<Flow, CommandError> {
        match shape {
            Shape::Builtin { name, args } => {
                match self.builtins.execute(&name, &args, &mut self.state, out)? {
                    Outcome::Terminate => return Ok(Flow::Exit),
                    Outcome::Handled => {}
                    Outcome::NotABuiltin => {
                        let mut words = vec![name];
                        words.extend(args);
                        ProcessLauncher::new(&self.state.env).run_simple(&words)?;
                    }
                }
            }
            Shape::Simple(words) => ProcessLauncher::new(&self.state.env).run_simple(&words)?,
            Shape::Pipeline(stages) => ProcessLauncher::new(&self.state.env).run_pipeline(&stages)?,
            Shape::Redirect {
                words,
                direction,
                path,
            } => ProcessLauncher::new(&self.state.env).run_redirect(&words, direction, &path)?,
            Shape::Backgrounded(inner) => self.spawn_background(*inner, line, out)?,
        }
        Ok(Flow::Continue)
    }

    fn spawn_background(&mut self, shape: Shape, line: &str, out: &mut dyn Write) -> Result<(), CommandError> {
        let child = match shape {
            Shape::Simple(ref words) => {
                ProcessLauncher::new(&self.state.env).spawn_background(words, None)?
            }
            Shape::Redirect {
                ref words,
                direction,
                ref path,
            } => ProcessLauncher::new(&self.state.env)
                .spawn_background(words, Some((direction, path.as_path())))?,
            other => {
                log::warn!("cannot background {:?}, running in foreground", other);
                self.dispatch(other, line, out)?;
                return Ok(());
            }
        };

        let command = line.trim_end_matches('&').trim_end();
        let pid = self.state.jobs.add(Job::new(command, child));
        writeln!(
            out,
            "Command '{}' is running in the background with PID {}.",
            command, pid
        )?;
        Ok(())
    }

    /// The interrupt arrived while idle at the prompt: remind, change nothing.
    pub fn on_interrupt(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.palette.notice(INTERRUPT_NOTICE))
    }

    /// Teardown shared by `exit` and end-of-input.
    pub fn shutdown(&self) -> Result<(), HistoryError> {
        self.state.history.flush()
    }

    fn report(&self, out: &mut dyn Write, err: &dyn std::fmt::Display) -> io::Result<()> {
        writeln!(out, "{}", self.palette.error(&err.to_string()))
    }
}
