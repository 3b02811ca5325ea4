use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use super::terminal::clear_screen;
use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;
use crate::process::signal::WatchGuard;
use crate::process::{ProcessError, ProcessLauncher};

const REFRESH_INTERVAL: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Repeats a one-shot `top` until the interactive interrupt arrives. The
/// interrupt is checked between refreshes and while sleeping.
#[derive(Clone)]
pub struct TopCommand {
    interval: Duration,
}

impl Default for TopCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl TopCommand {
    pub fn new() -> Self {
        Self::with_interval(REFRESH_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }

    /// Runs `tick` until interrupted and returns how many ticks ran.
    pub fn refresh_loop<F>(
        &self,
        state: &mut ShellState,
        out: &mut dyn Write,
        mut tick: F,
    ) -> Result<usize, CommandError>
    where
        F: FnMut(&mut ShellState, &mut dyn Write) -> Result<(), CommandError>,
    {
        let signals = state.signals.clone();
        let guard = signals.watch();
        let mut ticks = 0;

        while !guard.take_interrupt() {
            tick(state, out)?;
            ticks += 1;
            if self.sleep_unless_interrupted(&guard) {
                break;
            }
        }
        Ok(ticks)
    }

    fn sleep_unless_interrupted(&self, guard: &WatchGuard<'_>) -> bool {
        let deadline = Instant::now() + self.interval;
        loop {
            if guard.take_interrupt() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}

fn snapshot(state: &mut ShellState, out: &mut dyn Write) -> Result<(), CommandError> {
    clear_screen(state, out)?;
    out.flush()?;

    let words = ["top", "-b", "-n", "1"].map(String::from);
    match ProcessLauncher::new(&state.env).run_simple(&words) {
        // top killed by the same Ctrl-C that ends the loop
        Err(ProcessError::NonZeroExit { status, .. }) => {
            log::debug!("top snapshot ended with {}", status);
            Ok(())
        }
        other => other.map_err(CommandError::from),
    }
}

impl Command for TopCommand {
    fn execute(
        &self,
        _args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        writeln!(
            out,
            "Displaying real-time system processes. Refreshing every {} seconds.",
            self.interval.as_secs()
        )?;
        self.refresh_loop(state, out, snapshot)?;
        writeln!(out, "Exiting 'top' command.")?;
        Ok(Outcome::Handled)
    }
}
