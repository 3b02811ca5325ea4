use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;
use std::io::Write;

/// Brings the most recent background job to the foreground and waits for it.
#[derive(Clone)]
pub struct FgCommand;

impl Command for FgCommand {
    fn execute(
        &self,
        _args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let Some(job) = state.jobs.take_latest() else {
            writeln!(out, "No background jobs to bring to the foreground.")?;
            return Ok(Outcome::Handled);
        };

        let pid = job.pid();
        writeln!(out, "Bringing background job with PID {} to the foreground.", pid)?;
        out.flush()?;

        match job.wait()? {
            Some(status) if !status.success() => {
                writeln!(out, "Job {} exited with {}.", pid, status)?;
            }
            _ => {}
        }
        Ok(Outcome::Handled)
    }
}

#[derive(Clone)]
pub struct JobsCommand;

impl Command for JobsCommand {
    fn execute(
        &self,
        _args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        if state.jobs.is_empty() {
            writeln!(out, "No background jobs.")?;
            return Ok(Outcome::Handled);
        }

        for (index, job) in state.jobs.iter_mut().enumerate() {
            let status = match job.poll() {
                None => "Running".to_string(),
                Some(status) => format!("Done ({})", status),
            };
            writeln!(
                out,
                "[{}] {} {:<12} {}",
                index + 1,
                job.pid(),
                status,
                job.command
            )?;
        }
        Ok(Outcome::Handled)
    }
}
