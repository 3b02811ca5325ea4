use std::process::{Child, ExitStatus};

use crate::process::ProcessError;

/// A backgrounded child, leader of its own process group.
pub struct Job {
    pub command: String,
    child: Child,
}

impl Job {
    pub fn new(command: impl Into<String>, child: Child) -> Self {
        Self {
            command: command.into(),
            child,
        }
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Non-blocking status check; `None` while the child still runs.
    pub fn poll(&mut self) -> Option<ExitStatus> {
        match self.child.try_wait() {
            Ok(status) => status,
            Err(e) => {
                log::warn!("cannot poll job {}: {}", self.child.id(), e);
                None
            }
        }
    }

    /// Blocks until the child exits. A child that was already reaped
    /// elsewhere yields `Ok(None)` instead of an error.
    pub fn wait(mut self) -> Result<Option<ExitStatus>, ProcessError> {
        match self.child.wait() {
            Ok(status) => Ok(Some(status)),
            Err(e) if e.raw_os_error() == Some(libc::ECHILD) => {
                log::debug!("job {} was already reaped", self.child.id());
                Ok(None)
            }
            Err(e) => Err(ProcessError::Wait(e)),
        }
    }
}

/// Outstanding background jobs, most recent last.
#[derive(Default)]
pub struct JobTable {
    jobs: Vec<Job>,
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, job: Job) -> u32 {
        let pid = job.pid();
        debug_assert!(!self.contains(pid), "pid {} recorded twice", pid);
        self.jobs.push(job);
        pid
    }

    /// Removes the most recently added job (LIFO).
    pub fn take_latest(&mut self) -> Option<Job> {
        self.jobs.pop()
    }

    pub fn contains(&self, pid: u32) -> bool {
        self.jobs.iter().any(|job| job.pid() == pid)
    }

    pub fn pids(&self) -> Vec<u32> {
        self.jobs.iter().map(Job::pid).collect()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Job> {
        self.jobs.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
