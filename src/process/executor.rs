use std::fs::{File, OpenOptions};
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};

use super::ProcessError;
use crate::core::env::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Write,
    Append,
    Read,
}

impl Direction {
    pub fn open(self, path: &Path) -> std::io::Result<File> {
        match self {
            Direction::Write => OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path),
            Direction::Append => OpenOptions::new().append(true).create(true).open(path),
            Direction::Read => File::open(path),
        }
    }

    fn attach(self, command: &mut Command, path: &Path) -> Result<(), ProcessError> {
        let file = self.open(path).map_err(|source| ProcessError::Redirect {
            path: path.to_path_buf(),
            source,
        })?;
        match self {
            Direction::Read => command.stdin(file),
            Direction::Write | Direction::Append => command.stdout(file),
        };
        Ok(())
    }
}

/// Spawns external programs with the interpreter's environment overlay.
pub struct ProcessLauncher<'a> {
    env: &'a Environment,
}

impl<'a> ProcessLauncher<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Self { env }
    }

    /// Builds a command for `words`, failing before any spawn when the
    /// program cannot be found on the overlay's `PATH`.
    fn command(&self, words: &[String]) -> Result<Command, ProcessError> {
        let (program, args) = words
            .split_first()
            .ok_or_else(|| ProcessError::CommandNotFound(String::new()))?;
        let resolved = self
            .env
            .resolve(program)
            .ok_or_else(|| ProcessError::CommandNotFound(program.clone()))?;

        let mut command = Command::new(resolved);
        command
            .arg0(program)
            .args(args)
            .env_clear()
            .envs(self.env.iter());
        Ok(command)
    }

    pub fn run_simple(&self, words: &[String]) -> Result<(), ProcessError> {
        let command = self.command(words)?;
        foreground(command, &words[0])
    }

    pub fn run_redirect(
        &self,
        words: &[String],
        direction: Direction,
        path: &Path,
    ) -> Result<(), ProcessError> {
        let mut command = self.command(words)?;
        // the opened file lives inside `command` and is closed with it
        direction.attach(&mut command, path)?;
        foreground(command, &words[0])
    }

    pub fn run_pipeline(&self, stages: &[Vec<String>]) -> Result<(), ProcessError> {
        self.pipeline_into(stages, Stdio::inherit())
    }

    /// Runs `stages` connected by pipes, with the last stage writing to
    /// `stdout`. Only the last stage is waited on.
    pub fn pipeline_into(&self, stages: &[Vec<String>], stdout: Stdio) -> Result<(), ProcessError> {
        let commands = stages
            .iter()
            .map(|words| self.command(words))
            .collect::<Result<Vec<_>, _>>()?;
        let last = match commands.len().checked_sub(1) {
            Some(last) => last,
            None => return Ok(()),
        };

        let mut final_stdout = Some(stdout);
        let mut upstream: Option<ChildStdout> = None;
        let mut children: Vec<Child> = Vec::with_capacity(commands.len());

        for (index, mut command) in commands.into_iter().enumerate() {
            let name = &stages[index][0];
            if let Some(read_end) = upstream.take() {
                command.stdin(read_end);
            }
            if index == last {
                command.stdout(final_stdout.take().unwrap_or_else(Stdio::inherit));
            } else {
                command.stdout(Stdio::piped());
            }

            let spawned = spawn(&mut command, name);
            // drops our copy of the upstream read end
            drop(command);

            match spawned {
                Ok(mut child) => {
                    log::debug!("pipeline stage {} '{}' pid {}", index, name, child.id());
                    upstream = child.stdout.take();
                    children.push(child);
                }
                Err(e) => {
                    abandon(children);
                    return Err(e);
                }
            }
        }

        let result = match children.pop() {
            Some(tail) => wait_success(tail, &stages[last][0]).map(|_| ()),
            None => Ok(()),
        };
        release(children);
        result
    }

    /// Spawns `words` detached from the interpreter's wait, in its own
    /// process group and with no terminal input.
    pub fn spawn_background(
        &self,
        words: &[String],
        redirect: Option<(Direction, &Path)>,
    ) -> Result<Child, ProcessError> {
        let mut command = self.command(words)?;
        command.stdin(Stdio::null()).process_group(0);
        if let Some((direction, path)) = redirect {
            direction.attach(&mut command, path)?;
        }
        let child = spawn(&mut command, &words[0])?;
        log::debug!("background '{}' pid {}", words[0], child.id());
        Ok(child)
    }
}

fn spawn(command: &mut Command, name: &str) -> Result<Child, ProcessError> {
    command.spawn().map_err(|source| ProcessError::SpawnFailure {
        command: name.to_string(),
        source,
    })
}

fn foreground(mut command: Command, name: &str) -> Result<(), ProcessError> {
    let child = spawn(&mut command, name)?;
    drop(command);
    wait_success(child, name).map(|_| ())
}

fn wait_success(mut child: Child, name: &str) -> Result<ExitStatus, ProcessError> {
    let status = child.wait().map_err(ProcessError::Wait)?;
    log::debug!("'{}' pid {} exited with {}", name, child.id(), status);
    if status.success() {
        Ok(status)
    } else {
        Err(ProcessError::NonZeroExit {
            command: name.to_string(),
            status,
        })
    }
}

/// Reaps upstream stages without blocking the interpreter on them.
fn release(children: Vec<Child>) {
    for mut child in children {
        if let Ok(None) = child.try_wait() {
            std::thread::spawn(move || {
                let _ = child.wait();
            });
        }
    }
}

fn abandon(children: Vec<Child>) {
    for mut child in children {
        let _ = child.kill();
        let _ = child.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn words(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_two_stage_pipeline() -> Result<(), Box<dyn std::error::Error>> {
        let env = Environment::from_process();
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("out");

        let stages = vec![words("echo hello"), words("grep hell")];
        ProcessLauncher::new(&env).pipeline_into(&stages, File::create(&out)?.into())?;
        assert_eq!(fs::read_to_string(&out)?, "hello\n");
        Ok(())
    }

    #[test]
    fn test_three_stage_pipeline() -> Result<(), Box<dyn std::error::Error>> {
        let env = Environment::from_process();
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("out");

        let stages = vec![
            vec!["printf".to_string(), "b\\na\\nc\\n".to_string()],
            words("sort"),
            words("tr a-z A-Z"),
        ];
        ProcessLauncher::new(&env).pipeline_into(&stages, File::create(&out)?.into())?;
        assert_eq!(fs::read_to_string(&out)?, "A\nB\nC\n");
        Ok(())
    }

    #[test]
    fn test_pipeline_with_unknown_stage_spawns_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let env = Environment::from_process();
        let dir = tempfile::tempdir()?;
        let marker = dir.path().join("marker");

        let stages = vec![
            words(&format!("touch {}", marker.display())),
            words("no-such-program-husk"),
        ];
        let result = ProcessLauncher::new(&env).run_pipeline(&stages);
        assert!(matches!(result, Err(ProcessError::CommandNotFound(ref c)) if c == "no-such-program-husk"));
        assert!(!marker.exists());
        Ok(())
    }

    #[test]
    fn test_write_truncates_append_preserves() -> Result<(), Box<dyn std::error::Error>> {
        let env = Environment::from_process();
        let launcher = ProcessLauncher::new(&env);
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("log.txt");
        fs::write(&target, "stale contents\n")?;

        launcher.run_redirect(&words("echo first"), Direction::Write, &target)?;
        assert_eq!(fs::read_to_string(&target)?, "first\n");

        launcher.run_redirect(&words("echo second"), Direction::Append, &target)?;
        assert_eq!(fs::read_to_string(&target)?, "first\nsecond\n");
        Ok(())
    }

    #[test]
    fn test_read_redirect_feeds_stdin() -> Result<(), Box<dyn std::error::Error>> {
        let env = Environment::from_process();
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "piped through\n")?;

        let command = vec![
            "sh".to_string(),
            "-c".to_string(),
            format!("cat > {}", output.display()),
        ];
        ProcessLauncher::new(&env).run_redirect(&command, Direction::Read, &input)?;
        assert_eq!(fs::read_to_string(&output)?, "piped through\n");
        Ok(())
    }

    #[test]
    fn test_read_redirect_missing_file() -> Result<(), Box<dyn std::error::Error>> {
        let env = Environment::from_process();
        let dir = tempfile::tempdir()?;
        let result = ProcessLauncher::new(&env).run_redirect(
            &words("cat"),
            Direction::Read,
            &dir.path().join("missing"),
        );
        assert!(matches!(result, Err(ProcessError::Redirect { .. })));
        Ok(())
    }

    #[test]
    fn test_command_not_found_and_failure() {
        let env = Environment::from_process();
        let launcher = ProcessLauncher::new(&env);
        assert!(matches!(
            launcher.run_simple(&words("no-such-program-husk")),
            Err(ProcessError::CommandNotFound(_))
        ));
        assert!(matches!(
            launcher.run_simple(&words("false")),
            Err(ProcessError::NonZeroExit { .. })
        ));
        assert!(launcher.run_simple(&words("true")).is_ok());
    }

    #[test]
    fn test_child_sees_overlay_only() -> Result<(), Box<dyn std::error::Error>> {
        let mut env = Environment::from_process();
        env.set("HUSK_CHILD_VAR", "visible")?;
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("env.txt");

        ProcessLauncher::new(&env).run_redirect(&words("env"), Direction::Write, &out)?;
        assert!(fs::read_to_string(&out)?.contains("HUSK_CHILD_VAR=visible"));
        Ok(())
    }

    #[test]
    fn test_background_does_not_block() -> Result<(), Box<dyn std::error::Error>> {
        let env = Environment::from_process();
        let started = std::time::Instant::now();
        let mut child = ProcessLauncher::new(&env).spawn_background(&words("sleep 1"), None)?;
        assert!(started.elapsed() < std::time::Duration::from_millis(900));
        assert!(child.try_wait()?.is_none());
        assert!(child.wait()?.success());
        Ok(())
    }
}
