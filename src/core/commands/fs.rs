use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;
use crate::path::PathExpander;

/// A destination that is an existing directory receives the source under
/// its own file name.
fn destination_for(source: &Path, destination: PathBuf) -> PathBuf {
    match source.file_name() {
        Some(name) if destination.is_dir() => destination.join(name),
        _ => destination,
    }
}

fn two_paths<'a>(args: &'a [String]) -> Result<(&'a str, &'a str), CommandError> {
    match args {
        [source, destination, ..] => Ok((source.as_str(), destination.as_str())),
        _ => Err(CommandError::InvalidArguments(
            "Please specify the source and destination.".to_string(),
        )),
    }
}

#[derive(Clone, Default)]
pub struct MkdirCommand {
    path_expander: PathExpander,
}

impl MkdirCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for MkdirCommand {
    fn execute(
        &self,
        args: &[String],
        _state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let name = args.first().ok_or_else(|| {
            CommandError::InvalidArguments("Please specify the folder name.".to_string())
        })?;
        let path = self.path_expander.expand(name);

        if path.exists() {
            return Err(CommandError::FileSystem {
                context: "creating directory".to_string(),
                source: io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("'{}' already exists", name),
                ),
            });
        }
        fs::create_dir_all(&path).map_err(CommandError::fs("creating directory"))?;

        writeln!(out, "Directory '{}' created successfully.", name)?;
        Ok(Outcome::Handled)
    }
}

#[derive(Clone, Default)]
pub struct CopyCommand {
    path_expander: PathExpander,
}

impl CopyCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for CopyCommand {
    fn execute(
        &self,
        args: &[String],
        _state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let (source, destination) = two_paths(args)?;
        let from = self.path_expander.expand(source);
        let to = destination_for(&from, self.path_expander.expand(destination));

        fs::copy(&from, &to).map_err(CommandError::fs("copying file"))?;

        writeln!(out, "Copied '{}' to '{}'.", source, destination)?;
        Ok(Outcome::Handled)
    }
}

#[derive(Clone, Default)]
pub struct MoveCommand {
    path_expander: PathExpander,
}

impl MoveCommand {
    pub fn new() -> Self {
        Self::default()
    }

    fn relocate(from: &Path, to: &Path) -> io::Result<()> {
        match fs::rename(from, to) {
            Err(e) if e.raw_os_error() == Some(libc::EXDEV) && from.is_file() => {
                log::debug!("cross-device move of {}, copying", from.display());
                fs::copy(from, to)?;
                fs::remove_file(from)
            }
            other => other,
        }
    }
}

impl Command for MoveCommand {
    fn execute(
        &self,
        args: &[String],
        _state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let (source, destination) = two_paths(args)?;
        let from = self.path_expander.expand(source);
        let to = destination_for(&from, self.path_expander.expand(destination));

        Self::relocate(&from, &to).map_err(CommandError::fs("moving file"))?;

        writeln!(out, "Moved '{}' to '{}'.", source, destination)?;
        Ok(Outcome::Handled)
    }
}

#[derive(Clone, Default)]
pub struct DelCommand {
    path_expander: PathExpander,
}

impl DelCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for DelCommand {
    fn execute(
        &self,
        args: &[String],
        _state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let target = args.first().ok_or_else(|| {
            CommandError::InvalidArguments(
                "Please specify the file or directory to delete.".to_string(),
            )
        })?;
        let path = self.path_expander.expand(target);

        if path.is_file() {
            fs::remove_file(&path).map_err(CommandError::fs("deleting file"))?;
            writeln!(out, "Deleted file '{}'.", target)?;
        } else if path.is_dir() {
            fs::remove_dir_all(&path).map_err(CommandError::fs("deleting directory"))?;
            writeln!(out, "Deleted directory '{}' and all its contents.", target)?;
        } else {
            return Err(CommandError::NotFound(target.clone()));
        }
        Ok(Outcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing;

    fn arg(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_mkdir_creates_intermediate_dirs() -> Result<(), CommandError> {
        let (mut state, dir) = testing::state();
        let nested = dir.path().join("a").join("b");

        let (result, output) = testing::run(&MkdirCommand::new(), &[&arg(&nested)], &mut state);
        result?;
        assert!(nested.is_dir());
        assert!(output.contains("created successfully"));

        let (again, _) = testing::run(&MkdirCommand::new(), &[&arg(&nested)], &mut state);
        assert!(matches!(again, Err(CommandError::FileSystem { .. })));
        Ok(())
    }

    #[test]
    fn test_mkdir_requires_name() {
        let (mut state, _dir) = testing::state();
        let (result, _) = testing::run(&MkdirCommand::new(), &[], &mut state);
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));
    }

    #[test]
    fn test_copy_into_directory() -> Result<(), CommandError> {
        let (mut state, dir) = testing::state();
        let source = dir.path().join("example.txt");
        let target_dir = dir.path().join("test2");
        fs::write(&source, "payload")?;
        fs::create_dir(&target_dir)?;

        let (result, _) = testing::run(
            &CopyCommand::new(),
            &[&arg(&source), &arg(&target_dir)],
            &mut state,
        );
        result?;
        assert_eq!(fs::read_to_string(target_dir.join("example.txt"))?, "payload");
        assert!(source.exists());
        Ok(())
    }

    #[test]
    fn test_copy_missing_source() {
        let (mut state, dir) = testing::state();
        let (result, _) = testing::run(
            &CopyCommand::new(),
            &[&arg(&dir.path().join("absent")), &arg(&dir.path().join("x"))],
            &mut state,
        );
        assert!(matches!(result, Err(CommandError::FileSystem { .. })));
    }

    #[test]
    fn test_move_renames() -> Result<(), CommandError> {
        let (mut state, dir) = testing::state();
        let source = dir.path().join("old.txt");
        let target = dir.path().join("new.txt");
        fs::write(&source, "moved")?;

        let (result, output) =
            testing::run(&MoveCommand::new(), &[&arg(&source), &arg(&target)], &mut state);
        result?;
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&target)?, "moved");
        assert!(output.starts_with("Moved"));
        Ok(())
    }

    #[test]
    fn test_move_requires_two_args() {
        let (mut state, _dir) = testing::state();
        let (result, _) = testing::run(&MoveCommand::new(), &["only-one"], &mut state);
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));
    }

    #[test]
    fn test_del_file_dir_and_missing() -> Result<(), CommandError> {
        let (mut state, dir) = testing::state();
        let file = dir.path().join("f.txt");
        let tree = dir.path().join("sub");
        fs::write(&file, "x")?;
        fs::create_dir_all(tree.join("deeper"))?;
        fs::write(tree.join("deeper").join("g.txt"), "y")?;

        let (result, output) = testing::run(&DelCommand::new(), &[&arg(&file)], &mut state);
        result?;
        assert!(!file.exists());
        assert!(output.starts_with("Deleted file"));

        let (result, output) = testing::run(&DelCommand::new(), &[&arg(&tree)], &mut state);
        result?;
        assert!(!tree.exists());
        assert!(output.contains("and all its contents"));

        let (result, _) = testing::run(&DelCommand::new(), &["nosuchfile"], &mut state);
        match result {
            Err(err) => assert!(err.to_string().contains("'nosuchfile' does not exist")),
            Ok(_) => panic!("deleting a missing path must fail"),
        }
        Ok(())
    }
}
