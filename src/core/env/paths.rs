use std::env;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Executable search path taken from an environment's `PATH` value.
#[derive(Debug, Clone)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(path_var: &str) -> Self {
        Self {
            dirs: env::split_paths(path_var)
                .filter(|dir| !dir.as_os_str().is_empty())
                .collect(),
        }
    }

    pub fn resolve(&self, program: &str) -> Option<PathBuf> {
        if program.is_empty() {
            return None;
        }

        // Names with a slash are used as given, relative to the working directory
        if program.contains('/') {
            let candidate = PathBuf::from(program);
            return is_executable(&candidate).then_some(candidate);
        }

        self.dirs
            .iter()
            .map(|dir| dir.join(program))
            .find(|candidate| is_executable(candidate))
    }
}

fn is_executable(path: &Path) -> bool {
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn make_file(dir: &Path, name: &str, mode: u32) -> std::io::Result<PathBuf> {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n")?;
        fs::set_permissions(&path, fs::Permissions::from_mode(mode))?;
        Ok(path)
    }

    #[test]
    fn test_resolve_first_match_wins() -> std::io::Result<()> {
        let first = tempfile::tempdir()?;
        let second = tempfile::tempdir()?;
        make_file(second.path(), "tool", 0o755)?;
        let expected = make_file(first.path(), "tool", 0o755)?;

        let var = env::join_paths([first.path(), second.path()])
            .map_err(std::io::Error::other)?;
        let search = SearchPath::new(&var.to_string_lossy());
        assert_eq!(search.resolve("tool"), Some(expected));
        Ok(())
    }

    #[test]
    fn test_non_executable_skipped() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        make_file(dir.path(), "data", 0o644)?;
        let search = SearchPath::new(&dir.path().to_string_lossy());
        assert_eq!(search.resolve("data"), None);
        assert_eq!(search.resolve("absent"), None);
        Ok(())
    }

    #[test]
    fn test_explicit_path() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let tool = make_file(dir.path(), "tool", 0o700)?;
        let search = SearchPath::new("");
        let given = tool.to_string_lossy().to_string();
        assert_eq!(search.resolve(&given), Some(tool));
        Ok(())
    }
}
