use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::{Command, CommandError, Outcome};
use crate::core::state::ShellState;

const INDENT: usize = 4;

#[derive(Clone)]
pub struct TreeCommand;

impl Command for TreeCommand {
    fn execute(
        &self,
        _args: &[String],
        _state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let cwd = env::current_dir()?;
        writeln!(out, "Directory Tree:")?;
        render(&cwd, 0, out).map_err(CommandError::fs("reading directory"))?;
        Ok(Outcome::Handled)
    }
}

/// Writes `dir` and everything below it. Entries are sorted by name;
/// symlinks are listed, never followed.
pub fn render(dir: &Path, indent: usize, out: &mut dyn Write) -> io::Result<()> {
    let name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    writeln!(out, "{:indent$}{}/", "", name, indent = indent)?;

    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let child_indent = indent + INDENT;
    for entry in entries {
        if entry.file_type()?.is_dir() {
            if let Err(e) = render(&entry.path(), child_indent, out) {
                if e.kind() != io::ErrorKind::PermissionDenied {
                    return Err(e);
                }
                writeln!(out, "{:child_indent$}  [{}]", "", e, child_indent = child_indent)?;
            }
        } else {
            writeln!(
                out,
                "{:child_indent$}{}",
                "",
                entry.file_name().to_string_lossy(),
                child_indent = child_indent
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sorted_and_indented() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path().join("root");
        fs::create_dir_all(root.join("b_dir").join("inner"))?;
        fs::write(root.join("c.txt"), "")?;
        fs::write(root.join("a.txt"), "")?;
        fs::write(root.join("b_dir").join("z.txt"), "")?;

        let mut out = Vec::new();
        render(&root, 0, &mut out)?;
        let expected = "\
root/
    a.txt
    b_dir/
        inner/
        z.txt
    c.txt
";
        assert_eq!(String::from_utf8_lossy(&out), expected);
        Ok(())
    }
}
