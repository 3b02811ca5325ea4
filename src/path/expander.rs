use std::path::{Path, PathBuf};

/// Expands a leading `~` in path arguments given to built-ins.
#[derive(Clone)]
pub struct PathExpander;

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand(&self, path: &str) -> PathBuf {
        match (path.strip_prefix('~'), dirs::home_dir()) {
            (Some(""), Some(home)) => home,
            (Some(rest), Some(mut home)) if rest.starts_with('/') => {
                for part in rest.split('/').filter(|part| !part.is_empty()) {
                    home.push(part);
                }
                home
            }
            // "~user" forms and a missing home directory are left untouched
            _ => Path::new(path).to_path_buf(),
        }
    }
}
