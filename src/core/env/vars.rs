use super::{EnvError, SearchPath};
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// The interpreter's own copy of the environment. Children receive exactly
/// this map; the process environment is never written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    pub fn from_process() -> Self {
        Self::from_os_vars(env::vars_os())
    }

    /// Keeps only entries that are valid UTF-8 on both sides; children are
    /// never handed a lossily rewritten value.
    pub fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        vars.into_iter()
            .filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => Some((name, value)),
                (name, _) => {
                    log::debug!("skipping non-UTF-8 environment entry {:?}", name);
                    None
                }
            })
            .collect()
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() {
            return Err(EnvError::EmptyName);
        }
        self.vars.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Applies a `NAME=VALUE` assignment, splitting on the first `=`.
    pub fn assign<'a>(&mut self, assignment: &'a str) -> Result<(&'a str, &'a str), EnvError> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| EnvError::MissingAssignment(assignment.to_string()))?;
        self.set(name, value)?;
        Ok((name, value))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.vars.iter()
    }

    pub fn search_path(&self) -> SearchPath {
        SearchPath::new(self.get("PATH").unwrap_or_default())
    }

    /// Resolves a program name the way a child spawned with this
    /// environment would find it.
    pub fn resolve(&self, program: &str) -> Option<PathBuf> {
        self.search_path().resolve(program)
    }
}

impl FromIterator<(String, String)> for Environment {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Environment {
        [("HOME", "/home/test"), ("PATH", "/usr/bin:/bin")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_set_and_get() -> Result<(), EnvError> {
        let mut env = sample();
        env.set("TEST_VAR", "test value")?;
        assert_eq!(env.get("TEST_VAR"), Some("test value"));
        assert_eq!(env.get("MISSING"), None);
        Ok(())
    }

    #[test]
    fn test_assign_splits_on_first_equals() -> Result<(), EnvError> {
        let mut env = sample();
        let (name, value) = env.assign("URL=a=b")?;
        assert_eq!((name, value), ("URL", "a=b"));
        assert_eq!(env.get("URL"), Some("a=b"));
        Ok(())
    }

    #[test]
    fn test_assign_rejects_malformed() {
        let mut env = sample();
        assert!(matches!(
            env.assign("NOEQUALS"),
            Err(EnvError::MissingAssignment(_))
        ));
        assert!(matches!(env.assign("=value"), Err(EnvError::EmptyName)));
        assert_eq!(env, sample());
    }

    #[test]
    fn test_non_utf8_entries_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let env = Environment::from_os_vars([
            (OsString::from("GOOD"), OsString::from("ok")),
            (OsString::from("BAD_VALUE"), OsString::from_vec(vec![b'a', 0xff])),
            (OsString::from_vec(vec![0xfe]), OsString::from("x")),
        ]);
        assert_eq!(env.get("GOOD"), Some("ok"));
        assert_eq!(env.get("BAD_VALUE"), None);
        assert_eq!(env.iter().count(), 1);
    }

    #[test]
    fn test_process_environment_untouched() -> Result<(), EnvError> {
        let mut env = Environment::from_process();
        env.set("HUSK_OVERLAY_ONLY", "1")?;
        assert!(std::env::var("HUSK_OVERLAY_ONLY").is_err());
        Ok(())
    }
}
