mod file_ops;

use std::{collections::VecDeque, path::PathBuf};

use self::file_ops::FileOps;

pub const HISTORY_CAPACITY: usize = 100;

#[derive(Debug)]
pub enum HistoryError {
    Io(std::io::Error),
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::Io(e) => write!(f, "history file error: {}", e),
        }
    }
}

impl std::error::Error for HistoryError {}

impl From<std::io::Error> for HistoryError {
    fn from(err: std::io::Error) -> Self {
        HistoryError::Io(err)
    }
}

/// Bounded, insertion-ordered log of input lines. Oldest entries are evicted
/// first; the backing file is rewritten wholesale by [`History::flush`].
pub struct History {
    entries: VecDeque<String>,
    file_ops: FileOps,
    max_entries: usize,
}

impl History {
    pub fn new(history_file: PathBuf, max_entries: usize) -> Result<Self, HistoryError> {
        let file_ops = FileOps::new(history_file);
        let mut history = History {
            entries: VecDeque::with_capacity(max_entries),
            file_ops,
            max_entries,
        };

        for entry in history.file_ops.load_entries()? {
            history.push(entry);
        }
        log::debug!(
            "loaded {} history entries from {}",
            history.entries.len(),
            history.file_ops.path().display()
        );

        Ok(history)
    }

    /// Records a line. Blank lines are ignored and `false` is returned.
    pub fn add(&mut self, entry: &str) -> bool {
        if entry.trim().is_empty() {
            return false;
        }
        self.push(entry.to_owned());
        true
    }

    fn push(&mut self, entry: String) {
        self.entries.push_back(entry);
        self.trim_entries();
    }

    fn trim_entries(&mut self) {
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn flush(&self) -> Result<(), HistoryError> {
        self.file_ops.write_entries(self.entries.iter())?;
        log::debug!(
            "wrote {} history entries to {}",
            self.entries.len(),
            self.file_ops.path().display()
        );
        Ok(())
    }
}
