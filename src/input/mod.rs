pub mod history;

pub use history::{History, HistoryError, HISTORY_CAPACITY};
