//! Diagnostic logging to stderr. User-facing output never goes through here.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

use crate::error::ShellError;
use crate::flags::Flags;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(
                stderr,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

pub fn level_for(flags: &Flags) -> LevelFilter {
    if flags.is_set("quiet") {
        LevelFilter::Off
    } else if flags.is_set("debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

pub fn init(flags: &Flags) -> Result<(), ShellError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level_for(flags));
    Ok(())
}
