use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::process::ProcessError;

pub const INTERRUPT_NOTICE: &str = "Use 'exit' to quit the shell.";

/// Turns the interactive interrupt into either a notice (idle session) or a
/// cancellation flag observed by a cooperative loop such as `top`.
#[derive(Clone, Default)]
pub struct SignalBridge {
    interrupted: Arc<AtomicBool>,
    watching: Arc<AtomicBool>,
}

impl SignalBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the process-wide SIGINT handler. Callable once per process.
    pub fn install(&self) -> Result<(), ProcessError> {
        let bridge = self.clone();
        ctrlc::set_handler(move || bridge.raise())
            .map_err(|e| ProcessError::SignalError(e.to_string()))
    }

    pub fn raise(&self) {
        if self.watching.load(Ordering::SeqCst) {
            self.interrupted.store(true, Ordering::SeqCst);
        } else {
            println!("\n{}", INTERRUPT_NOTICE);
        }
    }

    /// Routes interrupts to the returned guard's owner until it is dropped.
    pub fn watch(&self) -> WatchGuard<'_> {
        self.interrupted.store(false, Ordering::SeqCst);
        self.watching.store(true, Ordering::SeqCst);
        WatchGuard { bridge: self }
    }

    pub fn is_watching(&self) -> bool {
        self.watching.load(Ordering::SeqCst)
    }
}

pub struct WatchGuard<'a> {
    bridge: &'a SignalBridge,
}

impl WatchGuard<'_> {
    /// Returns `true` once per received interrupt.
    pub fn take_interrupt(&self) -> bool {
        self.bridge.interrupted.swap(false, Ordering::SeqCst)
    }
}

impl Drop for WatchGuard<'_> {
    fn drop(&mut self) {
        self.bridge.watching.store(false, Ordering::SeqCst);
        self.bridge.interrupted.store(false, Ordering::SeqCst);
    }
}
