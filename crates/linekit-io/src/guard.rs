//! Scope guard for terminal raw mode.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use linekit_core::EditorError;

/// RAII guard that restores the previous terminal mode.
///
/// Restoration runs exactly once: on [`restore`](RawModeGuard::restore) or on
/// drop, including drops during a panic unwind.
pub struct RawModeGuard {
    restore_fn: Option<Box<dyn FnOnce() + Send>>,
    platform_info: String,
    is_active: Arc<AtomicBool>,
}

impl RawModeGuard {
    pub fn new<F>(restore_fn: F, platform_info: String) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            restore_fn: Some(Box::new(restore_fn)),
            platform_info,
            is_active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn platform_info(&self) -> &str {
        &self.platform_info
    }

    pub fn is_active(&self) -> bool {
        self.is_active.load(Ordering::Relaxed)
    }

    /// Restore the terminal now instead of at drop.
    pub fn restore(mut self) -> Result<(), EditorError> {
        self.run_restore()
            .then_some(())
            .ok_or_else(|| EditorError::terminal("Already restored"))
    }

    /// Shared flag that turns false once the terminal has been restored.
    pub fn weak_ref(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.is_active)
    }

    fn run_restore(&mut self) -> bool {
        match self.restore_fn.take() {
            Some(restore_fn) => {
                self.is_active.store(false, Ordering::Relaxed);
                restore_fn();
                log::debug!("terminal mode restored ({})", self.platform_info);
                true
            }
            None => false,
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.run_restore();
    }
}
