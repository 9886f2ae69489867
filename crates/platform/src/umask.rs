//! crates/platform/src/umask.rs
//!
//! Scoped replacement of the process file-creation mask.
//!
//! The mask is process-wide state. Every guard holds a process-wide lock for
//! its whole lifetime so that two attribute applications never interleave
//! their save and restore. Guards must not be nested on one thread.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::ops::Platform;

static UMASK_LOCK: Mutex<()> = Mutex::new(());

/// Holds a replaced creation mask and restores the previous one on drop.
pub struct UmaskGuard<'a, P: Platform + ?Sized> {
    platform: &'a P,
    previous: u32,
    _lock: MutexGuard<'static, ()>,
}

impl<'a, P: Platform + ?Sized> UmaskGuard<'a, P> {
    /// Installs `mask` until the guard is dropped.
    pub fn set(platform: &'a P, mask: u32) -> Self {
        let lock = UMASK_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = platform.swap_umask(mask);
        Self {
            platform,
            previous,
            _lock: lock,
        }
    }

    /// Clears the mask until the guard is dropped.
    pub fn zeroed(platform: &'a P) -> Self {
        Self::set(platform, 0)
    }

    /// The mask that will be restored.
    #[must_use]
    pub const fn previous(&self) -> u32 {
        self.previous
    }
}

impl<P: Platform + ?Sized> Drop for UmaskGuard<'_, P> {
    fn drop(&mut self) {
        self.platform.swap_umask(self.previous);
    }
}
