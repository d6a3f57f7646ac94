//! Blocking raw mutex for hosted targets
//!
//! `embassy-sync` ships raw mutexes for single-core and interrupt contexts.
//! On an OS with real threads the bus guard needs a lock that parks waiting
//! callers instead, so transfers from several threads queue up behind each
//! other for as long as it takes.

use std::sync::{Mutex, PoisonError};

use embassy_sync::blocking_mutex::raw::RawMutex;

/// Raw mutex backed by [`std::sync::Mutex`]
pub struct StdRawMutex {
    inner: Mutex<()>,
}

impl StdRawMutex {
    /// Create an unlocked mutex
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(()),
        }
    }
}

impl Default for StdRawMutex {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: `lock` runs the closure with the std mutex held, so at most one
// closure executes at a time for a given instance.
#[allow(unsafe_code)]
unsafe impl RawMutex for StdRawMutex {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
        // The lock guards no data of its own, so poisoning is ignored
        let _guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }
}
