// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scoped in-flight flag preventing overlapping updates.
//!
//! [`BusyState`] is a cloneable boolean with guard-based acquisition:
//! [`try_acquire`](BusyState::try_acquire) flips the flag only if it was
//! clear, and the returned [`BusyGuard`] clears it again when dropped. Because
//! release is tied to drop, the flag cannot stay set past the end of an
//! update on any exit path, including early returns and panics.
//!
//! # Example
//!
//! ```
//! use veduta_core::BusyState;
//!
//! let busy = BusyState::new();
//!
//! let guard = busy.try_acquire().expect("initially idle");
//! assert!(busy.is_busy());
//! assert!(busy.try_acquire().is_none()); // second acquisition refused
//!
//! drop(guard);
//! assert!(!busy.is_busy());
//! ```

use event_listener::Event;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct Inner {
    busy: AtomicBool,
    released: Event,
}

/// Cloneable in-flight indicator shared between an updater and its observers.
///
/// All clones share the same flag. At most one [`BusyGuard`] exists at a
/// time; holding it means an update is executing.
#[derive(Clone, Debug)]
pub struct BusyState {
    inner: Arc<Inner>,
}

impl BusyState {
    /// Create a new, idle flag.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                busy: AtomicBool::new(false),
                released: Event::new(),
            }),
        }
    }

    /// Attempt to mark the flag busy.
    ///
    /// Returns a guard if the flag was idle; the flag stays busy until the
    /// guard is dropped. Returns `None` if an update is already in flight.
    #[must_use]
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.inner
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| BusyGuard {
                inner: self.inner.clone(),
            })
    }

    /// Check whether an update is currently in flight (non-blocking).
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.busy.load(Ordering::Acquire)
    }

    /// Wait asynchronously until the flag is idle.
    ///
    /// Returns immediately if no update is in flight.
    pub async fn wait_idle(&self) {
        loop {
            if !self.is_busy() {
                return;
            }
            let listener = self.inner.released.listen();
            // Re-check after registering: the guard may have dropped between
            // the first check and listen()
            if !self.is_busy() {
                return;
            }
            listener.await;
        }
    }
}

impl Default for BusyState {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard marking an update in flight; clears the flag on drop.
#[derive(Debug)]
pub struct BusyGuard {
    inner: Arc<Inner>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.inner.busy.store(false, Ordering::Release);
        self.inner.released.notify(usize::MAX);
    }
}
