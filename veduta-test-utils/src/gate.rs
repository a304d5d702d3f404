// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Open-once async gate for holding a task in flight deterministically.

use event_listener::Event;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct Inner {
    open: AtomicBool,
    opened: Event,
}

/// A gate that tasks can [`wait`](Self::wait) on until the test opens it.
///
/// The gate starts closed and opens exactly once; opening is idempotent.
/// Cloning shares the gate, so a test keeps one handle and moves another
/// into the task under test.
///
/// # Example
///
/// ```rust
/// use veduta_test_utils::Gate;
///
/// # #[tokio::main]
/// # async fn main() {
/// let gate = Gate::new();
/// let waiter = {
///     let gate = gate.clone();
///     tokio::spawn(async move { gate.wait().await })
/// };
///
/// assert!(!gate.is_open());
/// gate.open();
/// waiter.await.unwrap();
/// # }
/// ```
pub struct Gate {
    inner: Arc<Inner>,
}

impl Gate {
    /// Creates a closed gate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                open: AtomicBool::new(false),
                opened: Event::new(),
            }),
        }
    }

    /// Opens the gate, releasing every current and future waiter. Idempotent.
    pub fn open(&self) {
        self.inner.open.store(true, Ordering::Release);
        self.inner.opened.notify(usize::MAX);
    }

    /// Checks whether the gate has been opened.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.open.load(Ordering::Acquire)
    }

    /// Waits until the gate is open. Returns immediately if it already is.
    pub async fn wait(&self) {
        loop {
            if self.is_open() {
                return;
            }
            let listener = self.inner.opened.listen();
            // Re-check after registering: open() may have run between the
            // first check and listen()
            if self.is_open() {
                return;
            }
            listener.await;
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Gate {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
