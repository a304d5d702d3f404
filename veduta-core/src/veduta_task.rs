// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task spawning with cooperative cancellation.

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Task handle with automatic cancellation on drop.
///
/// `VedutaTask` spawns a background task on the Tokio runtime and hands it a
/// [`CancellationToken`] for cooperative shutdown. When the handle is dropped
/// or [`cancel`](Self::cancel)ed, the token is signaled; the task is expected
/// to observe it and exit at its next checkpoint. There is no preemption.
///
/// # Example
///
/// ```rust
/// use veduta_core::VedutaTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = VedutaTask::spawn(|cancel| async move {
///     loop {
///         if cancel.is_cancelled() {
///             break;
///         }
///         tokio::task::yield_now().await;
///     }
/// });
///
/// // Cancels automatically when the handle goes out of scope
/// drop(task);
/// # }
/// ```
#[derive(Debug)]
pub struct VedutaTask {
    cancel: CancellationToken,
}

impl VedutaTask {
    /// Spawn a background task with cancellation support.
    ///
    /// The closure receives a token that is triggered when the handle is
    /// dropped or cancelled. The spawned future should monitor it, either by
    /// polling [`CancellationToken::is_cancelled`] or by selecting on
    /// [`CancellationToken::cancelled`].
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        tokio::spawn(f(cancel.clone()));
        Self { cancel }
    }

    /// Signal the task to stop without waiting for it to complete.
    ///
    /// The task stops at its next cancellation checkpoint. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for VedutaTask {
    fn drop(&mut self) {
        // Signal cancellation to allow graceful shutdown
        self.cancel.cancel();
    }
}
