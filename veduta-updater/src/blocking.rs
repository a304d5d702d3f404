// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Adapter for synchronous update functions.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use thiserror::Error;
use veduta_core::CancellationToken;

/// Failure modes of update tasks built with [`blocking`].
#[derive(Debug, Error)]
pub enum BlockingTaskError {
    /// The wrapped closure returned an error.
    #[error("Blocking update task failed: {0}")]
    Task(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The blocking pool task was cancelled or panicked before producing a
    /// result.
    #[error("Blocking update task could not be joined")]
    Join(#[source] tokio::task::JoinError),
}

/// Adapts a synchronous update function into an update task.
///
/// The closure runs on tokio's blocking thread pool via
/// [`tokio::task::spawn_blocking`], so CPU-heavy or blocking-IO work does not
/// stall the runtime driving the view. Use this wherever the update logic is
/// a plain function of `(previous_state, input)`:
///
/// ```
/// use veduta_updater::blocking;
///
/// let task = blocking(|total: u64, delta: u64| {
///     Ok::<_, std::io::Error>(total + delta)
/// });
/// # let _ = task;
/// ```
///
/// A synchronous closure cannot observe the cancellation token, so a blocking
/// update always runs to completion once started; `stop()` on the owning view
/// discards pending inputs but never interrupts the running closure.
pub fn blocking<S, I, E, F>(
    f: F,
) -> impl Fn(S, I, CancellationToken) -> BoxFuture<'static, Result<S, BlockingTaskError>>
where
    S: Send + 'static,
    I: Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
    F: Fn(S, I) -> Result<S, E> + Send + Sync + 'static,
{
    let f = Arc::new(f);
    move |state, input, _token| {
        let f = Arc::clone(&f);
        async move {
            match tokio::task::spawn_blocking(move || f(state, input)).await {
                Ok(Ok(next)) => Ok(next),
                Ok(Err(error)) => Err(BlockingTaskError::Task(Box::new(error))),
                Err(join_error) => Err(BlockingTaskError::Join(join_error)),
            }
        }
        .boxed()
    }
}
