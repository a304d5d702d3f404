// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Conversions from tokio channel receivers into [`Schedule`]s.

use futures::stream;
use veduta_trigger::Schedule;

/// Turns a value into an event-driven [`Schedule`].
///
/// Implemented for the tokio mpsc receivers, so a channel wired through an
/// application can drive a live view directly: every value sent on the
/// channel becomes one trigger carrying that value as the update input.
/// The schedule ends when every sender has been dropped.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use veduta_rx::{IntoSchedule, LiveView, WatchTarget};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
/// let (target, mut state, _loading) = WatchTarget::channel(0u64);
///
/// let view = LiveView::new(0u64, Arc::new(target), |total, delta: u64, _cancel| async move {
///     Ok::<_, std::io::Error>(total + delta)
/// });
/// view.start(rx.into_schedule()).unwrap();
///
/// tx.send(5).unwrap();
/// state.changed().await.unwrap();
/// assert_eq!(*state.borrow(), 5);
///
/// view.stop();
/// # }
/// ```
pub trait IntoSchedule<I> {
    /// Consumes the receiver and binds it as a trigger source.
    fn into_schedule(self) -> Schedule<I>;
}

impl<I: Send + 'static> IntoSchedule<I> for tokio::sync::mpsc::UnboundedReceiver<I> {
    fn into_schedule(mut self) -> Schedule<I> {
        Schedule::events(stream::poll_fn(move |cx| self.poll_recv(cx)))
    }
}

impl<I: Send + 'static> IntoSchedule<I> for tokio::sync::mpsc::Receiver<I> {
    /// Bounded receivers work the same way; backpressure stays on the
    /// sending side.
    fn into_schedule(mut self) -> Schedule<I> {
        Schedule::events(stream::poll_fn(move |cx| self.poll_recv(cx)))
    }
}
