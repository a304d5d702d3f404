// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the Veduta live view updater.
//!
//! This crate provides helper types, fixtures and assertion helpers for
//! testing updaters, schedules and render targets. It is designed for use in
//! development and testing only, not for production code.
//!
//! # Key Types
//!
//! ## `RecordingTarget<S>`
//!
//! A render target that records the full interleaved timeline of publishes
//! and loading transitions:
//!
//! ```rust
//! use veduta_core::RenderTarget;
//! use veduta_test_utils::RecordingTarget;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let target = RecordingTarget::new();
//! target.publish(&1).await;
//! target.publish(&2).await;
//!
//! assert_eq!(target.published(), vec![1, 2]);
//! assert_eq!(target.publish_count(), 2);
//! # }
//! ```
//!
//! ## Task factories
//!
//! Ready-made update tasks over a `u64` counter state: [`counting_task`]
//! counts calls, [`slow_task`] adds a configurable delay, [`gated_task`]
//! parks on a [`Gate`] until the test releases it, and [`failing_task`]
//! injects [`FlakyError`] on chosen calls.
//!
//! ## Fixtures
//!
//! [`Quote`] (with `quote_acme()` / `quote_initech()` / `quote_hooli()`) and
//! [`Counter`] provide small `Clone + Eq` view states for assertions.
//!
//! # Module Organization
//!
//! - `recording_target` - the recording render target and its event type
//! - `gate` - open-once async gate for deterministic busy windows
//! - `tasks` - update task factories and `FlakyError`
//! - `quote`, `counter` - fixture view states
//! - `helpers` - stream assertion helpers

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod counter;
pub mod gate;
pub mod helpers;
pub mod quote;
pub mod recording_target;
pub mod tasks;

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

// Re-export commonly used test utilities
pub use counter::Counter;
pub use gate::Gate;
pub use helpers::{assert_no_recv, recv_timeout};
pub use quote::{quote_acme, quote_hooli, quote_initech, Quote};
pub use recording_target::{RecordingTarget, TargetEvent};
pub use tasks::{counting_task, failing_task, gated_task, slow_task, FlakyError};

/// Creates an unbounded channel whose receiving end is a plain `Stream`.
///
/// This helper simplifies test setup for event-driven schedules: tests send
/// trigger inputs imperatively while the schedule consumes the stream.
///
/// # Example
///
/// ```rust
/// use futures::StreamExt;
/// use veduta_test_utils::input_channel;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (tx, mut inputs) = input_channel();
///
/// tx.send(7u64).unwrap();
///
/// assert_eq!(inputs.next().await, Some(7));
/// # }
/// ```
pub fn input_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = T> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}
