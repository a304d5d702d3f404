// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The seam between the updater and the presentation layer.
//!
//! An updater never assumes anything about how a [`RenderTarget`] is
//! implemented: it may paint a widget, send the snapshot over a channel, or
//! forward it to a remote sink. The contract is intentionally small (publish
//! a snapshot, toggle a loading indicator) so that any presentation layer can
//! sit behind it.

use async_trait::async_trait;

/// Sink for view state snapshots produced by an updater.
///
/// Implementations receive every successfully computed snapshot via
/// [`publish`](Self::publish) and loading transitions via
/// [`set_loading`](Self::set_loading). Both methods are async so that
/// implementations can marshal onto a rendering context or await a channel.
///
/// # Contract
///
/// The updater guarantees that calls arrive from a single in-flight update at
/// a time, in the order the producing updates started. Implementations must
/// not panic; a panicking target wedges the update pipeline that drives it.
///
/// `set_loading(true)` is always eventually followed by `set_loading(false)`,
/// on every exit path of the update, including task failure. A target can
/// therefore drive a spinner directly off this signal without any timeout
/// logic of its own.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use veduta_core::RenderTarget;
///
/// struct LogTarget;
///
/// #[async_trait]
/// impl RenderTarget<u64> for LogTarget {
///     async fn publish(&self, state: &u64) {
///         println!("rendered: {state}");
///     }
/// }
/// ```
#[async_trait]
pub trait RenderTarget<S>: Send + Sync {
    /// Render a new view state snapshot.
    async fn publish(&self, state: &S);

    /// Toggle the loading indicator.
    ///
    /// The default implementation ignores loading transitions, for targets
    /// that have no spinner to drive.
    async fn set_loading(&self, loading: bool) {
        let _ = loading;
    }
}
