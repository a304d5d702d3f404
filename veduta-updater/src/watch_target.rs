// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A [`RenderTarget`] backed by [`tokio::sync::watch`] channels.

use async_trait::async_trait;
use tokio::sync::watch;
use veduta_core::RenderTarget;

/// Publishes view state and loading transitions into watch channels.
///
/// This is the off-the-shelf target for consumers that want to observe a view
/// from async code instead of wiring up a UI framework. Each published
/// snapshot overwrites the previous one, so a slow reader always observes the
/// latest state rather than a backlog.
///
/// # Example
///
/// ```
/// use veduta_updater::WatchTarget;
///
/// let (target, mut state, mut loading) = WatchTarget::channel(0u64);
/// assert_eq!(*state.borrow(), 0);
/// assert!(!*loading.borrow());
/// # let _ = (target, &mut state, &mut loading);
/// ```
pub struct WatchTarget<S> {
    state_tx: watch::Sender<S>,
    loading_tx: watch::Sender<bool>,
}

impl<S: Send + Sync> WatchTarget<S> {
    /// Creates a target seeded with `initial`, plus the receiving ends.
    ///
    /// The state receiver starts at `initial` and the loading receiver at
    /// `false`. Both can be cloned and moved freely; the target keeps
    /// publishing even after every receiver is dropped.
    pub fn channel(initial: S) -> (Self, watch::Receiver<S>, watch::Receiver<bool>) {
        let (state_tx, state_rx) = watch::channel(initial);
        let (loading_tx, loading_rx) = watch::channel(false);
        let target = Self {
            state_tx,
            loading_tx,
        };
        (target, state_rx, loading_rx)
    }
}

#[async_trait]
impl<S: Clone + Send + Sync> RenderTarget<S> for WatchTarget<S> {
    async fn publish(&self, state: &S) {
        // send_replace never fails, even with all receivers gone.
        self.state_tx.send_replace(state.clone());
    }

    async fn set_loading(&self, loading: bool) {
        self.loading_tx.send_replace(loading);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_updates_state_channel() {
        let (target, state_rx, _loading_rx) = WatchTarget::channel(0u64);

        target.publish(&7).await;

        assert_eq!(*state_rx.borrow(), 7);
    }

    #[tokio::test]
    async fn test_set_loading_updates_loading_channel() {
        let (target, _state_rx, loading_rx) = WatchTarget::channel(0u64);

        target.set_loading(true).await;
        assert!(*loading_rx.borrow());

        target.set_loading(false).await;
        assert!(!*loading_rx.borrow());
    }

    #[tokio::test]
    async fn test_publish_survives_dropped_receivers() {
        let (target, state_rx, loading_rx) = WatchTarget::channel(0u64);
        drop(state_rx);
        drop(loading_rx);

        target.publish(&1).await;
        target.set_loading(true).await;
    }

    #[tokio::test]
    async fn test_receivers_observe_changes_as_notifications() {
        let (target, mut state_rx, _loading_rx) = WatchTarget::channel(0u64);

        target.publish(&42).await;

        state_rx.changed().await.unwrap();
        assert_eq!(*state_rx.borrow_and_update(), 42);
    }
}
