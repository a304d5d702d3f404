// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A render target that records everything it receives.

use async_trait::async_trait;
use event_listener::Event;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use veduta_core::RenderTarget;

/// One observed render target call, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetEvent<S> {
    /// A state snapshot was published.
    Publish(S),
    /// The loading indicator was toggled.
    Loading(bool),
}

struct Inner<S> {
    events: Mutex<Vec<TargetEvent<S>>>,
    loading: AtomicBool,
    published: Event,
}

/// Records published states and loading transitions for assertions.
///
/// Clones share the same recording, so a test can keep one handle and move
/// another into the updater under test.
///
/// # Example
///
/// ```rust
/// use veduta_core::RenderTarget;
/// use veduta_test_utils::{RecordingTarget, TargetEvent};
///
/// # #[tokio::main]
/// # async fn main() {
/// let target = RecordingTarget::new();
///
/// target.set_loading(true).await;
/// target.publish(&42).await;
/// target.set_loading(false).await;
///
/// assert_eq!(target.published(), vec![42]);
/// assert_eq!(
///     target.events(),
///     vec![
///         TargetEvent::Loading(true),
///         TargetEvent::Publish(42),
///         TargetEvent::Loading(false),
///     ],
/// );
/// # }
/// ```
pub struct RecordingTarget<S> {
    inner: Arc<Inner<S>>,
}

impl<S: Clone + Send + Sync> RecordingTarget<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                events: Mutex::new(Vec::new()),
                loading: AtomicBool::new(false),
                published: Event::new(),
            }),
        }
    }

    /// Returns the published states, in publish order.
    #[must_use]
    pub fn published(&self) -> Vec<S> {
        self.inner
            .events
            .lock()
            .iter()
            .filter_map(|event| match event {
                TargetEvent::Publish(state) => Some(state.clone()),
                TargetEvent::Loading(_) => None,
            })
            .collect()
    }

    /// Returns the full interleaved event timeline.
    #[must_use]
    pub fn events(&self) -> Vec<TargetEvent<S>> {
        self.inner.events.lock().clone()
    }

    /// Returns how many states have been published so far.
    #[must_use]
    pub fn publish_count(&self) -> usize {
        self.inner
            .events
            .lock()
            .iter()
            .filter(|event| matches!(event, TargetEvent::Publish(_)))
            .count()
    }

    /// Returns the most recent loading transition.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::Acquire)
    }

    /// Waits until at least `count` states have been published.
    ///
    /// Returns immediately if the count was already reached.
    pub async fn wait_for_publishes(&self, count: usize) {
        loop {
            if self.publish_count() >= count {
                return;
            }
            let listener = self.inner.published.listen();
            // Re-check after registering: the publish may have landed between
            // the first check and listen()
            if self.publish_count() >= count {
                return;
            }
            listener.await;
        }
    }
}

impl<S: Clone + Send + Sync> Default for RecordingTarget<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for RecordingTarget<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl<S: Clone + Send + Sync> RenderTarget<S> for RecordingTarget<S> {
    async fn publish(&self, state: &S) {
        self.inner
            .events
            .lock()
            .push(TargetEvent::Publish(state.clone()));
        self.inner.published.notify(usize::MAX);
    }

    async fn set_loading(&self, loading: bool) {
        self.inner.loading.store(loading, Ordering::Release);
        self.inner.events.lock().push(TargetEvent::Loading(loading));
    }
}
