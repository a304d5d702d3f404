// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber broadcast point for trigger inputs.
//!
//! A [`TriggerSubject`] fans each fired input out to all active subscribers.
//!
//! ## Characteristics
//!
//! - **Hot**: Late subscribers do not receive past inputs, only inputs fired
//!   after subscribing.
//! - **Unbounded**: Uses unbounded channels internally (no backpressure).
//! - **Thread-safe**: Cheap to clone; all clones share the same internal state.
//!
//! ## Example
//!
//! ```
//! use futures::StreamExt;
//! use veduta_trigger::TriggerSubject;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = TriggerSubject::<i32>::new();
//!
//! // Subscribe before firing
//! let mut inputs = subject.subscribe().unwrap();
//!
//! subject.fire(1).unwrap();
//! subject.fire(2).unwrap();
//! subject.close();
//!
//! assert_eq!(inputs.next().await, Some(1));
//! assert_eq!(inputs.next().await, Some(2));
//! assert_eq!(inputs.next().await, None); // Subject closed
//! # }
//! ```

use crate::SubjectError;
use async_channel::{Receiver, Sender};
use futures::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

struct SubjectState<I> {
    closed: bool,
    senders: Vec<Sender<I>>,
}

/// Stream of inputs received by one [`TriggerSubject`] subscription.
pub struct TriggerStream<I> {
    receiver: Pin<Box<Receiver<I>>>,
}

impl<I> Stream for TriggerStream<I> {
    type Item = I;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.as_mut().poll_next(cx)
    }
}

/// A hot broadcast point that fans trigger inputs out to all current subscribers.
///
/// `TriggerSubject` is the entry point for pushing inputs into an event-driven
/// schedule by hand. Multiple subscribers each receive every input fired after
/// they subscribed.
///
/// See the [module documentation](self) for examples and more details.
pub struct TriggerSubject<I: Clone + Send + Sync + 'static> {
    state: Arc<Mutex<SubjectState<I>>>,
}

impl<I: Clone + Send + Sync + 'static> TriggerSubject<I> {
    /// Creates a new subject with no subscribers.
    ///
    /// The subject starts in an open state and can immediately accept
    /// subscriptions and inputs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                closed: false,
                senders: Vec::new(),
            })),
        }
    }

    /// Subscribe to this subject and receive a stream of fired inputs.
    /// Late subscribers do not receive previously fired inputs.
    pub fn subscribe(&self) -> Result<TriggerStream<I>, SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        let (tx, rx) = async_channel::unbounded();
        state.senders.push(tx);
        Ok(TriggerStream {
            receiver: Box::pin(rx),
        })
    }

    /// Fire an input to all active subscribers.
    ///
    /// Firing with no subscribers is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn fire(&self, input: I) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        let before = state.senders.len();
        let mut next_senders = Vec::with_capacity(before);

        for tx in state.senders.drain(..) {
            if tx.try_send(input.clone()).is_ok() {
                next_senders.push(tx);
            }
        }

        let pruned = before - next_senders.len();
        if pruned > 0 {
            crate::trace!("pruned {} dropped trigger subscriber(s)", pruned);
        }

        state.senders = next_senders;
        Ok(())
    }

    /// Closes the subject, completing all subscriber streams.
    ///
    /// After closing:
    /// - All existing subscribers will receive `None` once drained.
    /// - `fire()` will return `SubjectError::Closed`.
    /// - `subscribe()` will return `SubjectError::Closed`.
    ///
    /// Closing is idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if !state.closed {
            crate::trace!(
                "trigger subject closed; completing {} subscriber stream(s)",
                state.senders.len()
            );
        }
        state.closed = true;
        state.senders.clear();
    }

    /// Returns `true` if the subject has been closed.
    ///
    /// A closed subject cannot accept new inputs or subscribers.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Returns the number of currently active subscribers.
    ///
    /// The count is updated lazily: dropped subscribers are removed on the
    /// next `fire()` call, not immediately when dropped.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl<I: Clone + Send + Sync + 'static> Default for TriggerSubject<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Clone + Send + Sync + 'static> Clone for TriggerSubject<I> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}
