// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::semantics::{OverflowPolicy, TickSemantics};
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::{FutureExt, StreamExt};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use veduta_core::{BusyGuard, BusyState, CancellationToken, RenderTarget, VedutaError};

pub(crate) type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Type-erased update task stored by the view.
pub(crate) type UpdateFn<S, I> = Arc<
    dyn Fn(S, I, CancellationToken) -> BoxFuture<'static, std::result::Result<S, DynError>>
        + Send
        + Sync,
>;

pub(crate) type ErrorCallback = Arc<dyn Fn(VedutaError) + Send + Sync>;

/// Stand-in error carrying the panic message of a panicked update task.
#[derive(Debug, thiserror::Error)]
#[error("Update task panicked: {message}")]
pub(crate) struct TaskPanicked {
    message: String,
}

impl TaskPanicked {
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}

/// Storage for inputs that arrived while an update was in flight.
///
/// The variant mirrors the configured [`TickSemantics`]; only `Queue` ever
/// holds more than one input.
#[derive(Debug)]
pub(crate) enum Pending<I> {
    Drop,
    Coalesce(Option<I>),
    Queue {
        items: VecDeque<I>,
        capacity: usize,
        policy: OverflowPolicy,
    },
}

impl<I> Pending<I> {
    pub(crate) fn from_semantics(semantics: TickSemantics) -> Self {
        match semantics {
            TickSemantics::Drop => Self::Drop,
            TickSemantics::Coalesce => Self::Coalesce(None),
            TickSemantics::Queue { capacity, policy } => Self::Queue {
                items: VecDeque::new(),
                capacity,
                policy,
            },
        }
    }

    /// Takes the next input to run, in admission order.
    fn take_next(&mut self) -> Option<I> {
        match self {
            Self::Drop => None,
            Self::Coalesce(slot) => slot.take(),
            Self::Queue { items, .. } => items.pop_front(),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Drop => {}
            Self::Coalesce(slot) => *slot = None,
            Self::Queue { items, .. } => items.clear(),
        }
    }
}

/// What `admit` decided to do with one input.
pub(crate) enum Admission<I> {
    /// The view was idle; run the input now, holding the guard.
    Run(I, BusyGuard),
    /// The input was stored for later execution.
    Queued,
    /// The input replaced an older pending input (coalesce slot).
    Replaced,
    /// The input was discarded under drop semantics.
    DroppedBusy,
    /// The input was stored after evicting the oldest waiting input.
    EvictedOldest,
    /// The incoming input was discarded because the queue was full.
    DroppedNewest,
    /// The input was refused; the capacity is reported to the caller.
    Rejected(usize),
}

/// Payload-free admission result handed back to `refresh` and the schedule
/// loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AdmissionOutcome {
    Started,
    Queued,
    Replaced,
    DroppedBusy,
    EvictedOldest,
    DroppedNewest,
    Rejected { capacity: usize },
}

/// Shared state between the view handle, the schedule loop and the worker.
pub(crate) struct Context<S, I> {
    /// Pending-input storage; also the lock every busy transition runs under.
    pub(crate) admission: Mutex<Pending<I>>,
    pub(crate) busy: BusyState,
    pub(crate) latest: Mutex<S>,
    pub(crate) update: UpdateFn<S, I>,
    pub(crate) target: Arc<dyn RenderTarget<S>>,
    pub(crate) stop: CancellationToken,
    pub(crate) on_error: Mutex<Option<ErrorCallback>>,
}

impl<S, I> Context<S, I>
where
    S: Clone + Send + Sync + 'static,
    I: Send + 'static,
{
    /// Decides the fate of one input. Returns `Run` if the view was idle.
    pub(crate) fn admit(&self, input: I) -> Admission<I> {
        let mut pending = self.admission.lock();

        if let Some(guard) = self.busy.try_acquire() {
            return Admission::Run(input, guard);
        }

        match &mut *pending {
            Pending::Drop => Admission::DroppedBusy,
            Pending::Coalesce(slot) => {
                if slot.replace(input).is_some() {
                    Admission::Replaced
                } else {
                    Admission::Queued
                }
            }
            Pending::Queue {
                items,
                capacity,
                policy,
            } => {
                if items.len() < *capacity {
                    items.push_back(input);
                    Admission::Queued
                } else {
                    match policy {
                        OverflowPolicy::DropOldest => {
                            items.pop_front();
                            items.push_back(input);
                            Admission::EvictedOldest
                        }
                        OverflowPolicy::DropNewest => Admission::DroppedNewest,
                        OverflowPolicy::Reject => Admission::Rejected(*capacity),
                    }
                }
            }
        }
    }

    /// Called when one execution finishes. Returns the next pending input, or
    /// releases the guard if nothing is waiting.
    pub(crate) fn finish_and_next(&self, guard: BusyGuard) -> Option<(I, BusyGuard)> {
        let mut pending = self.admission.lock();
        match pending.take_next() {
            Some(input) => Some((input, guard)),
            None => {
                // Release while still holding the admission lock, so a
                // concurrent admit cannot enqueue behind a worker that is
                // about to exit.
                drop(guard);
                None
            }
        }
    }

    /// Drops everything still waiting and releases the guard. Used on stop.
    pub(crate) fn discard_pending(&self, guard: BusyGuard) {
        let mut pending = self.admission.lock();
        pending.clear();
        drop(guard);
    }

    /// Admits one input and spawns the worker when the view was idle.
    pub(crate) fn dispatch(ctx: &Arc<Self>, input: I) -> AdmissionOutcome {
        match ctx.admit(input) {
            Admission::Run(input, guard) => {
                tokio::spawn(run_admitted(Arc::clone(ctx), input, guard));
                AdmissionOutcome::Started
            }
            Admission::Queued => AdmissionOutcome::Queued,
            Admission::Replaced => {
                crate::trace!("live view busy; coalesced over a pending input");
                AdmissionOutcome::Replaced
            }
            Admission::DroppedBusy => {
                crate::trace!("live view busy; input dropped");
                AdmissionOutcome::DroppedBusy
            }
            Admission::EvictedOldest => {
                crate::warn!("live view queue full; evicted the oldest waiting input");
                AdmissionOutcome::EvictedOldest
            }
            Admission::DroppedNewest => {
                crate::warn!("live view queue full; dropped the incoming input");
                AdmissionOutcome::DroppedNewest
            }
            Admission::Rejected(capacity) => AdmissionOutcome::Rejected { capacity },
        }
    }

    /// Runs the update task once and publishes or reports the outcome.
    async fn execute(&self, input: I) {
        let previous = self.latest.lock().clone();
        self.target.set_loading(true).await;

        let update = Arc::clone(&self.update);
        let token = self.stop.clone();
        // The task is called inside the block so that a panicking closure is
        // caught the same way as a panicking future.
        let attempt = AssertUnwindSafe(async move { update(previous, input, token).await })
            .catch_unwind()
            .await;

        match attempt {
            Ok(Ok(next)) => {
                *self.latest.lock() = next.clone();
                self.target.publish(&next).await;
            }
            Ok(Err(error)) => {
                self.report(VedutaError::TaskFailure(error));
            }
            Err(panic) => {
                self.report(VedutaError::task_failure(TaskPanicked::from_panic(panic)));
            }
        }

        self.target.set_loading(false).await;
    }

    /// Routes a recoverable error to the callback, or logs it if none is set.
    pub(crate) fn report(&self, error: VedutaError) {
        let callback = self.on_error.lock().clone();
        if let Some(callback) = callback {
            callback(error);
        } else {
            crate::error!("Unhandled error in live view update: {}", error);
        }
    }
}

/// Worker task: runs the admitted input, then drains whatever admission
/// stored while it was busy. Exactly one worker exists per busy period.
pub(crate) async fn run_admitted<S, I>(ctx: Arc<Context<S, I>>, input: I, guard: BusyGuard)
where
    S: Clone + Send + Sync + 'static,
    I: Send + 'static,
{
    let mut next = Some((input, guard));
    while let Some((current, guard)) = next {
        if ctx.stop.is_cancelled() {
            ctx.discard_pending(guard);
            return;
        }

        ctx.execute(current).await;

        next = ctx.finish_and_next(guard);
        if next.is_some() {
            // Give admissions and observers a chance to run between drained
            // queue items.
            tokio::task::yield_now().await;
        }
    }
}

/// Schedule loop: admits every trigger until the stream ends or the view is
/// stopped.
pub(crate) async fn admission_loop<S, I>(
    ctx: Arc<Context<S, I>>,
    mut triggers: BoxStream<'static, I>,
    task_cancel: CancellationToken,
) where
    S: Clone + Send + Sync + 'static,
    I: Send + 'static,
{
    loop {
        tokio::select! {
            _ = task_cancel.cancelled() => break,
            _ = ctx.stop.cancelled() => break,
            input = triggers.next() => match input {
                Some(input) => {
                    if let AdmissionOutcome::Rejected { capacity } = Context::dispatch(&ctx, input)
                    {
                        ctx.report(VedutaError::queue_overflow(capacity));
                    }
                }
                None => break,
            },
        }
    }
}
