// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Busy-aware live view updater.
//!
//! A [`LiveView`] keeps one piece of view state up to date by running an
//! update task whenever a trigger fires, and publishing each successful
//! result to a [`RenderTarget`]. At most one update runs at a time; what
//! happens to triggers that arrive while one is running is decided by the
//! configured [`TickSemantics`].
//!
//! ## Characteristics
//!
//! - **Non-overlapping**: a busy flag guarantees at most one in-flight update
//!   per view, no matter how fast triggers arrive.
//! - **Stale-state safe**: the update task receives the previous state by
//!   value and returns the next one; a failing task leaves the previous
//!   published state in place.
//! - **Panic-contained**: a panicking update task is reported like a failing
//!   one and the view keeps running.
//! - **Cooperative shutdown**: `stop()` lets the in-flight update complete
//!   and publish, then discards anything still pending.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use veduta_trigger::Schedule;
//! use veduta_updater::{LiveView, WatchTarget};
//!
//! # #[tokio::main]
//! # async fn main() -> veduta_core::Result<()> {
//! let (target, state, _loading) = WatchTarget::channel(0u64);
//!
//! let view = LiveView::new(0u64, Arc::new(target), |total, delta: u64, _cancel| async move {
//!     Ok::<_, std::io::Error>(total + delta)
//! });
//!
//! view.start(Schedule::manual())?;
//! view.refresh(5)?;
//! view.idle().await;
//!
//! assert_eq!(view.latest(), 5);
//! assert_eq!(*state.borrow(), 5);
//! view.stop();
//! # Ok(())
//! # }
//! ```

mod implementation;

use crate::semantics::TickSemantics;
use futures::{FutureExt, TryFutureExt};
use implementation::{admission_loop, AdmissionOutcome, Context, DynError, Pending, UpdateFn};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use veduta_core::{BusyState, CancellationToken, RenderTarget, Result, VedutaError, VedutaTask};
use veduta_trigger::Schedule;

/// Keeps a view state fresh by running an update task per trigger and
/// publishing the results.
///
/// `S` is the view state, `I` the trigger input carried by the bound
/// [`Schedule`]. The update task is a `Fn(S, I, CancellationToken)` returning
/// a future of the next state; it receives the previous state by value and
/// must not mutate anything outside its return value.
///
/// A view binds at most one schedule, ever: after [`stop`](Self::stop) the
/// instance cannot be restarted. Construct a new one instead.
///
/// See the [module documentation](self) for examples and more details.
pub struct LiveView<S, I>
where
    S: Clone + Send + Sync + 'static,
    I: Send + 'static,
{
    ctx: Arc<Context<S, I>>,
    admission_task: Mutex<Option<VedutaTask>>,
    started: AtomicBool,
}

impl<S, I> LiveView<S, I>
where
    S: Clone + Send + Sync + 'static,
    I: Send + 'static,
{
    /// Creates a view with the given initial state, render target and update
    /// task.
    ///
    /// The view starts with [`TickSemantics::Drop`] and no error callback;
    /// both can be changed with [`with_semantics`](Self::with_semantics) and
    /// [`on_error`](Self::on_error) before starting. The initial state is
    /// readable via [`latest`](Self::latest) right away but is not published.
    pub fn new<F, Fut, E>(initial: S, target: Arc<dyn RenderTarget<S>>, update: F) -> Self
    where
        F: Fn(S, I, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<S, E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let update: UpdateFn<S, I> = Arc::new(move |state, input, token| {
            update(state, input, token)
                .map_err(|error| Box::new(error) as DynError)
                .boxed()
        });

        Self {
            ctx: Arc::new(Context {
                admission: Mutex::new(Pending::from_semantics(TickSemantics::default())),
                busy: BusyState::new(),
                latest: Mutex::new(initial),
                update,
                target,
                stop: CancellationToken::new(),
                on_error: Mutex::new(None),
            }),
            admission_task: Mutex::new(None),
            started: AtomicBool::new(false),
        }
    }

    /// Replaces the admission semantics. Intended for the construction chain,
    /// before [`start`](Self::start); changes after start are ignored.
    #[must_use]
    pub fn with_semantics(self, semantics: TickSemantics) -> Self {
        if self.started.load(Ordering::Acquire) {
            crate::warn!("live view semantics cannot change after start; keeping the old ones");
            return self;
        }
        *self.ctx.admission.lock() = Pending::from_semantics(semantics);
        self
    }

    /// Installs a callback receiving every recoverable error: update task
    /// failures, panics and queue rejections of scheduled triggers.
    ///
    /// Without a callback those errors are logged instead.
    #[must_use]
    pub fn on_error<F>(self, callback: F) -> Self
    where
        F: Fn(VedutaError) + Send + Sync + 'static,
    {
        *self.ctx.on_error.lock() = Some(Arc::new(callback));
        self
    }

    /// Binds a schedule and begins admitting its triggers.
    ///
    /// Returns a configuration error if a schedule was already bound (a view
    /// binds one schedule, ever, including after `stop`), or if queue
    /// semantics were configured with a zero capacity. Returns
    /// [`VedutaError::Stopped`] if the view was stopped before ever starting.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self, schedule: Schedule<I>) -> Result<()> {
        if self.started.load(Ordering::Acquire) {
            return Err(VedutaError::configuration("a schedule is already bound"));
        }
        if self.ctx.stop.is_cancelled() {
            return Err(VedutaError::Stopped);
        }
        if let Pending::Queue { capacity: 0, .. } = &*self.ctx.admission.lock() {
            return Err(VedutaError::configuration(
                "queue capacity must be at least 1",
            ));
        }
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(VedutaError::configuration("a schedule is already bound"));
        }

        crate::info!("live view started with schedule {:?}", schedule.kind());

        let ctx = Arc::clone(&self.ctx);
        let triggers = schedule.into_stream();
        let task = VedutaTask::spawn(move |task_cancel| admission_loop(ctx, triggers, task_cancel));
        *self.admission_task.lock() = Some(task);
        Ok(())
    }

    /// Admits one out-of-band trigger input, as if the schedule had fired.
    ///
    /// The input goes through the same admission semantics as scheduled
    /// triggers. Returns [`VedutaError::QueueOverflow`] if queue semantics
    /// with the `Reject` policy refused it, [`VedutaError::Stopped`] after
    /// `stop`, and a configuration error before `start`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn refresh(&self, input: I) -> Result<()> {
        if self.ctx.stop.is_cancelled() {
            return Err(VedutaError::Stopped);
        }
        if !self.started.load(Ordering::Acquire) {
            return Err(VedutaError::configuration("the view has not been started"));
        }
        match Context::dispatch(&self.ctx, input) {
            AdmissionOutcome::Rejected { capacity } => Err(VedutaError::queue_overflow(capacity)),
            _ => Ok(()),
        }
    }

    /// Stops admitting triggers. Idempotent.
    ///
    /// The in-flight update, if any, completes and publishes; pending queue
    /// items and a pending coalesce slot are discarded. Hard cancellation
    /// stays cooperative through the token passed to the update task.
    pub fn stop(&self) {
        self.ctx.stop.cancel();
        if let Some(task) = self.admission_task.lock().take() {
            task.cancel();
        }
    }

    /// Returns a clone of the most recently computed state.
    ///
    /// This is the initial state until the first successful update.
    #[must_use]
    pub fn latest(&self) -> S {
        self.ctx.latest.lock().clone()
    }

    /// Checks whether an update is currently in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.ctx.busy.is_busy()
    }

    /// Checks whether the view has been stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.ctx.stop.is_cancelled()
    }

    /// Waits until no update is running and nothing is pending.
    ///
    /// Returns immediately if the view is idle.
    pub async fn idle(&self) {
        self.ctx.busy.wait_idle().await;
    }
}

impl<S, I> Drop for LiveView<S, I>
where
    S: Clone + Send + Sync + 'static,
    I: Send + 'static,
{
    fn drop(&mut self) {
        // Signal cancellation so the schedule loop and worker wind down
        self.ctx.stop.cancel();
    }
}
