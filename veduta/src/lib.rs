// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Veduta
//!
//! A busy-aware live view updater: schedules fire triggers and an async
//! update task computes the state that render targets publish.
//!
//! ## Overview
//!
//! Veduta keeps one piece of view state up to date. A [`Schedule`] decides
//! when an update should run (periodic ticks, an event stream, a
//! [`TriggerSubject`] or manual refreshes); a [`LiveView`] runs the update
//! task with the previous state and publishes every successful result to a
//! [`RenderTarget`]. At most one update is ever in flight, and the configured
//! [`TickSemantics`] decide whether triggers arriving in the meantime are
//! dropped, coalesced or queued.
//!
//! ## Design Philosophy
//!
//! Veduta keeps the update pipeline and its observers separate:
//!
//! - **Production code**: construct a [`LiveView`], bind exactly one schedule,
//!   and let a [`RenderTarget`] (for example [`WatchTarget`]) feed the
//!   presentation layer
//! - **Test code**: use the recording target and task factories from
//!   `veduta-test-utils` to pin admission decisions and publish order
//!
//! The view owns the busy window and the admission decision; the host owns
//! the lifecycle: construct, `start`, and `stop` on shutdown.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use veduta_rx::{LiveView, Schedule, WatchTarget};
//!
//! #[tokio::main]
//! async fn main() -> veduta_rx::Result<()> {
//!     let (target, state, _loading) = WatchTarget::channel(0u64);
//!
//!     let view = LiveView::new(0u64, Arc::new(target), |total, delta: u64, _cancel| async move {
//!         Ok::<_, std::io::Error>(total + delta)
//!     });
//!
//!     view.start(Schedule::manual())?;
//!     view.refresh(5)?;
//!     view.idle().await;
//!
//!     assert_eq!(view.latest(), 5);
//!     assert_eq!(*state.borrow(), 5);
//!
//!     view.stop();
//!     Ok(())
//! }
//! ```

mod schedule_ext;

// Re-export core types
pub use veduta_core::{CancellationToken, RenderTarget, Result, VedutaError, VedutaTask};

// Re-export the trigger layer
pub use veduta_trigger::{
    PeriodicTicks, Schedule, ScheduleKind, SubjectError, TriggerStream, TriggerSubject,
};

// Re-export the updater layer
pub use veduta_updater::{
    blocking, BlockingTaskError, LiveView, OverflowPolicy, TickSemantics, WatchTarget,
};

pub use schedule_ext::IntoSchedule;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::schedule_ext::IntoSchedule;
    pub use veduta_core::{CancellationToken, RenderTarget, Result, VedutaError};
    pub use veduta_trigger::{Schedule, TriggerSubject};
    pub use veduta_updater::{LiveView, OverflowPolicy, TickSemantics, WatchTarget};
}
