// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Trigger sources and schedules for veduta view updates.
//!
//! A view updater runs an update task whenever its schedule yields a trigger.
//! This crate provides the trigger side of that contract:
//!
//! - **[`Schedule<I>`]** - A boxed stream of trigger inputs plus the kind of
//!   source it was built from.
//! - **[`PeriodicTicks`]** - A timer stream that yields one tick per period and
//!   skips missed ticks instead of bunching them.
//! - **[`TriggerSubject<I>`]** - A hot, multi-subscriber broadcast point for
//!   pushing trigger inputs by hand.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use futures::StreamExt;
//! use veduta_trigger::Schedule;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ticks = Schedule::periodic(Duration::from_millis(100))?.into_stream();
//!
//! // The first tick arrives one full period after the stream is first polled.
//! let tick = ticks.next().await;
//! assert!(tick.is_some());
//! # Ok(())
//! # }
//! ```

mod logging;
mod periodic;
mod schedule;
mod subject;
mod subject_error;

pub use periodic::PeriodicTicks;
pub use schedule::{Schedule, ScheduleKind};
pub use subject::{TriggerStream, TriggerSubject};
pub use subject_error::SubjectError;
