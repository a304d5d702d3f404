// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Schedules: trigger streams bound to a view updater.
//!
//! A [`Schedule`] pairs a boxed stream of trigger inputs with the
//! [`ScheduleKind`] it was built from. The updater consumes the stream; the
//! kind stays observable for diagnostics.

use crate::{PeriodicTicks, SubjectError, TriggerSubject};
use futures::stream::{self, BoxStream, StreamExt};
use futures::Stream;
use std::time::Duration;
use tokio::time::Instant;
use veduta_core::VedutaError;

/// The kind of source a [`Schedule`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    /// Fixed-period timer ticks.
    Periodic(Duration),
    /// An arbitrary event stream.
    Events,
    /// No automatic triggers; updates run only on explicit refresh.
    Manual,
}

/// A stream of trigger inputs driving a view updater.
///
/// Each yielded input requests one update run. How runs that arrive while a
/// previous run is still executing are admitted is the updater's concern, not
/// the schedule's.
///
/// # Example
///
/// ```rust
/// use futures::stream;
/// use veduta_trigger::{Schedule, ScheduleKind};
///
/// let schedule = Schedule::events(stream::iter(vec![1, 2, 3]));
/// assert_eq!(schedule.kind(), ScheduleKind::Events);
/// ```
pub struct Schedule<I> {
    stream: BoxStream<'static, I>,
    kind: ScheduleKind,
}

impl<I> std::fmt::Debug for Schedule<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schedule")
            .field("stream", &"<stream>")
            .field("kind", &self.kind)
            .finish()
    }
}

impl Schedule<Instant> {
    /// A schedule that ticks once per `period`, starting one period after the
    /// updater begins polling it. Each input is the tick's instant.
    ///
    /// Missed ticks are skipped, never bunched; see [`PeriodicTicks`].
    ///
    /// # Errors
    ///
    /// Returns `VedutaError::Configuration` if `period` is zero.
    pub fn periodic(period: Duration) -> Result<Self, VedutaError> {
        Ok(Self {
            stream: PeriodicTicks::new(period)?.boxed(),
            kind: ScheduleKind::Periodic(period),
        })
    }
}

impl<I: Send + 'static> Schedule<I> {
    /// A schedule driven by an arbitrary event stream.
    ///
    /// The stream's items become update inputs. When the stream ends, no
    /// further automatic updates run.
    pub fn events<St>(stream: St) -> Self
    where
        St: Stream<Item = I> + Send + 'static,
    {
        Self {
            stream: stream.boxed(),
            kind: ScheduleKind::Events,
        }
    }

    /// A schedule fed by subscribing to a [`TriggerSubject`].
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has already been closed.
    pub fn subject(subject: &TriggerSubject<I>) -> Result<Self, SubjectError>
    where
        I: Clone + Sync,
    {
        Ok(Self {
            stream: subject.subscribe()?.boxed(),
            kind: ScheduleKind::Events,
        })
    }

    /// A schedule that never triggers on its own.
    ///
    /// Updates run only through the updater's explicit refresh calls.
    #[must_use]
    pub fn manual() -> Self {
        Self {
            stream: stream::pending().boxed(),
            kind: ScheduleKind::Manual,
        }
    }

    /// The kind of source this schedule was built from.
    #[must_use]
    pub fn kind(&self) -> ScheduleKind {
        self.kind
    }

    /// Consumes the schedule, yielding its trigger stream.
    #[must_use]
    pub fn into_stream(self) -> BoxStream<'static, I> {
        self.stream
    }
}
