// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{sleep_until, Instant, Sleep};
use veduta_core::VedutaError;

/// A timer stream that yields one [`Instant`] per period.
///
/// The first tick arrives one full period after the stream is first polled.
/// When the consumer falls behind, missed ticks are skipped rather than
/// bunched: after each delivered tick the next deadline is one period from
/// *now*, not from the previous deadline.
///
/// # Example
///
/// ```rust
/// use futures::StreamExt;
/// use std::time::Duration;
/// use veduta_trigger::PeriodicTicks;
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut ticks = Box::pin(PeriodicTicks::new(Duration::from_millis(10))?.take_ticks(2));
///
/// assert!(ticks.next().await.is_some());
/// assert!(ticks.next().await.is_some());
/// assert!(ticks.next().await.is_none());
/// # Ok(())
/// # }
/// ```
#[pin_project]
#[derive(Debug)]
pub struct PeriodicTicks {
    #[pin]
    sleep: Sleep,
    period: Duration,
    primed: bool,
    remaining: Option<u64>,
    deadline: Option<Instant>,
    done: bool,
}

impl PeriodicTicks {
    /// Creates a tick stream with the given period.
    ///
    /// The stream is unbounded; combine with [`take_ticks`](Self::take_ticks)
    /// or [`expire_after`](Self::expire_after) to end it.
    ///
    /// # Errors
    ///
    /// Returns `VedutaError::Configuration` if `period` is zero.
    pub fn new(period: Duration) -> Result<Self, VedutaError> {
        if period.is_zero() {
            return Err(VedutaError::configuration(
                "periodic ticks require a non-zero period",
            ));
        }

        Ok(Self {
            sleep: sleep_until(Instant::now() + period),
            period,
            primed: false,
            remaining: None,
            deadline: None,
            done: false,
        })
    }

    /// Limits the stream to at most `count` ticks.
    #[must_use]
    pub fn take_ticks(mut self, count: u64) -> Self {
        self.remaining = Some(count);
        self
    }

    /// Ends the stream at the first tick at or after `duration` from now.
    ///
    /// Ticks strictly before the deadline are delivered as usual.
    #[must_use]
    pub fn expire_after(mut self, duration: Duration) -> Self {
        self.deadline = Some(Instant::now() + duration);
        self
    }
}

impl Stream for PeriodicTicks {
    type Item = Instant;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.done || matches!(*this.remaining, Some(0)) {
            *this.done = true;
            return Poll::Ready(None);
        }

        // The first period is anchored at the first poll, not at construction.
        if !*this.primed {
            *this.primed = true;
            this.sleep.as_mut().reset(Instant::now() + *this.period);
        }

        match this.sleep.as_mut().poll(cx) {
            Poll::Ready(()) => {
                let now = Instant::now();

                if let Some(deadline) = *this.deadline {
                    if now >= deadline {
                        *this.done = true;
                        return Poll::Ready(None);
                    }
                }

                if let Some(remaining) = this.remaining {
                    *remaining -= 1;
                }

                // Missed ticks are skipped: the next deadline is one period
                // from now, not from the previous deadline.
                this.sleep.as_mut().reset(now + *this.period);

                Poll::Ready(Some(now))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
