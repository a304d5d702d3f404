// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ready-made update tasks for driving a view under test.
//!
//! Every factory returns a closure usable directly as a `LiveView` update
//! task over a `u64` counter state. The trigger input is ignored so the same
//! task works with any schedule input type.

use crate::gate::Gate;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use veduta_core::CancellationToken;

/// Error injected by [`failing_task`] on its failing calls.
#[derive(Debug, thiserror::Error)]
#[error("Flaky task failure on call {call}")]
pub struct FlakyError {
    /// 1-based index of the call that failed
    pub call: usize,
}

/// An update task that increments the counter state on every call.
pub fn counting_task<I: Send + 'static>(
) -> impl Fn(u64, I, CancellationToken) -> BoxFuture<'static, Result<u64, FlakyError>>
       + Send
       + Sync
       + 'static {
    |count, _input, _cancel| async move { Ok(count + 1) }.boxed()
}

/// An update task that sleeps for `duration` before incrementing the counter.
pub fn slow_task<I: Send + 'static>(
    duration: Duration,
) -> impl Fn(u64, I, CancellationToken) -> BoxFuture<'static, Result<u64, FlakyError>>
       + Send
       + Sync
       + 'static {
    move |count, _input, _cancel| {
        async move {
            tokio::time::sleep(duration).await;
            Ok(count + 1)
        }
        .boxed()
    }
}

/// An update task that waits for the gate before incrementing the counter.
///
/// The gate keeps the task in flight for as long as the test needs, making
/// busy-window assertions deterministic.
pub fn gated_task<I: Send + 'static>(
    gate: &Gate,
) -> impl Fn(u64, I, CancellationToken) -> BoxFuture<'static, Result<u64, FlakyError>>
       + Send
       + Sync
       + 'static {
    let gate = gate.clone();
    move |count, _input, _cancel| {
        let gate = gate.clone();
        async move {
            gate.wait().await;
            Ok(count + 1)
        }
        .boxed()
    }
}

/// An update task that fails with [`FlakyError`] on the given calls.
///
/// Call indices are 1-based: `failing_task(&[2])` succeeds on the first
/// call, fails on the second and succeeds again from the third on.
pub fn failing_task<I: Send + 'static>(
    fail_on_calls: &[usize],
) -> impl Fn(u64, I, CancellationToken) -> BoxFuture<'static, Result<u64, FlakyError>>
       + Send
       + Sync
       + 'static {
    let fail_on: HashSet<usize> = fail_on_calls.iter().copied().collect();
    let calls = Arc::new(AtomicUsize::new(0));
    move |count, _input, _cancel| {
        let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
        let fails = fail_on.contains(&call);
        async move {
            if fails {
                Err(FlakyError { call })
            } else {
                Ok(count + 1)
            }
        }
        .boxed()
    }
}
