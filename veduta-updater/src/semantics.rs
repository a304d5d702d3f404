// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Admission semantics for trigger inputs arriving while an update runs.

/// What happens to a trigger input that arrives while an update is running.
///
/// At most one update task runs at a time per view. The semantics decide the
/// fate of inputs that cannot start immediately:
///
/// - [`Drop`](Self::Drop): the input is discarded. Executions never pile up;
///   the next tick after the running one completes starts fresh.
/// - [`Coalesce`](Self::Coalesce): the input replaces a single pending slot.
///   The running update is followed by exactly one run carrying the most
///   recent input; intermediate inputs are discarded.
/// - [`Queue`](Self::Queue): the input joins a bounded FIFO drained strictly
///   in order by one worker. When full, the [`OverflowPolicy`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickSemantics {
    /// Discard inputs that arrive while busy.
    #[default]
    Drop,
    /// Keep only the most recent input that arrived while busy.
    Coalesce,
    /// Buffer inputs that arrive while busy, up to `capacity`.
    Queue {
        /// Maximum number of waiting inputs. Must be at least 1; a view
        /// started with a zero capacity fails with a configuration error.
        capacity: usize,
        /// What to do with an input arriving when the buffer is full.
        policy: OverflowPolicy,
    },
}

impl TickSemantics {
    /// Bounded FIFO admission with an explicit overflow policy.
    #[must_use]
    pub const fn queue(capacity: usize, policy: OverflowPolicy) -> Self {
        Self::Queue { capacity, policy }
    }
}

/// What a full queue does with the next incoming input.
///
/// There is no default policy; each view picks one explicitly. `DropOldest`
/// keeps the buffer fresh, `DropNewest` protects already accepted inputs and
/// `Reject` makes the overflow visible to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Evict the oldest waiting input to make room for the new one.
    DropOldest,
    /// Discard the incoming input; waiting inputs are untouched.
    DropNewest,
    /// Refuse the incoming input with a `QueueOverflow` error.
    Reject,
}
