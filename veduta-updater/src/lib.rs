// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Busy-aware live view updating on top of `veduta-trigger` schedules.
//!
//! The central type is [`LiveView`]: it binds a schedule, runs one update
//! task per admitted trigger and publishes every successful result to a
//! [`RenderTarget`](veduta_core::RenderTarget). Triggers arriving while an
//! update is in flight are dropped, coalesced or queued according to the
//! configured [`TickSemantics`].
//!
//! [`WatchTarget`] is a ready-made render target over `tokio::sync::watch`
//! channels, and [`blocking()`] adapts synchronous update functions onto the
//! blocking thread pool.

#![allow(clippy::multiple_crate_versions)]
pub mod blocking;
pub mod live_view;
mod logging;
pub mod semantics;
pub mod watch_target;

pub use self::blocking::{blocking, BlockingTaskError};
pub use self::live_view::LiveView;
pub use self::semantics::{OverflowPolicy, TickSemantics};
pub use self::watch_target::WatchTarget;
