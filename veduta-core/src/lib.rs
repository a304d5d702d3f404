// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core traits and types for the Veduta live view updater.
//!
//! This crate defines the vocabulary shared by the rest of the workspace:
//!
//! - [`VedutaError`] and [`Result`]: the error model for updater operations
//! - [`RenderTarget`]: the seam between the updater and the presentation layer
//! - [`BusyState`] / [`BusyGuard`]: the scoped in-flight flag that prevents
//!   overlapping updates
//! - [`VedutaTask`]: a background task handle with cooperative cancellation
//!   on drop
//!
//! Higher-level crates (`veduta-trigger`, `veduta-updater`) build the actual
//! control loop on top of these pieces.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod busy;
pub mod error;
pub mod render_target;
pub mod veduta_task;

pub use self::busy::{BusyGuard, BusyState};
pub use self::error::{Result, VedutaError};
pub use self::render_target::RenderTarget;
pub use self::veduta_task::VedutaTask;

// The single cancellation token type used across the workspace.
pub use tokio_util::sync::CancellationToken;
