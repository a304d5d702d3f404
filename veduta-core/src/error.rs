// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for Veduta live view updating.
//!
//! This module defines a root [`VedutaError`] type with specific variants for
//! the failure modes of an updater: configuration mistakes, failing update
//! tasks, trigger queue overflow, and use after stop. Configuration errors are
//! fatal and surfaced to the caller immediately; task failures are recovered
//! locally by the updater (the previous view state stays in place).
//!
//! # Examples
//!
//! ```
//! use veduta_core::{Result, VedutaError};
//!
//! fn bind_schedule(already_bound: bool) -> Result<()> {
//!     if already_bound {
//!         return Err(VedutaError::configuration("a schedule is already bound"));
//!     }
//!     Ok(())
//! }
//! ```

/// Root error type for all updater operations.
///
/// The variants split along the recovery boundary described in the crate
/// documentation: [`Configuration`](Self::Configuration) aborts the calling
/// operation, while the remaining variants describe conditions the updater
/// survives.
#[derive(Debug, thiserror::Error)]
pub enum VedutaError {
    /// The updater was set up or driven incorrectly.
    ///
    /// Raised for double-start, invalid schedule parameters, zero queue
    /// capacity and similar caller mistakes. Fatal: the operation that
    /// produced it did not take effect.
    #[error("Configuration error: {context}")]
    Configuration {
        /// Description of the configuration mistake
        context: String,
    },

    /// An update task returned an error or panicked.
    ///
    /// Recovered locally: the previous view state is retained, the loading
    /// indicator is cleared and the schedule keeps running.
    #[error("Update task failed: {0}")]
    TaskFailure(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A trigger was refused because the bounded queue was full.
    ///
    /// Only produced under queue semantics with the `Reject` overflow policy;
    /// the eviction policies handle overflow without raising an error.
    #[error("Trigger queue overflow: capacity {capacity} exhausted")]
    QueueOverflow {
        /// Configured capacity of the queue that refused the trigger
        capacity: usize,
    },

    /// The updater has been stopped and no longer accepts triggers.
    #[error("Updater is stopped")]
    Stopped,
}

impl VedutaError {
    /// Create a configuration error with the given context.
    pub fn configuration(context: impl Into<String>) -> Self {
        Self::Configuration {
            context: context.into(),
        }
    }

    /// Wrap an error produced by a user-supplied update task.
    pub fn task_failure(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::TaskFailure(Box::new(error))
    }

    /// Create a queue overflow error for a queue of the given capacity.
    #[must_use]
    pub const fn queue_overflow(capacity: usize) -> Self {
        Self::QueueOverflow { capacity }
    }

    /// Check if this error is fatal for the operation that produced it.
    ///
    /// Fatal errors indicate the updater was used incorrectly; they are
    /// returned to the caller instead of being routed through the error
    /// callback.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration { .. } | Self::Stopped)
    }

    /// Check if the updater recovers from this error on its own.
    ///
    /// Task failures leave the previous view state in place and the schedule
    /// keeps running; queue overflow only affects the refused trigger.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::TaskFailure(_) | Self::QueueOverflow { .. })
    }
}

/// Specialized Result type for updater operations.
///
/// # Examples
///
/// ```
/// use veduta_core::Result;
///
/// fn validate() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, VedutaError>;

/// Message-only stand-in for a boxed source that cannot be cloned.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct OpaqueError(String);

impl Clone for VedutaError {
    fn clone(&self) -> Self {
        match self {
            Self::Configuration { context } => Self::Configuration {
                context: context.clone(),
            },
            // The boxed source is not cloneable; keep its message so the
            // variant (and with it is_fatal/is_recoverable) is preserved
            Self::TaskFailure(e) => Self::TaskFailure(Box::new(OpaqueError(e.to_string()))),
            Self::QueueOverflow { capacity } => Self::QueueOverflow {
                capacity: *capacity,
            },
            Self::Stopped => Self::Stopped,
        }
    }
}
