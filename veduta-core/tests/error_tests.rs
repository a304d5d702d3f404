// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io;
use veduta_core::VedutaError;

#[test]
fn test_configuration_display() {
    let err = VedutaError::configuration("a schedule is already bound");
    assert_eq!(
        err.to_string(),
        "Configuration error: a schedule is already bound"
    );
}

#[test]
fn test_configuration_constructor() {
    let err = VedutaError::configuration("bad period");
    assert!(matches!(err, VedutaError::Configuration { .. }));
}

#[test]
fn test_task_failure_display() {
    let err = VedutaError::task_failure(io::Error::other("sensor offline"));
    assert!(err.to_string().contains("Update task failed"));
    assert!(err.to_string().contains("sensor offline"));
}

#[test]
fn test_queue_overflow_display() {
    let err = VedutaError::queue_overflow(8);
    assert_eq!(err.to_string(), "Trigger queue overflow: capacity 8 exhausted");
}

#[test]
fn test_stopped_display() {
    assert_eq!(VedutaError::Stopped.to_string(), "Updater is stopped");
}

#[test]
fn test_is_fatal() {
    assert!(VedutaError::configuration("test").is_fatal());
    assert!(VedutaError::Stopped.is_fatal());
    assert!(!VedutaError::task_failure(io::Error::other("test")).is_fatal());
    assert!(!VedutaError::queue_overflow(4).is_fatal());
}

#[test]
fn test_is_recoverable() {
    assert!(VedutaError::task_failure(io::Error::other("test")).is_recoverable());
    assert!(VedutaError::queue_overflow(4).is_recoverable());
    assert!(!VedutaError::configuration("test").is_recoverable());
    assert!(!VedutaError::Stopped.is_recoverable());
}

#[test]
fn test_task_failure_preserves_source() {
    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct OuterError(#[source] InnerError);

    #[derive(Debug, thiserror::Error)]
    #[error("inner")]
    struct InnerError;

    let err = VedutaError::task_failure(OuterError(InnerError));

    let source = std::error::Error::source(&err).expect("task failure keeps its source");
    assert_eq!(source.to_string(), "outer");
}

#[test]
fn test_clone_configuration() {
    let err = VedutaError::configuration("double start");
    let cloned = err.clone();

    assert!(matches!(cloned, VedutaError::Configuration { .. }));
    assert_eq!(err.to_string(), cloned.to_string());
}

#[test]
fn test_clone_task_failure_keeps_variant_and_message() {
    let err = VedutaError::task_failure(io::Error::other("feed closed"));
    let cloned = err.clone();

    // The boxed source cannot be cloned; the variant and message survive
    assert!(matches!(cloned, VedutaError::TaskFailure(_)));
    assert!(cloned.is_recoverable());
    assert!(cloned.to_string().contains("feed closed"));
}

#[test]
fn test_clone_queue_overflow() {
    let err = VedutaError::queue_overflow(16);
    let cloned = err.clone();

    assert!(matches!(cloned, VedutaError::QueueOverflow { capacity: 16 }));
}

#[test]
fn test_clone_stopped() {
    let cloned = VedutaError::Stopped.clone();
    assert!(matches!(cloned, VedutaError::Stopped));
}

#[test]
fn test_debug_formatting() {
    let err = VedutaError::configuration("debug test");
    let debug_str = format!("{:?}", err);
    assert!(debug_str.contains("Configuration"));
}
