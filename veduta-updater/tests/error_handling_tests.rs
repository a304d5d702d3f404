// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::unbounded_channel;
use veduta_core::VedutaError;
use veduta_test_utils::{
    failing_task, gated_task, input_channel, Gate, RecordingTarget, TargetEvent,
};
use veduta_trigger::Schedule;
use veduta_updater::{LiveView, OverflowPolicy, TickSemantics};

#[derive(Debug, thiserror::Error)]
#[error("Test error: {0}")]
struct TestError(String);

#[tokio::test]
async fn test_failed_update_keeps_the_previous_state() -> anyhow::Result<()> {
    // Arrange - the second call fails, the others succeed
    let target = RecordingTarget::<u64>::new();
    let view = LiveView::new(0u64, Arc::new(target.clone()), failing_task::<u64>(&[2]));
    view.start(Schedule::manual())?;

    // Act
    view.refresh(1)?;
    view.idle().await;
    assert_eq!(view.latest(), 1);

    view.refresh(2)?;
    view.idle().await;

    // Assert - the failure changed nothing and cleared the loading flag
    assert_eq!(view.latest(), 1);
    assert!(!target.is_loading());

    // The next trigger picks up from the last good state
    view.refresh(3)?;
    view.idle().await;
    assert_eq!(view.latest(), 2);
    assert_eq!(target.published(), vec![1, 2]);
    assert_eq!(
        target.events(),
        vec![
            TargetEvent::Loading(true),
            TargetEvent::Publish(1),
            TargetEvent::Loading(false),
            TargetEvent::Loading(true),
            TargetEvent::Loading(false),
            TargetEvent::Loading(true),
            TargetEvent::Publish(2),
            TargetEvent::Loading(false),
        ]
    );
    view.stop();

    Ok(())
}

#[tokio::test]
async fn test_error_callback_receives_task_failures() -> anyhow::Result<()> {
    // Arrange
    let errors = Arc::new(Mutex::new(Vec::new()));
    let target = RecordingTarget::<u64>::new();
    let view = LiveView::new(0u64, Arc::new(target.clone()), failing_task::<u64>(&[1]))
        .on_error({
            let errors = errors.clone();
            move |error| errors.lock().push(error)
        });
    view.start(Schedule::manual())?;

    // Act
    view.refresh(1)?;
    view.idle().await;

    // Assert
    let seen = errors.lock().clone();
    assert_eq!(seen.len(), 1);
    assert!(matches!(seen[0], VedutaError::TaskFailure(_)));
    assert_eq!(
        seen[0].to_string(),
        "Update task failed: Flaky task failure on call 1"
    );
    assert_eq!(target.publish_count(), 0);
    assert_eq!(view.latest(), 0);
    view.stop();

    Ok(())
}

#[tokio::test]
async fn test_panicking_update_is_contained() -> anyhow::Result<()> {
    // Arrange - the second call panics instead of failing
    let calls = Arc::new(AtomicUsize::new(0));
    let task = {
        let calls = calls.clone();
        move |count: u64, _input: u64, _cancel| {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if call == 2 {
                    panic!("boom in update");
                }
                Ok::<_, TestError>(count + 1)
            }
        }
    };
    let errors = Arc::new(Mutex::new(Vec::new()));
    let target = RecordingTarget::<u64>::new();
    let view = LiveView::new(0u64, Arc::new(target.clone()), task).on_error({
        let errors = errors.clone();
        move |error| errors.lock().push(error)
    });
    view.start(Schedule::manual())?;

    // Act
    view.refresh(1)?;
    view.idle().await;
    view.refresh(2)?;
    view.idle().await;
    view.refresh(3)?;
    view.idle().await;

    // Assert - the panic was reported like a failure and the view kept going
    assert_eq!(view.latest(), 2);
    assert_eq!(target.published(), vec![1, 2]);
    assert!(!target.is_loading());

    let seen = errors.lock().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].to_string(),
        "Update task failed: Update task panicked: boom in update"
    );
    view.stop();

    Ok(())
}

#[tokio::test]
async fn test_scheduled_rejections_reach_the_error_callback() -> anyhow::Result<()> {
    // Arrange - a gated counter that signals when each execution starts
    let gate = Gate::new();
    let (started_tx, mut started_rx) = unbounded_channel::<()>();
    let task = {
        let gate = gate.clone();
        move |count: u64, _input: u64, _cancel| {
            let gate = gate.clone();
            let started_tx = started_tx.clone();
            async move {
                let _ = started_tx.send(());
                gate.wait().await;
                Ok::<_, TestError>(count + 1)
            }
        }
    };

    let (error_tx, mut error_rx) = unbounded_channel::<VedutaError>();
    let (inputs_tx, input_stream) = input_channel::<u64>();
    let target = RecordingTarget::<u64>::new();
    let view = LiveView::new(0u64, Arc::new(target.clone()), task)
        .with_semantics(TickSemantics::queue(1, OverflowPolicy::Reject))
        .on_error(move |error| {
            let _ = error_tx.send(error);
        });
    view.start(Schedule::events(input_stream))?;

    // Act - 1 runs, 2 fills the queue, 3 overflows
    inputs_tx.send(1)?;
    started_rx.recv().await.expect("first update started");
    inputs_tx.send(2)?;
    inputs_tx.send(3)?;

    // Assert - the overflow went to the callback, not to any caller
    let overflow = error_rx.recv().await.expect("overflow reported");
    assert!(matches!(
        overflow,
        VedutaError::QueueOverflow { capacity: 1 }
    ));

    // The queued input was not lost along the way
    gate.open();
    target.wait_for_publishes(2).await;
    view.idle().await;
    assert_eq!(target.published(), vec![1, 2]);
    view.stop();

    Ok(())
}

#[tokio::test]
async fn test_refresh_rejections_skip_the_error_callback() -> anyhow::Result<()> {
    // Arrange
    let gate = Gate::new();
    let errors = Arc::new(Mutex::new(Vec::new()));
    let target = RecordingTarget::<u64>::new();
    let view = LiveView::new(0u64, Arc::new(target.clone()), gated_task::<u64>(&gate))
        .with_semantics(TickSemantics::queue(1, OverflowPolicy::Reject))
        .on_error({
            let errors = errors.clone();
            move |error| errors.lock().push(error)
        });
    view.start(Schedule::manual())?;

    // Act - 1 runs, 2 fills the queue, 3 overflows at the call site
    view.refresh(1)?;
    view.refresh(2)?;
    let overflow = view.refresh(3).expect_err("the queue is full");

    // Assert - the caller got the error directly, the callback stayed quiet
    assert!(matches!(
        overflow,
        VedutaError::QueueOverflow { capacity: 1 }
    ));
    assert!(errors.lock().is_empty());

    gate.open();
    view.idle().await;
    assert_eq!(target.published(), vec![1, 2]);
    view.stop();

    Ok(())
}

#[tokio::test]
async fn test_failures_do_not_break_a_scheduled_view() -> anyhow::Result<()> {
    // Arrange - the second of three scheduled updates fails
    let (inputs_tx, input_stream) = input_channel::<u64>();
    let target = RecordingTarget::<u64>::new();
    let view = LiveView::new(0u64, Arc::new(target.clone()), failing_task::<u64>(&[2]))
        .with_semantics(TickSemantics::queue(8, OverflowPolicy::Reject));
    view.start(Schedule::events(input_stream))?;

    // Act
    inputs_tx.send(10)?;
    inputs_tx.send(20)?;
    inputs_tx.send(30)?;
    target.wait_for_publishes(2).await;
    view.idle().await;

    // Assert - the schedule carried on past the failure
    assert_eq!(target.published(), vec![1, 2]);
    assert_eq!(view.latest(), 2);
    view.stop();

    Ok(())
}
