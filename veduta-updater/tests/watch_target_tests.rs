// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use veduta_test_utils::{counting_task, failing_task, gated_task, Gate};
use veduta_trigger::Schedule;
use veduta_updater::{LiveView, OverflowPolicy, TickSemantics, WatchTarget};

#[tokio::test]
async fn test_state_and_loading_follow_one_update_cycle() -> anyhow::Result<()> {
    // Arrange
    let gate = Gate::new();
    let (target, mut state_rx, mut loading_rx) = WatchTarget::channel(0u64);
    let view = LiveView::new(0u64, Arc::new(target), gated_task::<u64>(&gate));
    view.start(Schedule::manual())?;
    assert_eq!(*state_rx.borrow(), 0);
    assert!(!*loading_rx.borrow());

    // Act - the update blocks on the gate, leaving the loading window open
    view.refresh(1)?;
    loading_rx.changed().await?;

    // Assert - loading is visible while the state is still the old one
    assert!(*loading_rx.borrow_and_update());
    assert_eq!(*state_rx.borrow(), 0);

    gate.open();
    state_rx.changed().await?;
    assert_eq!(*state_rx.borrow_and_update(), 1);
    loading_rx.changed().await?;
    assert!(!*loading_rx.borrow_and_update());
    view.stop();

    Ok(())
}

#[tokio::test]
async fn test_every_update_reaches_a_keeping_up_observer() -> anyhow::Result<()> {
    // Arrange
    let (target, mut state_rx, _loading_rx) = WatchTarget::channel(0u64);
    let view = LiveView::new(0u64, Arc::new(target), counting_task::<u64>());
    view.start(Schedule::manual())?;

    // Act / Assert - one update at a time, each lands in the channel
    for round in 1..=5u64 {
        view.refresh(round)?;
        view.idle().await;
        state_rx.changed().await?;
        assert_eq!(*state_rx.borrow_and_update(), round);
    }
    view.stop();

    Ok(())
}

#[tokio::test]
async fn test_slow_observers_skip_to_the_latest_state() -> anyhow::Result<()> {
    // Arrange
    let (target, mut state_rx, _loading_rx) = WatchTarget::channel(0u64);
    let view = LiveView::new(0u64, Arc::new(target), counting_task::<u64>())
        .with_semantics(TickSemantics::queue(8, OverflowPolicy::Reject));
    view.start(Schedule::manual())?;

    // Act - four updates run before the observer looks
    for input in 1..=4u64 {
        view.refresh(input)?;
    }
    view.idle().await;

    // Assert - the watch channel hands over only the newest value
    state_rx.changed().await?;
    assert_eq!(*state_rx.borrow_and_update(), 4);
    assert!(!state_rx.has_changed()?);
    view.stop();

    Ok(())
}

#[tokio::test]
async fn test_loading_ends_false_after_a_failed_update() -> anyhow::Result<()> {
    // Arrange
    let (target, state_rx, loading_rx) = WatchTarget::channel(0u64);
    let view = LiveView::new(0u64, Arc::new(target), failing_task::<u64>(&[1]));
    view.start(Schedule::manual())?;

    // Act
    view.refresh(1)?;
    view.idle().await;

    // Assert - no publish happened and the loading flag is back down
    assert!(!*loading_rx.borrow());
    assert_eq!(*state_rx.borrow(), 0);
    assert!(!state_rx.has_changed()?);
    assert_eq!(view.latest(), 0);
    view.stop();

    Ok(())
}
