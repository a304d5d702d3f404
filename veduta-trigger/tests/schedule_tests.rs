// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::{stream, StreamExt};
use std::time::Duration;
use veduta_core::VedutaError;
use veduta_trigger::{Schedule, ScheduleKind, SubjectError, TriggerSubject};

#[test]
fn test_periodic_rejects_a_zero_period() {
    let err = Schedule::periodic(Duration::ZERO).unwrap_err();

    assert!(matches!(err, VedutaError::Configuration { .. }));
    assert!(err.to_string().contains("non-zero period"));
}

#[tokio::test]
async fn test_periodic_reports_its_kind() {
    let period = Duration::from_millis(100);
    let schedule = Schedule::periodic(period).unwrap();

    assert_eq!(schedule.kind(), ScheduleKind::Periodic(period));
}

#[tokio::test(start_paused = true)]
async fn test_periodic_schedule_yields_tick_instants() {
    let mut ticks = Schedule::periodic(Duration::from_millis(50))
        .unwrap()
        .into_stream();

    let first = ticks.next().await.expect("first tick");
    let second = ticks.next().await.expect("second tick");

    assert!(second >= first + Duration::from_millis(50));
}

#[tokio::test]
async fn test_events_schedule_passes_inputs_through() {
    let schedule = Schedule::events(stream::iter(vec![1, 2, 3]));
    assert_eq!(schedule.kind(), ScheduleKind::Events);

    let inputs: Vec<i32> = schedule.into_stream().collect().await;

    assert_eq!(inputs, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_subject_schedule_receives_fired_inputs() {
    let subject = TriggerSubject::<&'static str>::new();
    let mut inputs = Schedule::subject(&subject).unwrap().into_stream();

    subject.fire("refresh").unwrap();

    assert_eq!(inputs.next().await, Some("refresh"));
}

#[test]
fn test_subject_schedule_from_closed_subject_fails() {
    let subject = TriggerSubject::<i32>::new();
    subject.close();

    assert!(matches!(
        Schedule::subject(&subject),
        Err(SubjectError::Closed)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_manual_schedule_never_yields() {
    let schedule = Schedule::<i32>::manual();
    assert_eq!(schedule.kind(), ScheduleKind::Manual);

    let mut inputs = schedule.into_stream();

    let poll = tokio::time::timeout(Duration::from_millis(50), inputs.next()).await;
    assert!(poll.is_err());
}
