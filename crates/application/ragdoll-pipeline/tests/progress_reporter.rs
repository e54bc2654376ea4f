mod support;

use ragdoll_core::{OpCode, ProgressSink, Stage};
use ragdoll_pipeline::{ProgressReporter, ReportMode};
use std::time::Duration;
use support::{event, RecordingDisplay};

fn throttled(display: &RecordingDisplay) -> ProgressReporter {
    // Long enough that no refresh tick elapses during a test.
    ProgressReporter::new(Box::new(display.clone()))
        .with_refresh_interval(Duration::from_secs(3600))
}

#[test]
fn bursts_are_throttled_but_first_and_last_always_render() {
    let display = RecordingDisplay::default();
    let mut reporter = throttled(&display);

    reporter.on_progress(event(OpCode::Receiving, Stage::Begin, 0, Some(100)));
    for i in 1..100 {
        reporter.on_progress(event(OpCode::Receiving, Stage::Progress, i, Some(100)));
    }
    reporter.on_progress(event(OpCode::Receiving, Stage::Progress, 100, Some(100)));

    assert_eq!(reporter.events_received(), 101);
    assert_eq!(reporter.renders(), 2);
    let rendered = display.rendered();
    assert_eq!(rendered[0].current, 0);
    assert_eq!(rendered[1].current, 100);

    reporter.finish();
    assert_eq!(reporter.renders(), 2);
    assert_eq!(display.finished(), 1);
}

#[test]
fn op_change_flushes_the_previous_op_first() {
    let display = RecordingDisplay::default();
    let mut reporter = throttled(&display);

    reporter.on_progress(event(OpCode::Receiving, Stage::Begin, 0, Some(10)));
    reporter.on_progress(event(OpCode::Receiving, Stage::Progress, 5, Some(10)));
    reporter.on_progress(event(OpCode::Resolving, Stage::Begin, 0, Some(3)));

    let seen: Vec<(OpCode, u64)> = display
        .rendered()
        .iter()
        .map(|e| (e.op, e.current))
        .collect();
    assert_eq!(
        seen,
        vec![
            (OpCode::Receiving, 0),
            (OpCode::Receiving, 5),
            (OpCode::Resolving, 0)
        ]
    );
}

#[test]
fn finish_flushes_the_newest_swallowed_event() {
    let display = RecordingDisplay::default();
    let mut reporter = throttled(&display);

    reporter.on_progress(event(OpCode::Enumerating, Stage::Begin, 10, None));
    reporter.on_progress(event(OpCode::Enumerating, Stage::Progress, 20, None));
    reporter.on_progress(event(OpCode::Enumerating, Stage::Progress, 30, None));
    assert_eq!(reporter.renders(), 1);

    reporter.finish();
    let rendered = display.rendered();
    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[1].current, 30);
}

#[test]
fn done_marker_renders_even_without_total() {
    let display = RecordingDisplay::default();
    let mut reporter = throttled(&display);

    reporter.on_progress(event(OpCode::Enumerating, Stage::Begin, 10, None));
    reporter.on_progress(event(OpCode::Enumerating, Stage::End, 42, None));

    assert_eq!(reporter.renders(), 2);
}

#[test]
fn silent_reporter_counts_but_never_renders() {
    let mut reporter = ProgressReporter::silent();
    assert_eq!(reporter.mode(), ReportMode::Silent);

    reporter.on_progress(event(OpCode::Receiving, Stage::Begin, 0, Some(2)));
    reporter.on_progress(event(OpCode::Receiving, Stage::End, 2, Some(2)));
    reporter.finish();

    assert_eq!(reporter.events_received(), 2);
    assert_eq!(reporter.renders(), 0);
}
