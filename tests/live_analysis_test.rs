// ABOUTME: Tests for the live workout analysis loop on a paused tokio clock
// ABOUTME: Verifies tick skipping while a call is pending and delivery after stop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{ScriptedProvider, PHOTO_DATA_URI};
use fitness_ai_server::actions::Action;
use fitness_ai_server::config::ServerConfig;
use fitness_ai_server::flows::definitions::WorkoutFeedback;
use fitness_ai_server::flows::UseCase;
use fitness_ai_server::live::{AnalysisEvent, FrameSource, LiveAnalysis, LiveAnalysisConfig};
use fitness_ai_server::session::SessionContext;
use serde_json::{json, Value};
use tokio::time::sleep;

struct Camera {
    frames: bool,
    captured: AtomicUsize,
}

impl Camera {
    fn new(frames: bool) -> Arc<Self> {
        Arc::new(Self {
            frames,
            captured: AtomicUsize::new(0),
        })
    }
}

impl FrameSource for Camera {
    fn capture(&self) -> Option<String> {
        self.captured.fetch_add(1, Ordering::SeqCst);
        self.frames.then(|| PHOTO_DATA_URI.to_owned())
    }
}

fn feedback() -> Value {
    json!({
        "formFeedback": "Knees track over toes.",
        "repFeedback": "Keep this depth.",
        "performanceScore": 90,
        "motivationalMessage": "Nice!"
    })
}

fn config() -> LiveAnalysisConfig {
    LiveAnalysisConfig::from_config(&ServerConfig::defaults(), "squats", "quads")
}

fn action(provider: &Arc<ScriptedProvider>) -> Action<WorkoutFeedback> {
    Action::from_registry(&common::prompt_registry(Arc::clone(provider)))
}

#[tokio::test(start_paused = true)]
async fn test_ticks_are_skipped_while_call_is_pending() {
    common::init_test_logging();
    // Each call takes 12s against a 5s interval
    let provider = ScriptedProvider::delayed(feedback(), Duration::from_secs(12));
    let (live, mut events) = LiveAnalysis::start(
        config(),
        Camera::new(true),
        action(&provider),
        SessionContext::authenticated("u-1", None),
    );

    // Call 1 starts at 5s; the ticks at 10s and 15s find it pending
    sleep(Duration::from_secs(16)).await;
    assert_eq!(live.captures(), 1);
    assert_eq!(live.skipped_ticks(), 2);
    assert!(live.is_in_flight());
    assert_eq!(provider.calls(), 1);

    // Call 1 finishes at 17s
    match events.recv().await.unwrap() {
        AnalysisEvent::Feedback { sequence, output } => {
            assert_eq!(sequence, 1);
            assert_eq!(output.form_feedback, "Knees track over toes.");
        }
        AnalysisEvent::Failed { error, .. } => panic!("unexpected failure: {error}"),
    }
    live.stop();
    live.stopped().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_keeps_in_flight_result() {
    common::init_test_logging();
    let provider = ScriptedProvider::delayed(feedback(), Duration::from_secs(3));
    let (live, mut events) = LiveAnalysis::start(
        config(),
        Camera::new(true),
        action(&provider),
        SessionContext::anonymous(),
    );

    // Call 1 starts at 5s and is still pending at 6s
    sleep(Duration::from_secs(6)).await;
    assert!(live.is_in_flight());
    live.stop();

    let event = events.recv().await.unwrap();
    assert!(matches!(event, AnalysisEvent::Feedback { sequence: 1, .. }));

    // No capture is scheduled after stop, so the channel closes
    assert!(events.recv().await.is_none());
    assert_eq!(provider.calls(), 1);
    assert_eq!(live.captures(), 1);
    live.stopped().await;
}

#[tokio::test(start_paused = true)]
async fn test_missing_frames_are_skipped() {
    common::init_test_logging();
    let provider = ScriptedProvider::returning(feedback());
    let camera = Camera::new(false);
    let (live, _events) = LiveAnalysis::start(
        config(),
        Arc::clone(&camera) as Arc<dyn FrameSource>,
        action(&provider),
        SessionContext::anonymous(),
    );

    sleep(Duration::from_secs(11)).await;
    assert_eq!(camera.captured.load(Ordering::SeqCst), 2);
    assert_eq!(live.captures(), 0);
    assert_eq!(live.skipped_ticks(), 2);
    assert_eq!(provider.calls(), 0);
    live.stop();
    live.stopped().await;
}

#[tokio::test(start_paused = true)]
async fn test_failures_are_delivered_as_events() {
    common::init_test_logging();
    let provider = ScriptedProvider::failing("vision model down");
    let (live, mut events) = LiveAnalysis::start(
        config(),
        Camera::new(true),
        action(&provider),
        SessionContext::anonymous(),
    );

    match events.recv().await.unwrap() {
        AnalysisEvent::Failed { sequence, error } => {
            assert_eq!(sequence, 1);
            assert_eq!(error.message, WorkoutFeedback::GENERIC_ERROR);
        }
        AnalysisEvent::Feedback { .. } => panic!("expected a failure"),
    }
    live.stop();
    live.stopped().await;
}

#[tokio::test(start_paused = true)]
async fn test_capture_interval_comes_from_server_config() {
    common::init_test_logging();
    let mut server = ServerConfig::defaults();
    server.live_interval_secs = 2;
    let config = LiveAnalysisConfig::from_config(&server, "lunges", "glutes");
    assert_eq!(config.interval, Duration::from_secs(2));

    let provider = ScriptedProvider::returning(feedback());
    let (live, _events) = LiveAnalysis::start(
        config,
        Camera::new(true),
        action(&provider),
        SessionContext::anonymous(),
    );

    // Captures at 2s, 4s and 6s
    sleep(Duration::from_secs(7)).await;
    assert_eq!(live.captures(), 3);
    assert_eq!(live.skipped_ticks(), 0);
    live.stop();
    live.stopped().await;
}
