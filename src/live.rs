// ABOUTME: Live workout analysis loop capturing a frame on a fixed interval for form feedback
// ABOUTME: Single-slot in-flight guard skips ticks while a call is pending; stop never cancels it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Live Analysis
//!
//! Every `interval` the loop asks a [`FrameSource`] for a snapshot and, when
//! no call is pending, sends it to the workout feedback action. A tick that
//! finds a call still pending, or no frame, is skipped and counted; it is
//! never queued.
//!
//! [`LiveAnalysis::stop`] ends scheduling. A call already in flight runs to
//! completion and its result is still delivered on the event channel, which
//! closes once that call has reported.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fitness_ai_core::models::{WorkoutFeedbackInput, WorkoutFeedbackOutput};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::actions::Action;
use crate::config::ServerConfig;
use crate::errors::AppError;
use crate::flows::definitions::WorkoutFeedback;
use crate::session::SessionContext;

/// Source of camera snapshots, captured synchronously on each tick
pub trait FrameSource: Send + Sync {
    /// Current frame as an image data URI, or `None` when the camera has none
    fn capture(&self) -> Option<String>;
}

/// Settings for one live session
#[derive(Debug, Clone)]
pub struct LiveAnalysisConfig {
    /// Time between captures
    pub interval: Duration,
    /// Exercise being performed
    pub workout_type: String,
    /// Muscles the exercise targets
    pub target_muscle_groups: String,
}

impl LiveAnalysisConfig {
    /// Session for one exercise at the server's `LIVE_ANALYSIS_INTERVAL_SECS`
    #[must_use]
    pub fn from_config(
        config: &ServerConfig,
        workout_type: impl Into<String>,
        target_muscle_groups: impl Into<String>,
    ) -> Self {
        Self {
            interval: config.live_interval(),
            workout_type: workout_type.into(),
            target_muscle_groups: target_muscle_groups.into(),
        }
    }
}

/// Result of one capture, in completion order
#[derive(Debug)]
pub enum AnalysisEvent {
    /// Feedback for capture `sequence`
    Feedback {
        /// 1-based capture number
        sequence: u64,
        /// Flow output
        output: WorkoutFeedbackOutput,
    },
    /// Capture `sequence` failed
    Failed {
        /// 1-based capture number
        sequence: u64,
        /// Masked action error
        error: AppError,
    },
}

#[derive(Debug, Default)]
struct LiveStats {
    captures: AtomicU64,
    skipped: AtomicU64,
    in_flight: AtomicBool,
}

/// Handle to a running live analysis loop
#[derive(Debug)]
pub struct LiveAnalysis {
    stop_tx: watch::Sender<bool>,
    stats: Arc<LiveStats>,
    task: JoinHandle<()>,
}

impl LiveAnalysis {
    /// Start the loop; the first capture happens one `interval` after start
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(
        config: LiveAnalysisConfig,
        source: Arc<dyn FrameSource>,
        action: Action<WorkoutFeedback>,
        session: SessionContext,
    ) -> (Self, mpsc::UnboundedReceiver<AnalysisEvent>) {
        let (stop_tx, stop_rx) = watch::channel(false);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let stats = Arc::new(LiveStats::default());

        info!(
            interval_ms = u64::try_from(config.interval.as_millis()).unwrap_or(u64::MAX),
            workout_type = %config.workout_type,
            "Live analysis started"
        );

        let task = tokio::spawn(run_loop(
            config,
            source,
            action,
            session,
            Arc::clone(&stats),
            stop_rx,
            events_tx,
        ));

        (
            Self {
                stop_tx,
                stats,
                task,
            },
            events_rx,
        )
    }

    /// Stop scheduling captures; a pending call still completes and reports
    pub fn stop(&self) {
        // The loop may already have exited; nothing left to signal then
        let _ = self.stop_tx.send(true);
    }

    /// Wait for the scheduling loop to exit
    pub async fn stopped(self) {
        if let Err(e) = self.task.await {
            warn!(error = %e, "Live analysis loop ended abnormally");
        }
    }

    /// Captures sent to the action so far
    #[must_use]
    pub fn captures(&self) -> u64 {
        self.stats.captures.load(Ordering::SeqCst)
    }

    /// Ticks skipped because a call was pending or no frame was available
    #[must_use]
    pub fn skipped_ticks(&self) -> u64 {
        self.stats.skipped.load(Ordering::SeqCst)
    }

    /// Whether a call is pending right now
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.stats.in_flight.load(Ordering::SeqCst)
    }
}

async fn run_loop(
    config: LiveAnalysisConfig,
    source: Arc<dyn FrameSource>,
    action: Action<WorkoutFeedback>,
    session: SessionContext,
    stats: Arc<LiveStats>,
    mut stop_rx: watch::Receiver<bool>,
    events_tx: mpsc::UnboundedSender<AnalysisEvent>,
) {
    let mut ticker = time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // interval() fires immediately; the first capture waits one period
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
                continue;
            }
            _ = ticker.tick() => {}
        }

        if stats
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            stats.skipped.fetch_add(1, Ordering::SeqCst);
            debug!("Previous analysis still pending, skipping tick");
            continue;
        }

        let Some(frame) = source.capture() else {
            stats.in_flight.store(false, Ordering::SeqCst);
            stats.skipped.fetch_add(1, Ordering::SeqCst);
            debug!("No frame available, skipping tick");
            continue;
        };

        let sequence = stats.captures.fetch_add(1, Ordering::SeqCst) + 1;
        let input = WorkoutFeedbackInput {
            workout_type: config.workout_type.clone(),
            target_muscle_groups: config.target_muscle_groups.clone(),
            photo_data_uri: frame,
        };
        let action = action.clone();
        let session = session.clone();
        let stats = Arc::clone(&stats);
        let events_tx = events_tx.clone();

        tokio::spawn(async move {
            let event = match action.handle(&session, input).await {
                Ok(output) => AnalysisEvent::Feedback { sequence, output },
                Err(error) => AnalysisEvent::Failed { sequence, error },
            };
            stats.in_flight.store(false, Ordering::SeqCst);
            if events_tx.send(event).is_err() {
                debug!(sequence, "Live analysis receiver dropped, discarding result");
            }
        });
    }

    info!(
        captures = stats.captures.load(Ordering::SeqCst),
        skipped = stats.skipped.load(Ordering::SeqCst),
        "Live analysis stopped"
    );
}
