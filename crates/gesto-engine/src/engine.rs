//! The tick scheduler.
//!
//! [`GestureEngine`] owns every per-frame state machine and is driven by the
//! host calling [`GestureEngine::tick`] once per display frame. A tick pulls
//! one frame from the video source, runs the hand provider (and the face
//! provider when an engagement sample is due), and feeds the results through
//! the components in a fixed order:
//!
//! 1. pointer tracker and pinch-click synthesizer
//! 2. gesture intent state machine
//! 3. scroll extractor
//! 4. engagement classifier
//!
//! There is no internal threading. Work inside a tick must stay well within
//! the host's frame budget; a slow provider call simply delays the next tick.
//! Errors never escape a tick: they are logged, counted, and the next tick
//! starts from a clean slate.

use std::time::Instant;

use gesto_models::{
    EngagementEntry, EngineEvent, EngineStatus, FaceObservation, GestureLabel, HandLandmark,
    HandObservation,
};
use tracing::{debug, error, info, info_span, warn, Span};
use uuid::Uuid;

use crate::clock::{Clock, MonotonicTimestamp, SystemClock};
use crate::config::EngineConfig;
use crate::engagement::{EngagementClassifier, EngagementLog, EngagementThresholds};
use crate::error::{EngineError, EngineResult};
use crate::intent::{GestureIntentMachine, Trigger};
use crate::metrics;
use crate::pinch::PinchClickSynthesizer;
use crate::pointer::{CursorState, PointerTracker};
use crate::provider::{BoxedSource, Providers};
use crate::scroll::ScrollExtractor;
use crate::sink::EventSink;
use crate::snapshot::{EngineSnapshot, SnapshotPublisher, SnapshotReader};

/// Why a tick did no work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The engine was closed.
    Closed,
    /// Models are not loaded, or failed to load.
    NotReady,
    /// No video source is attached.
    NoSource,
    /// The source has no decodable frame yet.
    FrameUnavailable,
}

/// What happened during one processed tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Timestamp handed to the providers.
    pub timestamp_ms: u64,
    pub hand_present: bool,
    pub click: bool,
    pub trigger: Option<Trigger>,
    pub scroll_delta: Option<f32>,
    /// The face provider ran on this tick.
    pub engagement_sampled: bool,
    pub engagement_change: Option<EngagementEntry>,
}

/// Outcome of [`GestureEngine::tick`].
#[derive(Debug)]
pub enum TickOutcome {
    Processed(TickReport),
    Skipped(SkipReason),
    /// The tick was aborted; the engine keeps running.
    Failed(EngineError),
}

impl TickOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickOutcome::Processed(_) => "processed",
            TickOutcome::Skipped(_) => "skipped",
            TickOutcome::Failed(_) => "failed",
        }
    }

    pub fn is_processed(&self) -> bool {
        matches!(self, TickOutcome::Processed(_))
    }

    pub fn report(&self) -> Option<&TickReport> {
        match self {
            TickOutcome::Processed(report) => Some(report),
            _ => None,
        }
    }
}

/// Gesture intent and engagement inference engine over frames of type `F`.
pub struct GestureEngine<F> {
    config: EngineConfig,
    session_id: String,
    span: Span,
    clock: Box<dyn Clock>,
    timestamps: MonotonicTimestamp,
    status: EngineStatus,
    closed: bool,

    providers: Option<Providers<F>>,
    source: Option<BoxedSource<F>>,
    sink: Box<dyn EventSink>,
    snapshot: SnapshotPublisher,

    pointer: PointerTracker,
    pinch: PinchClickSynthesizer,
    intent: GestureIntentMachine,
    scroll: ScrollExtractor,
    engagement: EngagementClassifier,
    history: EngagementLog,

    hand_present: bool,
    detected_gesture: Option<GestureLabel>,
}

impl<F> GestureEngine<F> {
    /// Create an engine in the `Initializing` state.
    ///
    /// Emits the initial `Status` event to `sink`.
    pub fn new(config: EngineConfig, sink: impl EventSink + 'static) -> EngineResult<Self> {
        config.validate()?;

        let session_id = Uuid::new_v4().to_string();
        let span = info_span!("gesture_session", session_id = %session_id);
        let thresholds = EngagementThresholds {
            look_away: config.look_away_threshold,
            confusion: config.confusion_threshold,
            drowsiness: config.drowsiness_threshold,
        };

        let mut engine = Self {
            pointer: PointerTracker::new(config.smoothing_factor, config.mirror_x),
            pinch: PinchClickSynthesizer::new(config.pinch_threshold, config.click_debounce_ms),
            intent: GestureIntentMachine::new(config.dwell_ms, config.refractory_ms),
            scroll: ScrollExtractor::new(config.scroll_scale),
            engagement: EngagementClassifier::new(config.engagement_interval_ms, thresholds),
            history: EngagementLog::new(config.engagement_history),
            config,
            session_id,
            span,
            clock: Box::new(SystemClock),
            timestamps: MonotonicTimestamp::new(),
            status: EngineStatus::Initializing,
            closed: false,
            providers: None,
            source: None,
            sink: Box::new(sink),
            snapshot: SnapshotPublisher::new(),
            hand_present: false,
            detected_gesture: None,
        };

        {
            let _enter = engine.span.enter();
            info!("Gesture engine initializing");
        }
        metrics::record_status_change(EngineStatus::Initializing);
        engine.sink.emit(EngineEvent::Status {
            status: EngineStatus::Initializing,
        });
        Ok(engine)
    }

    /// Replace the wall clock used for component timing.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Hand over the result of loading the perception models.
    ///
    /// Success moves the engine to `Ready`; failure moves it to `Error` and
    /// disables every feature for the rest of the session.
    pub fn install_providers(&mut self, providers: EngineResult<Providers<F>>) {
        if self.closed {
            return;
        }
        match providers {
            Ok(providers) => {
                {
                    let _enter = self.span.enter();
                    info!(
                        hands = providers.hands.name(),
                        face = providers.face.name(),
                        "Perception models loaded"
                    );
                }
                self.providers = Some(providers);
                self.set_status(EngineStatus::Ready);
            }
            Err(e) => {
                let span = self.span.clone();
                let _enter = span.enter();
                warn!(error = %e, "Perception models failed to load, gesture features disabled");
                self.set_status(EngineStatus::Error);
            }
        }
    }

    /// Hand over the result of opening the camera.
    ///
    /// Failure moves the engine to `NoCamera`.
    pub fn attach_source(&mut self, source: EngineResult<BoxedSource<F>>) {
        if self.closed {
            return;
        }
        match source {
            Ok(source) => {
                if let Some(mut previous) = self.source.replace(source) {
                    previous.release();
                }
                let _enter = self.span.enter();
                info!("Video source attached");
            }
            Err(e) => {
                let span = self.span.clone();
                let _enter = span.enter();
                warn!(error = %e, "Camera unavailable");
                self.set_status(EngineStatus::NoCamera);
            }
        }
    }

    /// Run one scheduling step.
    pub fn tick(&mut self) -> TickOutcome {
        let span = self.span.clone();
        let _enter = span.enter();

        let outcome = match self.next_frame() {
            Err(reason) => TickOutcome::Skipped(reason),
            Ok(frame) => {
                let started = Instant::now();
                let now_ms = self.clock.now_ms();
                let timestamp_ms = self.timestamps.next(now_ms);

                match self.process_frame(&frame, now_ms, timestamp_ms) {
                    Ok(report) => {
                        metrics::record_tick_duration(started.elapsed().as_secs_f64());
                        TickOutcome::Processed(report)
                    }
                    Err(e) => {
                        error!(error = %e, timestamp_ms, "Tick failed");
                        TickOutcome::Failed(e)
                    }
                }
            }
        };

        metrics::record_tick(outcome.as_str());
        outcome
    }

    /// Release the providers and the video source. Later ticks do nothing.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Some(mut providers) = self.providers.take() {
            providers.close();
        }
        if let Some(mut source) = self.source.take() {
            source.release();
        }

        let _enter = self.span.enter();
        info!(
            transitions = self.history.len(),
            "Gesture engine closed"
        );
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn cursor(&self) -> CursorState {
        self.pointer.cursor()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> EngineSnapshot {
        self.snapshot.current()
    }

    /// Reader for hosts that render from another task or thread.
    pub fn snapshot_reader(&self) -> SnapshotReader {
        self.snapshot.reader()
    }

    /// Recorded engagement transitions, oldest first.
    pub fn engagement_history(&self) -> Vec<EngagementEntry> {
        self.history.to_vec()
    }

    fn next_frame(&mut self) -> Result<F, SkipReason> {
        if self.closed {
            return Err(SkipReason::Closed);
        }
        if self.status != EngineStatus::Ready || self.providers.is_none() {
            return Err(SkipReason::NotReady);
        }
        let source = self.source.as_mut().ok_or(SkipReason::NoSource)?;
        source.current_frame().ok_or(SkipReason::FrameUnavailable)
    }

    fn process_frame(
        &mut self,
        frame: &F,
        now_ms: u64,
        timestamp_ms: u64,
    ) -> EngineResult<TickReport> {
        let mut report = TickReport {
            timestamp_ms,
            ..Default::default()
        };

        // Both providers run before any component sees the frame, so a
        // failed call aborts the tick without emitting anything.
        let hand = self.detect_hands(frame, timestamp_ms)?;
        let face = if self.engagement.is_due(now_ms) {
            self.engagement.mark_sampled(now_ms);
            Some(self.detect_face(frame, timestamp_ms)?)
        } else {
            None
        };

        self.hand_present = hand.is_some();
        report.hand_present = self.hand_present;

        // Pointer and pinch
        if let Some(hand) = &hand {
            if let Some(clicked) = self.track_pointer(hand, now_ms) {
                report.click = clicked;
            }
        }

        // Gesture intent
        let min_confidence = self.config.min_gesture_confidence;
        self.detected_gesture = hand
            .as_ref()
            .and_then(HandObservation::top_gesture)
            .filter(|gesture| gesture.score > min_confidence)
            .and_then(|gesture| gesture.label());

        if let Some(trigger) = self.intent.observe(self.detected_gesture, now_ms) {
            info!(
                gesture = %trigger.label,
                action = %trigger.action,
                "Gesture triggered action"
            );
            metrics::record_trigger(trigger.action);
            self.sink.emit(EngineEvent::Trigger {
                action: trigger.action,
                gesture: trigger.label,
            });
            report.trigger = Some(trigger);
        }

        // Scroll
        let raw_label = hand
            .as_ref()
            .and_then(HandObservation::top_gesture)
            .and_then(|gesture| gesture.label());
        let wrist_y = hand
            .as_ref()
            .and_then(|hand| hand.landmark(HandLandmark::Wrist))
            .map(|wrist| wrist.y);
        if let Some(delta_pixels) = self.scroll.observe(raw_label, wrist_y) {
            metrics::record_scroll();
            self.sink.emit(EngineEvent::Scroll { delta_pixels });
            report.scroll_delta = Some(delta_pixels);
        }

        // Engagement
        if let Some(face) = face {
            report.engagement_sampled = true;

            if let Some(entry) = self.engagement.sample(face.as_ref(), now_ms) {
                info!(
                    state = %entry.state,
                    observation = %entry.observation,
                    "Engagement changed"
                );
                metrics::record_engagement_transition(entry.state);
                self.sink.emit(EngineEvent::EngagementChanged {
                    state: entry.state,
                    observation: entry.observation.clone(),
                });
                self.history.push(entry.clone());
                report.engagement_change = Some(entry);
            }
        }

        self.publish_snapshot(Some(timestamp_ms));
        Ok(report)
    }

    /// Update the cursor and pinch state; returns whether a click fired, or
    /// `None` when the hand lacks the fingertip landmarks.
    fn track_pointer(&mut self, hand: &HandObservation, now_ms: u64) -> Option<bool> {
        let index = hand.landmark(HandLandmark::IndexTip)?;
        let thumb = hand.landmark(HandLandmark::ThumbTip)?;

        let cursor = self.pointer.update(index);
        let pinch = self.pinch.update(index.distance_2d(&thumb), now_ms);

        self.sink.emit(EngineEvent::Pointer {
            x: cursor.x,
            y: cursor.y,
            pinching: pinch.pinching,
        });

        if pinch.click {
            debug!(x = cursor.x, y = cursor.y, "Pinch click");
            metrics::record_click();
            self.sink.emit(EngineEvent::Click {
                x: cursor.x,
                y: cursor.y,
            });
        }
        Some(pinch.click)
    }

    fn detect_hands(
        &mut self,
        frame: &F,
        timestamp_ms: u64,
    ) -> EngineResult<Option<HandObservation>> {
        let providers = self
            .providers
            .as_mut()
            .ok_or_else(|| EngineError::internal("hand provider not loaded"))?;
        Ok(providers.hands.detect(frame, timestamp_ms)?.present())
    }

    fn detect_face(
        &mut self,
        frame: &F,
        timestamp_ms: u64,
    ) -> EngineResult<Option<FaceObservation>> {
        let providers = self
            .providers
            .as_mut()
            .ok_or_else(|| EngineError::internal("face provider not loaded"))?;
        Ok(providers.face.detect(frame, timestamp_ms)?.present())
    }

    fn set_status(&mut self, status: EngineStatus) {
        if self.status == status {
            return;
        }
        info!(from = %self.status, to = %status, "Engine status changed");
        self.status = status;
        metrics::record_status_change(status);
        self.sink.emit(EngineEvent::Status { status });
        self.publish_snapshot(self.timestamps.last());
    }

    fn publish_snapshot(&self, timestamp_ms: Option<u64>) {
        self.snapshot.publish(EngineSnapshot {
            cursor: self.pointer.cursor(),
            pinching: self.pinch.is_pinching(),
            hand_present: self.hand_present,
            detected_gesture: self.detected_gesture,
            progress: self.intent.progress(),
            engagement: self.engagement.state(),
            status: self.status,
            timestamp_ms,
        });
    }
}
