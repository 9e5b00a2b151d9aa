//! Providers and a video source backed by a recorded trace.

use std::collections::VecDeque;

use gesto_engine::{
    EngineError, EngineResult, ManualClock, PerceptionProvider, Providers, VideoSource,
};
use gesto_models::{Detection, FaceObservation, FaceResult, HandObservation, HandResult};

use crate::trace::TraceFrame;

/// Plays trace frames in order, one per tick.
///
/// Each frame moves the shared clock to its recorded time before the engine
/// reads it, so the engine sees the same timing the recording had.
pub struct TraceSource {
    frames: VecDeque<TraceFrame>,
    clock: ManualClock,
}

impl TraceSource {
    pub fn new(frames: impl IntoIterator<Item = TraceFrame>, clock: ManualClock) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            clock,
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl VideoSource for TraceSource {
    type Frame = TraceFrame;

    fn current_frame(&mut self) -> Option<TraceFrame> {
        let frame = self.frames.pop_front()?;
        self.clock.set(frame.timestamp_ms);
        frame.ready.then_some(frame)
    }

    fn release(&mut self) {
        self.frames.clear();
    }
}

/// Rejects timestamps that do not strictly increase, like a live model does.
#[derive(Debug, Default)]
struct TimestampGuard {
    last: Option<u64>,
}

impl TimestampGuard {
    fn accept(&mut self, timestamp_ms: u64) -> EngineResult<()> {
        if let Some(previous_ms) = self.last {
            if timestamp_ms <= previous_ms {
                return Err(EngineError::NonMonotonicTimestamp {
                    timestamp_ms,
                    previous_ms,
                });
            }
        }
        self.last = Some(timestamp_ms);
        Ok(())
    }
}

/// Hand recognizer that returns the recorded hand result.
#[derive(Debug, Default)]
pub struct RecordedHands {
    guard: TimestampGuard,
}

impl PerceptionProvider<TraceFrame> for RecordedHands {
    type Output = HandObservation;

    fn name(&self) -> &'static str {
        "recorded-hands"
    }

    fn detect(
        &mut self,
        frame: &TraceFrame,
        timestamp_ms: u64,
    ) -> EngineResult<Detection<HandObservation>> {
        self.guard.accept(timestamp_ms)?;
        Ok(frame
            .hands
            .as_ref()
            .map(HandResult::first_hand)
            .unwrap_or_default())
    }
}

/// Face landmarker that returns the recorded face result.
#[derive(Debug, Default)]
pub struct RecordedFace {
    guard: TimestampGuard,
}

impl PerceptionProvider<TraceFrame> for RecordedFace {
    type Output = FaceObservation;

    fn name(&self) -> &'static str {
        "recorded-face"
    }

    fn detect(
        &mut self,
        frame: &TraceFrame,
        timestamp_ms: u64,
    ) -> EngineResult<Detection<FaceObservation>> {
        self.guard.accept(timestamp_ms)?;
        Ok(frame
            .face
            .as_ref()
            .map(FaceResult::first_face)
            .unwrap_or_default())
    }
}

/// Both recorded providers, ready to install.
pub fn recorded_providers() -> Providers<TraceFrame> {
    Providers::new(
        Box::new(RecordedHands::default()),
        Box::new(RecordedFace::default()),
    )
}
