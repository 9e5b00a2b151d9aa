//! Scripted providers and a harness for driving the engine tick by tick.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use gesto_engine::{
    EngineConfig, EngineResult, GestureEngine, ManualClock, PerceptionProvider, Providers,
    RecordingSink, TickOutcome, VideoSource,
};
use gesto_models::{
    Detection, EngineEvent, FaceObservation, GestureCategory, GestureLabel, HandLandmark,
    HandObservation, Point3, HAND_LANDMARK_COUNT,
};

/// Frames are plain counters.
pub type Frame = u64;

/// What the hand provider reports on the next call.
pub type HandScript = Arc<Mutex<Option<HandObservation>>>;

/// What the face provider reports on the next call.
pub type FaceScript = Arc<Mutex<Option<FaceObservation>>>;

pub struct ScriptedHands {
    script: HandScript,
}

impl PerceptionProvider<Frame> for ScriptedHands {
    type Output = HandObservation;

    fn name(&self) -> &'static str {
        "scripted-hands"
    }

    fn detect(&mut self, _frame: &Frame, _ts: u64) -> EngineResult<Detection<HandObservation>> {
        Ok(self.script.lock().unwrap().clone().into())
    }
}

pub struct ScriptedFace {
    script: FaceScript,
    calls: Arc<Mutex<Vec<u64>>>,
}

impl PerceptionProvider<Frame> for ScriptedFace {
    type Output = FaceObservation;

    fn name(&self) -> &'static str {
        "scripted-face"
    }

    fn detect(&mut self, _frame: &Frame, ts: u64) -> EngineResult<Detection<FaceObservation>> {
        self.calls.lock().unwrap().push(ts);
        Ok(self.script.lock().unwrap().clone().into())
    }
}

/// Always has a frame ready.
pub struct CountingSource {
    next: Frame,
}

impl VideoSource for CountingSource {
    type Frame = Frame;

    fn current_frame(&mut self) -> Option<Frame> {
        self.next += 1;
        Some(self.next)
    }
}

pub struct Harness {
    pub engine: GestureEngine<Frame>,
    pub sink: RecordingSink,
    pub clock: ManualClock,
    pub hands: HandScript,
    pub face: FaceScript,
    pub face_calls: Arc<Mutex<Vec<u64>>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let sink = RecordingSink::new();
        let clock = ManualClock::new(0);
        let hands: HandScript = Arc::default();
        let face: FaceScript = Arc::default();
        let face_calls = Arc::new(Mutex::new(Vec::new()));

        let mut engine = GestureEngine::new(config, sink.clone())
            .unwrap()
            .with_clock(clock.clone());
        engine.install_providers(Ok(Providers::new(
            Box::new(ScriptedHands {
                script: hands.clone(),
            }),
            Box::new(ScriptedFace {
                script: face.clone(),
                calls: face_calls.clone(),
            }),
        )));
        engine.attach_source(Ok(Box::new(CountingSource { next: 0 })));
        sink.drain();

        Self {
            engine,
            sink,
            clock,
            hands,
            face,
            face_calls,
        }
    }

    pub fn set_hand(&self, hand: Option<HandObservation>) {
        *self.hands.lock().unwrap() = hand;
    }

    pub fn set_face(&self, face: Option<FaceObservation>) {
        *self.face.lock().unwrap() = face;
    }

    /// Tick with the clock at `now_ms`.
    pub fn tick_at(&mut self, now_ms: u64) -> TickOutcome {
        self.clock.set(now_ms);
        self.engine.tick()
    }

    /// Tick every `step_ms` from `from_ms` through `to_ms` inclusive.
    pub fn run(&mut self, from_ms: u64, to_ms: u64, step_ms: u64) {
        let mut t = from_ms;
        while t <= to_ms {
            self.tick_at(t);
            t += step_ms;
        }
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.sink.events()
    }

    pub fn triggers(&self) -> Vec<EngineEvent> {
        self.events()
            .into_iter()
            .filter(|event| matches!(event, EngineEvent::Trigger { .. }))
            .collect()
    }

    pub fn clicks(&self) -> Vec<EngineEvent> {
        self.events()
            .into_iter()
            .filter(|event| matches!(event, EngineEvent::Click { .. }))
            .collect()
    }

    pub fn engagement_changes(&self) -> Vec<EngineEvent> {
        self.events()
            .into_iter()
            .filter(|event| matches!(event, EngineEvent::EngagementChanged { .. }))
            .collect()
    }
}

/// A hand with its index tip at `index` and thumb tip at `thumb`.
pub fn hand_at(
    index: Point3,
    thumb: Point3,
    gesture: Option<(GestureLabel, f32)>,
) -> HandObservation {
    let mut landmarks = vec![Point3::planar(0.5, 0.8); HAND_LANDMARK_COUNT];
    landmarks[HandLandmark::IndexTip.index()] = index;
    landmarks[HandLandmark::ThumbTip.index()] = thumb;
    let gestures = gesture
        .map(|(label, score)| vec![GestureCategory::of(label, score)])
        .unwrap_or_default();
    HandObservation::new(landmarks, gestures)
}

/// An open (not pinching) hand showing `label`.
pub fn gesture_hand(label: GestureLabel, score: f32) -> HandObservation {
    hand_at(
        Point3::planar(0.4, 0.4),
        Point3::planar(0.6, 0.6),
        Some((label, score)),
    )
}

/// A hand with index and thumb tips `distance` apart horizontally.
pub fn pinch_hand(distance: f32) -> HandObservation {
    hand_at(
        Point3::planar(0.5, 0.5),
        Point3::planar(0.5 + distance, 0.5),
        None,
    )
}

/// A closed fist with the wrist at height `y`.
pub fn fist_at(y: f32) -> HandObservation {
    let mut hand = gesture_hand(GestureLabel::ClosedFist, 0.8);
    hand.landmarks[HandLandmark::Wrist.index()] = Point3::planar(0.5, y);
    hand
}

/// A face scoring `value` on both sides of each named category pair.
pub fn face_with(pairs: &[(&str, &str, f32)]) -> FaceObservation {
    let mut scores = Vec::new();
    for (left, right, value) in pairs {
        scores.push((*left, *value));
        scores.push((*right, *value));
    }
    FaceObservation::from_scores(scores)
}

pub fn relaxed_face() -> FaceObservation {
    face_with(&[("eyeLookOutLeft", "eyeLookOutRight", 0.05)])
}
