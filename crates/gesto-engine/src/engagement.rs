//! Engagement classification from facial expression scores.
//!
//! Sampling is throttled to a fixed interval independent of the tick rate,
//! and a change is reported only when the classified state differs from the
//! stored one. At a 2 s cadence that keeps a steady learner from flooding the
//! host with identical updates.

use std::collections::VecDeque;

use gesto_models::{EngagementEntry, EngagementState, FaceObservation};
use tracing::debug;

/// Blendshape category pairs averaged into the three aggregate scores.
pub mod blendshapes {
    pub const BROW_DOWN: (&str, &str) = ("browDownLeft", "browDownRight");
    pub const EYE_BLINK: (&str, &str) = ("eyeBlinkLeft", "eyeBlinkRight");
    pub const EYE_LOOK_OUT: (&str, &str) = ("eyeLookOutLeft", "eyeLookOutRight");
}

pub const OBS_NO_FACE: &str = "No face detected";
pub const OBS_LOOKING_AWAY: &str = "Looking away from screen";
pub const OBS_CONFUSED: &str = "Facial expression indicates confusion";
pub const OBS_DROWSY: &str = "Eyes closed / Drowsy";
pub const OBS_FOCUSED: &str = "Focused on content";

/// Score above which each rule fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementThresholds {
    pub look_away: f32,
    pub confusion: f32,
    pub drowsiness: f32,
}

impl Default for EngagementThresholds {
    fn default() -> Self {
        Self {
            look_away: 0.6,
            confusion: 0.6,
            drowsiness: 0.6,
        }
    }
}

/// Aggregate scores of one face sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExpressionScores {
    pub brow_down: f32,
    pub eye_blink: f32,
    pub eye_look_out: f32,
}

impl ExpressionScores {
    pub fn from_face(face: &FaceObservation) -> Self {
        let (bl, br) = blendshapes::BROW_DOWN;
        let (el, er) = blendshapes::EYE_BLINK;
        let (ol, or) = blendshapes::EYE_LOOK_OUT;
        Self {
            brow_down: face.pair_average(bl, br),
            eye_blink: face.pair_average(el, er),
            eye_look_out: face.pair_average(ol, or),
        }
    }
}

/// Classify one sample. First matching rule wins.
pub fn classify(
    face: Option<&FaceObservation>,
    thresholds: &EngagementThresholds,
) -> (EngagementState, &'static str) {
    let Some(face) = face else {
        return (EngagementState::Distracted, OBS_NO_FACE);
    };

    let scores = ExpressionScores::from_face(face);
    if scores.eye_look_out > thresholds.look_away {
        (EngagementState::Distracted, OBS_LOOKING_AWAY)
    } else if scores.brow_down > thresholds.confusion {
        (EngagementState::Confused, OBS_CONFUSED)
    } else if scores.eye_blink > thresholds.drowsiness {
        (EngagementState::Bored, OBS_DROWSY)
    } else {
        (EngagementState::Focused, OBS_FOCUSED)
    }
}

/// Throttled classifier with hysteresis.
#[derive(Debug, Clone)]
pub struct EngagementClassifier {
    interval_ms: u64,
    thresholds: EngagementThresholds,
    state: EngagementState,
    observation: String,
    last_sample_ms: Option<u64>,
}

impl EngagementClassifier {
    pub fn new(interval_ms: u64, thresholds: EngagementThresholds) -> Self {
        Self {
            interval_ms,
            thresholds,
            state: EngagementState::Neutral,
            observation: String::new(),
            last_sample_ms: None,
        }
    }

    pub fn state(&self) -> EngagementState {
        self.state
    }

    pub fn observation(&self) -> &str {
        &self.observation
    }

    /// Whether a sample is due at `now_ms`. The first call is always due.
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_sample_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        }
    }

    /// Record that a sample was taken, whether or not it succeeds.
    pub fn mark_sampled(&mut self, now_ms: u64) {
        self.last_sample_ms = Some(now_ms);
    }

    /// Classify a sample and return the new entry if the state changed.
    pub fn sample(
        &mut self,
        face: Option<&FaceObservation>,
        now_ms: u64,
    ) -> Option<EngagementEntry> {
        self.mark_sampled(now_ms);
        let (state, observation) = classify(face, &self.thresholds);

        if state == self.state {
            debug!(state = %state, "Engagement unchanged");
            return None;
        }

        self.state = state;
        self.observation = observation.to_string();
        Some(EngagementEntry::new(now_ms, state, observation))
    }
}

/// Bounded log of engagement transitions, oldest dropped first.
#[derive(Debug, Clone)]
pub struct EngagementLog {
    capacity: usize,
    entries: VecDeque<EngagementEntry>,
}

impl EngagementLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, entry: EngagementEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn latest(&self) -> Option<&EngagementEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest first.
    pub fn to_vec(&self) -> Vec<EngagementEntry> {
        self.entries.iter().cloned().collect()
    }
}
