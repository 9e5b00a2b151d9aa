//! Engine configuration.
//!
//! Every timing and threshold constant of the temporal state machines lives
//! here. The defaults reproduce the reference behavior of the classroom
//! application; hosts may override them from the environment or a JSON file.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Configuration for the gesture and engagement engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Pointer ===
    /// Exponential smoothing factor applied per tick (default: 0.2)
    pub smoothing_factor: f32,

    /// Mirror the horizontal axis for a user-facing camera (default: true)
    pub mirror_x: bool,

    // === Pinch click ===
    /// Fingertip distance below which the hand counts as pinching (default: 0.05)
    pub pinch_threshold: f32,

    /// Minimum time between synthesized clicks in ms (default: 500)
    pub click_debounce_ms: u64,

    // === Gesture intent ===
    /// Top gesture score must exceed this to count (default: 0.5)
    pub min_gesture_confidence: f32,

    /// Hold time before a gesture triggers its action in ms (default: 1000)
    pub dwell_ms: u64,

    /// Cool-down after a trigger before the same hold re-arms in ms (default: 1500)
    pub refractory_ms: u64,

    // === Scroll ===
    /// Pixels per unit of normalized wrist displacement (default: 1000)
    pub scroll_scale: f32,

    // === Engagement ===
    /// Minimum time between engagement samples in ms (default: 2000)
    pub engagement_interval_ms: u64,

    /// Eye look-out average above which the learner is looking away (default: 0.6)
    pub look_away_threshold: f32,

    /// Brow-down average above which the learner looks confused (default: 0.6)
    pub confusion_threshold: f32,

    /// Eye-blink average above which the learner looks drowsy (default: 0.6)
    pub drowsiness_threshold: f32,

    /// Number of engagement transitions kept in history (default: 20)
    pub engagement_history: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.2,
            mirror_x: true,
            pinch_threshold: 0.05,
            click_debounce_ms: 500,
            min_gesture_confidence: 0.5,
            dwell_ms: 1000,
            refractory_ms: 1500,
            scroll_scale: 1000.0,
            engagement_interval_ms: 2000,
            look_away_threshold: 0.6,
            confusion_threshold: 0.6,
            drowsiness_threshold: 0.6,
            engagement_history: 20,
        }
    }
}

impl EngineConfig {
    /// Snappier preset for hosts with a steady 60 Hz camera.
    pub fn responsive() -> Self {
        Self {
            smoothing_factor: 0.35,
            dwell_ms: 700,
            refractory_ms: 1000,
            ..Default::default()
        }
    }

    /// Create config from `GESTO_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            smoothing_factor: env_or("GESTO_SMOOTHING_FACTOR", defaults.smoothing_factor),
            mirror_x: env_or("GESTO_MIRROR_X", defaults.mirror_x),
            pinch_threshold: env_or("GESTO_PINCH_THRESHOLD", defaults.pinch_threshold),
            click_debounce_ms: env_or("GESTO_CLICK_DEBOUNCE_MS", defaults.click_debounce_ms),
            min_gesture_confidence: env_or(
                "GESTO_MIN_GESTURE_CONFIDENCE",
                defaults.min_gesture_confidence,
            ),
            dwell_ms: env_or("GESTO_DWELL_MS", defaults.dwell_ms),
            refractory_ms: env_or("GESTO_REFRACTORY_MS", defaults.refractory_ms),
            scroll_scale: env_or("GESTO_SCROLL_SCALE", defaults.scroll_scale),
            engagement_interval_ms: env_or(
                "GESTO_ENGAGEMENT_INTERVAL_MS",
                defaults.engagement_interval_ms,
            ),
            look_away_threshold: env_or("GESTO_LOOK_AWAY_THRESHOLD", defaults.look_away_threshold),
            confusion_threshold: env_or("GESTO_CONFUSION_THRESHOLD", defaults.confusion_threshold),
            drowsiness_threshold: env_or(
                "GESTO_DROWSINESS_THRESHOLD",
                defaults.drowsiness_threshold,
            ),
            engagement_history: env_or("GESTO_ENGAGEMENT_HISTORY", defaults.engagement_history),
        }
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable by the state machines.
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(EngineError::invalid_config(format!(
                "smoothing_factor must be in (0, 1], got {}",
                self.smoothing_factor
            )));
        }
        if !(self.pinch_threshold > 0.0 && self.pinch_threshold.is_finite()) {
            return Err(EngineError::invalid_config(format!(
                "pinch_threshold must be positive, got {}",
                self.pinch_threshold
            )));
        }
        if self.dwell_ms == 0 {
            return Err(EngineError::invalid_config("dwell_ms must be positive"));
        }
        if !self.scroll_scale.is_finite() {
            return Err(EngineError::invalid_config("scroll_scale must be finite"));
        }
        for (name, value) in [
            ("min_gesture_confidence", self.min_gesture_confidence),
            ("look_away_threshold", self.look_away_threshold),
            ("confusion_threshold", self.confusion_threshold),
            ("drowsiness_threshold", self.drowsiness_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::invalid_config(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
