//! Events the engine hands to its host.
//!
//! Serialized as internally tagged JSON so a host on the other side of a
//! process boundary can consume the same stream the replay tool prints.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::action::ActionType;
use crate::engagement::EngagementState;
use crate::gesture::GestureLabel;

/// Lifecycle of perception model loading and camera acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum EngineStatus {
    /// Models are loading.
    #[default]
    Initializing,
    /// Models loaded; frames are processed once a video source is attached.
    Ready,
    /// Model loading failed; gesture and engagement features are disabled.
    Error,
    /// Camera unavailable or permission denied.
    NoCamera,
}

impl EngineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineStatus::Initializing => "initializing",
            EngineStatus::Ready => "ready",
            EngineStatus::Error => "error",
            EngineStatus::NoCamera => "no_camera",
        }
    }

    /// True when the engine can no longer become ready without a restart.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EngineStatus::Error | EngineStatus::NoCamera)
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event emitted by the engine during a tick or a lifecycle change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// Smoothed cursor position, every tick a hand is present.
    Pointer { x: f32, y: f32, pinching: bool },

    /// Synthesized click; the host activates whatever is under `(x, y)`.
    Click { x: f32, y: f32 },

    /// A gesture was held long enough to confirm an action.
    Trigger {
        action: ActionType,
        gesture: GestureLabel,
    },

    /// Vertical scroll request in pixels (positive scrolls down).
    Scroll {
        #[serde(rename = "deltaPixels")]
        delta_pixels: f32,
    },

    /// Engagement classification changed.
    EngagementChanged {
        state: EngagementState,
        observation: String,
    },

    /// Engine lifecycle status changed.
    Status { status: EngineStatus },
}

impl EngineEvent {
    /// Short event name for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineEvent::Pointer { .. } => "pointer",
            EngineEvent::Click { .. } => "click",
            EngineEvent::Trigger { .. } => "trigger",
            EngineEvent::Scroll { .. } => "scroll",
            EngineEvent::EngagementChanged { .. } => "engagement_changed",
            EngineEvent::Status { .. } => "status",
        }
    }
}
