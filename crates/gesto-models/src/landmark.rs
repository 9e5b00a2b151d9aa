//! Hand landmark geometry.
//!
//! The perception provider reports each detected hand as 21 ordered points in
//! normalized image coordinates (x and y in `[0, 1]`, z relative depth).
//!
//! # Landmarks Layout (21-point hand model)
//!
//! - 0: Wrist
//! - 1-4: Thumb (CMC, MCP, IP, tip)
//! - 5-8: Index finger (MCP, PIP, DIP, tip)
//! - 9-12: Middle finger
//! - 13-16: Ring finger
//! - 17-20: Little finger

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of points in a complete hand landmark set.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// A single landmark in normalized image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Point on the image plane with zero depth.
    pub fn planar(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance on the image plane, ignoring depth.
    pub fn distance_2d(&self, other: &Point3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// True when both planar coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Named hand landmarks used by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbTip,
    IndexTip,
    MiddleTip,
    RingTip,
    PinkyTip,
}

impl HandLandmark {
    /// Index into a 21-point landmark set.
    pub fn index(&self) -> usize {
        match self {
            HandLandmark::Wrist => 0,
            HandLandmark::ThumbTip => 4,
            HandLandmark::IndexTip => 8,
            HandLandmark::MiddleTip => 12,
            HandLandmark::RingTip => 16,
            HandLandmark::PinkyTip => 20,
        }
    }
}
