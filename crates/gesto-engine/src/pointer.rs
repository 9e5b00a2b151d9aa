//! Cursor smoothing.
//!
//! Exponential smoothing toward the index fingertip. A low factor trades a
//! little lag for a cursor that does not follow per-frame landmark jitter.

use gesto_models::Point3;
use serde::{Deserialize, Serialize};

/// Smoothed cursor position in normalized `[0, 1]` screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorState {
    pub x: f32,
    pub y: f32,
}

impl CursorState {
    pub const CENTER: CursorState = CursorState { x: 0.5, y: 0.5 };
}

impl Default for CursorState {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Exponentially smoothed pointer.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    alpha: f32,
    mirror_x: bool,
    cursor: CursorState,
}

impl PointerTracker {
    /// Create a tracker starting at the screen center.
    pub fn new(alpha: f32, mirror_x: bool) -> Self {
        Self {
            alpha: alpha.clamp(f32::EPSILON, 1.0),
            mirror_x,
            cursor: CursorState::CENTER,
        }
    }

    /// Current smoothed position.
    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    /// Blend toward a raw landmark and return the new position.
    ///
    /// The target is mirrored if configured, then clamped to the unit square
    /// before blending, so the cursor never leaves it. Non-finite targets are
    /// ignored.
    pub fn update(&mut self, target: Point3) -> CursorState {
        if !target.is_finite() {
            return self.cursor;
        }

        let raw_x = if self.mirror_x { 1.0 - target.x } else { target.x };
        let tx = raw_x.clamp(0.0, 1.0);
        let ty = target.y.clamp(0.0, 1.0);

        self.cursor.x = (self.cursor.x + (tx - self.cursor.x) * self.alpha).clamp(0.0, 1.0);
        self.cursor.y = (self.cursor.y + (ty - self.cursor.y) * self.alpha).clamp(0.0, 1.0);
        self.cursor
    }
}
