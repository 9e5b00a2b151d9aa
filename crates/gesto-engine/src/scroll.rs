//! Closed-fist scrolling.

use gesto_models::GestureLabel;

/// Gesture that drives scrolling while held.
pub const SCROLL_GESTURE: GestureLabel = GestureLabel::ClosedFist;

/// Converts wrist movement during a sustained closed fist into scroll deltas.
///
/// Deltas are frame to frame: the anchor follows the wrist, so a steady fist
/// stops scrolling.
#[derive(Debug, Clone)]
pub struct ScrollExtractor {
    scale: f32,
    anchor_y: Option<f32>,
}

impl ScrollExtractor {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            anchor_y: None,
        }
    }

    pub fn anchor(&self) -> Option<f32> {
        self.anchor_y
    }

    /// Feed this tick's top label and wrist height; returns a delta in pixels.
    ///
    /// The first tick of a run only records the anchor.
    pub fn observe(&mut self, label: Option<GestureLabel>, wrist_y: Option<f32>) -> Option<f32> {
        let y = match (label, wrist_y) {
            (Some(SCROLL_GESTURE), Some(y)) if y.is_finite() => y,
            _ => {
                self.anchor_y = None;
                return None;
            }
        };

        let delta = self.anchor_y.map(|anchor| (y - anchor) * self.scale);
        self.anchor_y = Some(y);
        delta
    }
}
