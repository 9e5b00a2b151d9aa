//! Pinch-to-click synthesis.

use tracing::debug;

/// Result of feeding one fingertip distance into the synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PinchUpdate {
    /// Whether the fingertips are currently pinched.
    pub pinching: bool,
    /// A click should be synthesized at the current cursor.
    pub click: bool,
}

/// Turns thumb/index proximity into debounced click events.
///
/// A click fires only on the rising edge of the pinch and only if the previous
/// click is at least `debounce_ms` old. Holding the pinch or releasing it never
/// clicks.
#[derive(Debug, Clone)]
pub struct PinchClickSynthesizer {
    threshold: f32,
    debounce_ms: u64,
    pinching: bool,
    last_click_ms: Option<u64>,
}

impl PinchClickSynthesizer {
    pub fn new(threshold: f32, debounce_ms: u64) -> Self {
        Self {
            threshold,
            debounce_ms,
            pinching: false,
            last_click_ms: None,
        }
    }

    pub fn is_pinching(&self) -> bool {
        self.pinching
    }

    pub fn last_click_ms(&self) -> Option<u64> {
        self.last_click_ms
    }

    /// Feed the fingertip distance observed at `now_ms`.
    pub fn update(&mut self, distance: f32, now_ms: u64) -> PinchUpdate {
        // NaN compares false and reads as "not pinching"
        let active = distance < self.threshold;
        let rising = active && !self.pinching;
        self.pinching = active;

        if !rising {
            return PinchUpdate {
                pinching: active,
                click: false,
            };
        }

        let debounced = self
            .last_click_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.debounce_ms);
        if debounced {
            debug!(now_ms, "Pinch click suppressed by debounce");
            return PinchUpdate {
                pinching: true,
                click: false,
            };
        }

        self.last_click_ms = Some(now_ms);
        PinchUpdate {
            pinching: true,
            click: true,
        }
    }
}
