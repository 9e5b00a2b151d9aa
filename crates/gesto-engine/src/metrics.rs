//! Engine metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the host
//! installs a recorder.

use gesto_models::{ActionType, EngagementState, EngineStatus};
use metrics::{counter, histogram};

// =============================================================================
// Metric Names
// =============================================================================

pub mod names {
    /// Ticks by outcome (`processed`, `skipped`, `failed`).
    pub const TICKS_TOTAL: &str = "gesto_ticks_total";

    /// Wall time spent inside a processed tick.
    pub const TICK_DURATION_SECONDS: &str = "gesto_tick_duration_seconds";

    /// Gesture triggers by action.
    pub const TRIGGERS_TOTAL: &str = "gesto_triggers_total";

    /// Synthesized pinch clicks.
    pub const CLICKS_TOTAL: &str = "gesto_clicks_total";

    /// Scroll events emitted.
    pub const SCROLL_EVENTS_TOTAL: &str = "gesto_scroll_events_total";

    /// Engagement transitions by new state.
    pub const ENGAGEMENT_TRANSITIONS_TOTAL: &str = "gesto_engagement_transitions_total";

    /// Lifecycle status changes by new status.
    pub const STATUS_CHANGES_TOTAL: &str = "gesto_status_changes_total";
}

// =============================================================================
// Recording Functions
// =============================================================================

pub fn record_tick(outcome: &'static str) {
    counter!(names::TICKS_TOTAL, "outcome" => outcome).increment(1);
}

pub fn record_tick_duration(duration_secs: f64) {
    histogram!(names::TICK_DURATION_SECONDS).record(duration_secs);
}

pub fn record_trigger(action: ActionType) {
    counter!(names::TRIGGERS_TOTAL, "action" => action.as_str()).increment(1);
}

pub fn record_click() {
    counter!(names::CLICKS_TOTAL).increment(1);
}

pub fn record_scroll() {
    counter!(names::SCROLL_EVENTS_TOTAL).increment(1);
}

pub fn record_engagement_transition(state: EngagementState) {
    counter!(names::ENGAGEMENT_TRANSITIONS_TOTAL, "state" => state.as_str()).increment(1);
}

pub fn record_status_change(status: EngineStatus) {
    counter!(names::STATUS_CHANGES_TOTAL, "status" => status.as_str()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        for name in [
            names::TICKS_TOTAL,
            names::TICK_DURATION_SECONDS,
            names::TRIGGERS_TOTAL,
            names::CLICKS_TOTAL,
            names::SCROLL_EVENTS_TOTAL,
            names::ENGAGEMENT_TRANSITIONS_TOTAL,
            names::STATUS_CHANGES_TOTAL,
        ] {
            assert!(name.starts_with("gesto_"));
        }
        assert!(names::TICK_DURATION_SECONDS.ends_with("_seconds"));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_tick("processed");
        record_trigger(ActionType::Quiz);
        record_engagement_transition(EngagementState::Bored);
        record_status_change(EngineStatus::Ready);
    }
}
