//! Hold-to-confirm gesture triggering.
//!
//! The classifier output is noisy frame to frame, so a gesture only becomes
//! an intent after it has been the top label for an unbroken dwell window.
//! After a trigger the machine enters a refractory window; a hold that is
//! still unbroken when the window ends re-arms with a fresh dwell window,
//! which lets a sustained hold repeat its action.
//!
//! ```text
//!            label L (mapped)            dwell elapsed
//!   Idle ──────────────────────▶ Holding ─────────────▶ Triggered
//!    ▲                             ▲  ▲                    │
//!    │ no label                    │  └── until reached ───┘
//!    └──────────── any ◀───────────┴─ label changes (from any state)
//! ```

use gesto_models::{ActionType, GestureLabel};
use tracing::debug;

/// Static gesture to action table. Labels not listed never trigger.
pub const ACTION_TABLE: &[(GestureLabel, ActionType)] = &[
    (GestureLabel::OpenPalm, ActionType::Explain),
    (GestureLabel::Victory, ActionType::Quiz),
    (GestureLabel::ThumbUp, ActionType::Summary),
    (GestureLabel::ILoveYou, ActionType::Examples),
];

/// Action bound to a gesture, if any.
pub fn action_for(label: GestureLabel) -> Option<ActionType> {
    ACTION_TABLE
        .iter()
        .find(|(mapped, _)| *mapped == label)
        .map(|(_, action)| *action)
}

/// Current state of the intent machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntentState {
    #[default]
    Idle,
    Holding { label: GestureLabel, start_ms: u64 },
    Triggered { label: GestureLabel, until_ms: u64 },
}

impl IntentState {
    /// Candidate label being held, if any.
    pub fn label(&self) -> Option<GestureLabel> {
        match self {
            IntentState::Idle => None,
            IntentState::Holding { label, .. } | IntentState::Triggered { label, .. } => {
                Some(*label)
            }
        }
    }
}

/// A confirmed gesture intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub label: GestureLabel,
    pub action: ActionType,
    pub at_ms: u64,
}

/// Converts a per-tick gesture label into one-shot triggers.
#[derive(Debug, Clone)]
pub struct GestureIntentMachine {
    dwell_ms: u64,
    refractory_ms: u64,
    state: IntentState,
    progress: f32,
}

impl GestureIntentMachine {
    pub fn new(dwell_ms: u64, refractory_ms: u64) -> Self {
        Self {
            dwell_ms: dwell_ms.max(1),
            refractory_ms,
            state: IntentState::Idle,
            progress: 0.0,
        }
    }

    pub fn state(&self) -> IntentState {
        self.state
    }

    /// Dwell progress of the current hold in `[0, 100]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Feed this tick's confident top label (`None` when there is none).
    ///
    /// Unmapped labels are treated as `None`. Returns a trigger at most once
    /// per dwell window.
    pub fn observe(&mut self, label: Option<GestureLabel>, now_ms: u64) -> Option<Trigger> {
        let candidate = label.filter(|label| action_for(*label).is_some());

        if candidate != self.state.label() {
            debug!(
                from = ?self.state.label(),
                to = ?candidate,
                now_ms,
                "Gesture hold reset"
            );
            self.state = match candidate {
                Some(label) => IntentState::Holding {
                    label,
                    start_ms: now_ms,
                },
                None => IntentState::Idle,
            };
            self.progress = 0.0;
            return None;
        }

        if let IntentState::Triggered { label, until_ms } = self.state {
            if now_ms < until_ms {
                return None;
            }
            debug!(label = %label, until_ms, now_ms, "Refractory window elapsed, re-arming");
            // The dwell restarts at the re-arming frame, never in the past
            self.state = IntentState::Holding {
                label,
                start_ms: now_ms,
            };
            self.progress = 0.0;
            return None;
        }

        let IntentState::Holding { label, start_ms } = self.state else {
            return None;
        };

        let elapsed = now_ms.saturating_sub(start_ms);
        self.progress = (elapsed as f32 / self.dwell_ms as f32 * 100.0).min(100.0);
        if elapsed < self.dwell_ms {
            return None;
        }

        let action = action_for(label)?;
        self.state = IntentState::Triggered {
            label,
            until_ms: now_ms + self.refractory_ms,
        };
        self.progress = 100.0;
        Some(Trigger {
            label,
            action,
            at_ms: now_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> GestureIntentMachine {
        GestureIntentMachine::new(1000, 1500)
    }

    #[test]
    fn test_action_table() {
        assert_eq!(action_for(GestureLabel::OpenPalm), Some(ActionType::Explain));
        assert_eq!(action_for(GestureLabel::Victory), Some(ActionType::Quiz));
        assert_eq!(action_for(GestureLabel::ThumbUp), Some(ActionType::Summary));
        assert_eq!(action_for(GestureLabel::ILoveYou), Some(ActionType::Examples));
        assert_eq!(action_for(GestureLabel::ClosedFist), None);
        assert_eq!(action_for(GestureLabel::PointingUp), None);
        assert_eq!(action_for(GestureLabel::ThumbDown), None);
    }

    #[test]
    fn test_trigger_after_dwell() {
        let mut intent = machine();
        assert!(intent.observe(Some(GestureLabel::Victory), 0).is_none());
        assert!(intent.observe(Some(GestureLabel::Victory), 500).is_none());
        assert_eq!(intent.progress(), 50.0);
        assert!(intent.observe(Some(GestureLabel::Victory), 999).is_none());

        let trigger = intent.observe(Some(GestureLabel::Victory), 1000).unwrap();
        assert_eq!(trigger.action, ActionType::Quiz);
        assert_eq!(trigger.at_ms, 1000);
        assert_eq!(intent.progress(), 100.0);
        assert_eq!(
            intent.state(),
            IntentState::Triggered {
                label: GestureLabel::Victory,
                until_ms: 2500
            }
        );
    }

    #[test]
    fn test_unmapped_label_never_triggers() {
        let mut intent = machine();
        for t in (0..=3000).step_by(100) {
            assert!(intent.observe(Some(GestureLabel::ClosedFist), t).is_none());
        }
        assert_eq!(intent.state(), IntentState::Idle);
        assert_eq!(intent.progress(), 0.0);
    }

    #[test]
    fn test_none_resets_hold() {
        let mut intent = machine();
        intent.observe(Some(GestureLabel::ThumbUp), 0);
        intent.observe(Some(GestureLabel::ThumbUp), 800);
        intent.observe(None, 900);
        assert_eq!(intent.state(), IntentState::Idle);
        assert_eq!(intent.progress(), 0.0);

        intent.observe(Some(GestureLabel::ThumbUp), 950);
        assert!(intent.observe(Some(GestureLabel::ThumbUp), 1900).is_none());
        assert!(intent.observe(Some(GestureLabel::ThumbUp), 1950).is_some());
    }

    #[test]
    fn test_refractory_then_rearm() {
        let mut intent = machine();
        intent.observe(Some(GestureLabel::OpenPalm), 0);
        assert!(intent.observe(Some(GestureLabel::OpenPalm), 1000).is_some());

        for t in (1100..2500).step_by(100) {
            assert!(intent.observe(Some(GestureLabel::OpenPalm), t).is_none());
        }

        // Re-armed at 2500 with a fresh dwell window
        assert!(intent.observe(Some(GestureLabel::OpenPalm), 2500).is_none());
        assert_eq!(intent.progress(), 0.0);
        assert!(intent.observe(Some(GestureLabel::OpenPalm), 3499).is_none());
        let again = intent.observe(Some(GestureLabel::OpenPalm), 3500).unwrap();
        assert_eq!(again.action, ActionType::Explain);
    }

    #[test]
    fn test_late_rearm_waits_full_dwell() {
        let mut intent = machine();
        intent.observe(Some(GestureLabel::OpenPalm), 0);
        assert!(intent.observe(Some(GestureLabel::OpenPalm), 1000).is_some());

        // First frame after the window is long past it
        assert!(intent.observe(Some(GestureLabel::OpenPalm), 3600).is_none());
        assert_eq!(
            intent.state(),
            IntentState::Holding {
                label: GestureLabel::OpenPalm,
                start_ms: 3600
            }
        );
        assert_eq!(intent.progress(), 0.0);

        assert!(intent.observe(Some(GestureLabel::OpenPalm), 4599).is_none());
        assert!(intent.observe(Some(GestureLabel::OpenPalm), 4600).is_some());
    }

    #[test]
    fn test_new_label_during_refractory_starts_fresh_hold() {
        let mut intent = machine();
        intent.observe(Some(GestureLabel::OpenPalm), 0);
        intent.observe(Some(GestureLabel::OpenPalm), 1000);

        assert!(intent.observe(Some(GestureLabel::Victory), 1200).is_none());
        assert_eq!(
            intent.state(),
            IntentState::Holding {
                label: GestureLabel::Victory,
                start_ms: 1200
            }
        );
        assert!(intent.observe(Some(GestureLabel::Victory), 2200).is_some());
    }
}
