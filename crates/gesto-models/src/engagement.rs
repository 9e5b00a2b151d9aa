//! Learner engagement classification.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Coarse engagement state inferred from facial expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum EngagementState {
    Focused,
    Distracted,
    Confused,
    Bored,
    /// No sample has been classified yet.
    #[default]
    Neutral,
}

impl EngagementState {
    pub const ALL: &'static [EngagementState] = &[
        EngagementState::Focused,
        EngagementState::Distracted,
        EngagementState::Confused,
        EngagementState::Bored,
        EngagementState::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementState::Focused => "Focused",
            EngagementState::Distracted => "Distracted",
            EngagementState::Confused => "Confused",
            EngagementState::Bored => "Bored",
            EngagementState::Neutral => "Neutral",
        }
    }

    /// True for states an instructor would want to act on.
    pub fn needs_attention(&self) -> bool {
        matches!(
            self,
            EngagementState::Distracted | EngagementState::Confused | EngagementState::Bored
        )
    }
}

impl fmt::Display for EngagementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EngagementState {
    type Err = EngagementStateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngagementState::ALL
            .iter()
            .copied()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| EngagementStateParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown engagement state: {0}")]
pub struct EngagementStateParseError(String);

/// One recorded engagement transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EngagementEntry {
    /// Engine timestamp of the sample that produced the transition.
    pub timestamp_ms: u64,
    pub state: EngagementState,
    /// Human-readable reason, e.g. "Looking away from screen".
    pub observation: String,
}

impl EngagementEntry {
    pub fn new(timestamp_ms: u64, state: EngagementState, observation: impl Into<String>) -> Self {
        Self {
            timestamp_ms,
            state,
            observation: observation.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        assert_eq!(EngagementState::default(), EngagementState::Neutral);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("confused".parse::<EngagementState>().unwrap(), EngagementState::Confused);
        assert_eq!("BORED".parse::<EngagementState>().unwrap(), EngagementState::Bored);
        assert!("sleepy".parse::<EngagementState>().is_err());
    }

    #[test]
    fn test_attention_states() {
        assert!(!EngagementState::Focused.needs_attention());
        assert!(!EngagementState::Neutral.needs_attention());
        assert!(EngagementState::Confused.needs_attention());
        assert!(EngagementState::Distracted.needs_attention());
    }
}
