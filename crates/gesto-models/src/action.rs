//! Content actions the host application can perform on the current lesson.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A content action requested by the learner.
///
/// Only a subset is reachable by hand gesture; the rest are selected through
/// other host controls but share the same vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Explain,
    Quiz,
    Summary,
    Examples,
    Flashcards,
    /// Guiding questions instead of answers.
    Socratic,
    Simplify,
    /// Hands-on project or experiment.
    RealWorld,
    /// Devil's advocate stance with critical-thinking questions.
    Debate,
    /// Interdisciplinary connections.
    CrossLink,
    MindMap,
    Diagram,
}

impl ActionType {
    pub const ALL: &'static [ActionType] = &[
        ActionType::Explain,
        ActionType::Quiz,
        ActionType::Summary,
        ActionType::Examples,
        ActionType::Flashcards,
        ActionType::Socratic,
        ActionType::Simplify,
        ActionType::RealWorld,
        ActionType::Debate,
        ActionType::CrossLink,
        ActionType::MindMap,
        ActionType::Diagram,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Explain => "explain",
            ActionType::Quiz => "quiz",
            ActionType::Summary => "summary",
            ActionType::Examples => "examples",
            ActionType::Flashcards => "flashcards",
            ActionType::Socratic => "socratic",
            ActionType::Simplify => "simplify",
            ActionType::RealWorld => "real_world",
            ActionType::Debate => "debate",
            ActionType::CrossLink => "cross_link",
            ActionType::MindMap => "mind_map",
            ActionType::Diagram => "diagram",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = ActionTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        ActionType::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == normalized)
            .ok_or_else(|| ActionTypeParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown action type: {0}")]
pub struct ActionTypeParseError(String);
