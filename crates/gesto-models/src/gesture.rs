//! Gesture labels reported by the hand perception provider.
//!
//! The provider scores a closed vocabulary of hand signs. Category names on
//! the wire use the provider's spelling (`"Open_Palm"`, `"ILoveYou"`, ...);
//! anything outside the vocabulary, including the provider's own `"None"`
//! category, does not parse into a [`GestureLabel`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Recognized hand signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    /// All fingers curled into the palm.
    ClosedFist,
    /// All fingers extended, palm toward the camera.
    OpenPalm,
    /// Index finger pointing up, others curled.
    PointingUp,
    ThumbDown,
    ThumbUp,
    /// Index and middle finger extended in a V.
    Victory,
    /// Thumb, index and little finger extended.
    #[serde(rename = "i_love_you")]
    ILoveYou,
}

impl GestureLabel {
    /// All labels in provider order.
    pub const ALL: &'static [GestureLabel] = &[
        GestureLabel::ClosedFist,
        GestureLabel::OpenPalm,
        GestureLabel::PointingUp,
        GestureLabel::ThumbDown,
        GestureLabel::ThumbUp,
        GestureLabel::Victory,
        GestureLabel::ILoveYou,
    ];

    /// Category name as spelled by the provider.
    pub fn category_name(&self) -> &'static str {
        match self {
            GestureLabel::ClosedFist => "Closed_Fist",
            GestureLabel::OpenPalm => "Open_Palm",
            GestureLabel::PointingUp => "Pointing_Up",
            GestureLabel::ThumbDown => "Thumb_Down",
            GestureLabel::ThumbUp => "Thumb_Up",
            GestureLabel::Victory => "Victory",
            GestureLabel::ILoveYou => "ILoveYou",
        }
    }

    /// Short snake_case name for logs and metrics labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::ClosedFist => "closed_fist",
            GestureLabel::OpenPalm => "open_palm",
            GestureLabel::PointingUp => "pointing_up",
            GestureLabel::ThumbDown => "thumb_down",
            GestureLabel::ThumbUp => "thumb_up",
            GestureLabel::Victory => "victory",
            GestureLabel::ILoveYou => "i_love_you",
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GestureLabel {
    type Err = GestureLabelParseError;

    /// Accepts both the provider spelling and the snake_case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GestureLabel::ALL
            .iter()
            .copied()
            .find(|label| label.category_name() == s || label.as_str() == s)
            .ok_or_else(|| GestureLabelParseError(s.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown gesture label: {0}")]
pub struct GestureLabelParseError(String);

/// One scored entry of a gesture ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GestureCategory {
    /// Provider category name, e.g. `"Thumb_Up"`.
    #[serde(rename = "categoryName", alias = "label")]
    pub category_name: String,
    /// Confidence in `[0, 1]`.
    pub score: f32,
}

impl GestureCategory {
    pub fn new(category_name: impl Into<String>, score: f32) -> Self {
        Self {
            category_name: category_name.into(),
            score,
        }
    }

    /// Build a category from a known label.
    pub fn of(label: GestureLabel, score: f32) -> Self {
        Self::new(label.category_name(), score)
    }

    /// Parsed label, or `None` for categories outside the vocabulary.
    pub fn label(&self) -> Option<GestureLabel> {
        self.category_name.parse().ok()
    }
}
