//! Perception provider output.
//!
//! Raw results mirror what a landmark model returns for one video frame
//! ([`HandResult`], [`FaceResult`]): parallel lists, empty when nothing was
//! seen. The engine only tracks a single hand and a single face, so raw
//! results are narrowed to a [`Detection`] of the first entry.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::gesture::GestureCategory;
use crate::landmark::{HandLandmark, Point3};

/// Outcome of one provider call: something was seen, or nothing was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Detection<T> {
    Present(T),
    Absent,
}

impl<T> Detection<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Detection::Present(_))
    }

    pub fn as_ref(&self) -> Detection<&T> {
        match self {
            Detection::Present(value) => Detection::Present(value),
            Detection::Absent => Detection::Absent,
        }
    }

    /// Convert into an `Option`, dropping the distinction's name.
    pub fn present(self) -> Option<T> {
        match self {
            Detection::Present(value) => Some(value),
            Detection::Absent => None,
        }
    }
}

impl<T> Default for Detection<T> {
    fn default() -> Self {
        Detection::Absent
    }
}

impl<T> From<Option<T>> for Detection<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Detection::Present(value),
            None => Detection::Absent,
        }
    }
}

/// Raw hand recognizer output for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandResult {
    /// One landmark set per detected hand.
    #[serde(default)]
    pub landmark_sets: Vec<Vec<Point3>>,
    /// One ranking (best first) per detected hand.
    #[serde(default)]
    pub gesture_rankings: Vec<Vec<GestureCategory>>,
}

impl HandResult {
    /// Narrow to the first detected hand.
    ///
    /// A hand is present only when it has landmarks; a ranking without
    /// landmarks carries nothing to track.
    pub fn first_hand(&self) -> Detection<HandObservation> {
        match self.landmark_sets.first() {
            Some(landmarks) if !landmarks.is_empty() => Detection::Present(HandObservation {
                landmarks: landmarks.clone(),
                gestures: self.gesture_rankings.first().cloned().unwrap_or_default(),
            }),
            _ => Detection::Absent,
        }
    }
}

/// A single tracked hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HandObservation {
    /// Ordered landmarks, see [`crate::landmark`].
    pub landmarks: Vec<Point3>,
    /// Gesture ranking, best first. May be empty.
    #[serde(default)]
    pub gestures: Vec<GestureCategory>,
}

impl HandObservation {
    pub fn new(landmarks: Vec<Point3>, gestures: Vec<GestureCategory>) -> Self {
        Self {
            landmarks,
            gestures,
        }
    }

    /// Landmark by name, if the set is long enough and the point is finite.
    pub fn landmark(&self, landmark: HandLandmark) -> Option<Point3> {
        self.landmarks
            .get(landmark.index())
            .copied()
            .filter(Point3::is_finite)
    }

    /// Highest-ranked gesture category, if any.
    pub fn top_gesture(&self) -> Option<&GestureCategory> {
        self.gestures.first()
    }
}

/// Raw face landmarker output for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaceResult {
    /// One blendshape score map per detected face.
    #[serde(default)]
    pub blendshape_sets: Vec<HashMap<String, f32>>,
    /// One row-major 4x4 facial transformation matrix per detected face.
    #[serde(default)]
    pub transforms: Vec<Vec<f32>>,
}

impl FaceResult {
    /// Narrow to the first detected face.
    ///
    /// The landmarker only reports a usable face when both the blendshapes
    /// and the transformation matrix are available.
    pub fn first_face(&self) -> Detection<FaceObservation> {
        match (self.blendshape_sets.first(), self.transforms.first()) {
            (Some(blendshapes), Some(transform)) => Detection::Present(FaceObservation {
                blendshapes: blendshapes.clone(),
                transform: Some(transform.clone()),
            }),
            _ => Detection::Absent,
        }
    }
}

/// A single tracked face.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaceObservation {
    /// Expression category name to score in `[0, 1]`.
    pub blendshapes: HashMap<String, f32>,
    /// Facial transformation matrix, when the provider supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Vec<f32>>,
}

impl FaceObservation {
    pub fn from_scores<'a>(scores: impl IntoIterator<Item = (&'a str, f32)>) -> Self {
        Self {
            blendshapes: scores
                .into_iter()
                .map(|(name, score)| (name.to_string(), score))
                .collect(),
            transform: None,
        }
    }

    /// Score of a category; missing categories score 0.
    pub fn score(&self, category: &str) -> f32 {
        self.blendshapes.get(category).copied().unwrap_or(0.0)
    }

    /// Mean of two category scores.
    pub fn pair_average(&self, left: &str, right: &str) -> f32 {
        (self.score(left) + self.score(right)) / 2.0
    }
}
