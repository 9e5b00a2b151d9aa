//! Shared data models for the gesto gesture engine.
//!
//! This crate provides Serde-serializable types for:
//! - Hand landmarks and gesture labels
//! - Perception provider results and the `Detection` sum type
//! - Content actions and engagement states
//! - Engine events and lifecycle status
//! - Classroom engagement aggregation

pub mod action;
pub mod classroom;
pub mod detection;
pub mod engagement;
pub mod event;
pub mod gesture;
pub mod landmark;

// Re-export common types
pub use action::{ActionType, ActionTypeParseError};
pub use classroom::ClassroomStats;
pub use detection::{Detection, FaceObservation, FaceResult, HandObservation, HandResult};
pub use engagement::{EngagementEntry, EngagementState, EngagementStateParseError};
pub use event::{EngineEvent, EngineStatus};
pub use gesture::{GestureCategory, GestureLabel, GestureLabelParseError};
pub use landmark::{HandLandmark, Point3, HAND_LANDMARK_COUNT};
