#![deny(unreachable_patterns)]
//! Gesture intent and engagement inference engine.
//!
//! This crate provides:
//! - Exponential cursor smoothing and debounced pinch clicks
//! - Hold-to-confirm gesture triggering with a refractory window
//! - Closed-fist scroll deltas
//! - Throttled engagement classification with hysteresis
//! - A cooperative tick scheduler over pluggable perception providers
//! - Tear-free snapshots for render loops and event sinks for hosts

pub mod clock;
pub mod config;
pub mod engagement;
pub mod engine;
pub mod error;
pub mod intent;
pub mod metrics;
pub mod pinch;
pub mod pointer;
pub mod provider;
pub mod scroll;
pub mod sink;
pub mod snapshot;

pub use clock::{Clock, ManualClock, MonotonicTimestamp, SystemClock};
pub use config::EngineConfig;
pub use engagement::{classify, EngagementClassifier, EngagementLog, EngagementThresholds};
pub use engine::{GestureEngine, SkipReason, TickOutcome, TickReport};
pub use error::{EngineError, EngineResult};
pub use intent::{action_for, GestureIntentMachine, IntentState, Trigger, ACTION_TABLE};
pub use pinch::{PinchClickSynthesizer, PinchUpdate};
pub use pointer::{CursorState, PointerTracker};
pub use provider::{
    BoxedSource, FaceProvider, HandProvider, PerceptionProvider, Providers, VideoSource,
};
pub use scroll::{ScrollExtractor, SCROLL_GESTURE};
pub use sink::{ChannelSink, EventSink, RecordingSink};
pub use snapshot::{EngineSnapshot, SnapshotReader};
