//! Trace replay host for the gesto engine.
//!
//! Feeds recorded perception output through [`gesto_engine::GestureEngine`]
//! exactly as a live camera host would: one frame per tick, recorded
//! timestamps on the engine clock, providers that enforce strictly
//! increasing timestamps.

pub mod cli;
pub mod config;
pub mod error;
pub mod recorded;
pub mod runner;
pub mod trace;

pub use cli::Cli;
pub use config::ReplayConfig;
pub use error::{ReplayError, ReplayResult};
pub use recorded::{recorded_providers, RecordedFace, RecordedHands, TraceSource};
pub use runner::{run_trace, ReplaySummary};
pub use trace::{load_trace, parse_trace, to_jsonl, TraceFrame};
