//! JSON-lines perception traces.
//!
//! One record per line:
//!
//! ```json
//! {"timestamp_ms": 16, "ready": true, "hands": {"landmarkSets": [...], "gestureRankings": [...]}, "face": {"blendshapeSets": [...], "transforms": [...]}}
//! ```
//!
//! `ready` defaults to true; `false` models a video element that has no
//! decodable frame yet. Missing `hands`/`face` mean the provider saw nothing.
//! Blank lines and lines starting with `#` are ignored.

use std::path::Path;

use gesto_models::{FaceResult, HandResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReplayError, ReplayResult};

/// One recorded video frame with the provider output seen for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    /// Host wall-clock time of the frame.
    pub timestamp_ms: u64,
    #[serde(default = "default_ready")]
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hands: Option<HandResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<FaceResult>,
}

fn default_ready() -> bool {
    true
}

impl TraceFrame {
    pub fn new(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            ready: true,
            hands: None,
            face: None,
        }
    }

    pub fn with_hands(mut self, hands: HandResult) -> Self {
        self.hands = Some(hands);
        self
    }

    pub fn with_face(mut self, face: FaceResult) -> Self {
        self.face = Some(face);
        self
    }

    pub fn not_ready(mut self) -> Self {
        self.ready = false;
        self
    }
}

/// Parse a trace from JSON-lines text.
pub fn parse_trace(text: &str) -> ReplayResult<Vec<TraceFrame>> {
    let mut frames = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let frame = serde_json::from_str(line).map_err(|source| ReplayError::TraceParse {
            line: index + 1,
            source,
        })?;
        frames.push(frame);
    }

    if frames.is_empty() {
        return Err(ReplayError::EmptyTrace);
    }
    Ok(frames)
}

/// Read and parse a trace file.
pub async fn load_trace(path: &Path) -> ReplayResult<Vec<TraceFrame>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ReplayError::io(path, e))?;
    let frames = parse_trace(&text)?;
    debug!(path = %path.display(), frames = frames.len(), "Loaded trace");
    Ok(frames)
}

/// Serialize frames back to JSON-lines text.
pub fn to_jsonl(frames: &[TraceFrame]) -> ReplayResult<String> {
    let mut out = String::new();
    for frame in frames {
        out.push_str(&serde_json::to_string(frame)?);
        out.push('\n');
    }
    Ok(out)
}
