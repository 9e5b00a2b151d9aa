//! Error types for engine operations.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while running the gesture engine.
///
/// None of these are fatal to the host: setup failures surface as a status
/// change, per-tick failures abort only the current tick.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Perception model failed to load: {0}")]
    ProviderLoad(String),

    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("Perception provider '{provider}' failed: {message}")]
    ProviderFailed { provider: String, message: String },

    #[error("Timestamp {timestamp_ms} is not after previous {previous_ms}")]
    NonMonotonicTimestamp { timestamp_ms: u64, previous_ms: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Create a model load failure error.
    pub fn provider_load(message: impl Into<String>) -> Self {
        Self::ProviderLoad(message.into())
    }

    /// Create a camera failure error.
    pub fn camera_unavailable(message: impl Into<String>) -> Self {
        Self::CameraUnavailable(message.into())
    }

    /// Create a per-call provider failure error.
    pub fn provider_failed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderFailed {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if the error only affects the current tick.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EngineError::ProviderFailed { .. } | EngineError::NonMonotonicTimestamp { .. }
        )
    }
}
