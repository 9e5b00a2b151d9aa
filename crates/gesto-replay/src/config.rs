//! Replay configuration.

use std::path::{Path, PathBuf};

use gesto_engine::EngineConfig;

use crate::cli::Cli;
use crate::error::{ReplayError, ReplayResult};

/// Replay configuration.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Trace to replay
    pub trace_path: PathBuf,
    /// Engine timings and thresholds
    pub engine: EngineConfig,
    /// Sleep between frames to match recorded timing
    pub realtime: bool,
    /// Playback speed multiplier, only used with `realtime`
    pub speed: f64,
    /// Install the Prometheus recorder
    pub metrics: bool,
    /// Lesson length used for the classroom summary in seconds
    pub lesson_seconds: u32,
}

impl ReplayConfig {
    /// Defaults for replaying `trace_path` as fast as possible.
    pub fn new(trace_path: impl Into<PathBuf>) -> Self {
        Self {
            trace_path: trace_path.into(),
            engine: EngineConfig::default(),
            realtime: false,
            speed: 1.0,
            metrics: false,
            lesson_seconds: gesto_models::classroom::DEFAULT_LESSON_SECONDS,
        }
    }

    /// Build from parsed flags, reading the engine config file or the
    /// environment.
    pub async fn from_cli(cli: &Cli) -> ReplayResult<Self> {
        let engine = match (&cli.config, cli.responsive) {
            (Some(path), _) => load_engine_config(path).await?,
            (None, true) => EngineConfig::responsive(),
            (None, false) => EngineConfig::from_env(),
        };
        engine.validate()?;

        let config = Self {
            trace_path: cli.trace.clone(),
            engine,
            realtime: cli.realtime,
            speed: cli.speed,
            metrics: cli.metrics,
            lesson_seconds: std::env::var("GESTO_LESSON_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(gesto_models::classroom::DEFAULT_LESSON_SECONDS),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ReplayResult<()> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ReplayError::invalid_option(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        Ok(())
    }
}

async fn load_engine_config(path: &Path) -> ReplayResult<EngineConfig> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ReplayError::io(path, e))?;
    Ok(EngineConfig::from_json(&text)?)
}
