//! Drives the engine over a trace.

use std::time::Duration;

use gesto_engine::{EngineSnapshot, EventSink, GestureEngine, ManualClock, TickOutcome};
use gesto_models::{ClassroomStats, EngagementEntry};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ReplayConfig;
use crate::error::ReplayResult;
use crate::recorded::{recorded_providers, TraceSource};
use crate::trace::TraceFrame;

/// Totals of one replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub session_id: String,
    pub frames: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub triggers: usize,
    pub clicks: usize,
    pub scroll_events: usize,
    pub engagement: Vec<EngagementEntry>,
    /// Dashboard view of this learner as a one-student class.
    pub classroom: ClassroomStats,
    pub final_snapshot: EngineSnapshot,
}

/// Replay `frames` through a fresh engine, delivering events to `sink`.
pub async fn run_trace(
    config: &ReplayConfig,
    frames: Vec<TraceFrame>,
    sink: impl EventSink + 'static,
) -> ReplayResult<ReplaySummary> {
    let clock = ManualClock::new(frames.first().map(|f| f.timestamp_ms).unwrap_or(0));
    let timestamps: Vec<u64> = frames.iter().map(|f| f.timestamp_ms).collect();

    let mut engine = GestureEngine::new(config.engine.clone(), sink)?.with_clock(clock.clone());
    engine.install_providers(Ok(recorded_providers()));
    engine.attach_source(Ok(Box::new(TraceSource::new(frames, clock))));

    info!(
        session_id = engine.session_id(),
        frames = timestamps.len(),
        realtime = config.realtime,
        "Replaying trace"
    );

    let mut classroom = ClassroomStats::new(config.lesson_seconds);
    classroom.set_connected_peers(1);

    let mut summary = ReplaySummary {
        session_id: engine.session_id().to_string(),
        frames: timestamps.len(),
        processed: 0,
        skipped: 0,
        failed: 0,
        triggers: 0,
        clicks: 0,
        scroll_events: 0,
        engagement: Vec::new(),
        classroom: classroom.clone(),
        final_snapshot: engine.snapshot(),
    };

    let mut previous_ms: Option<u64> = None;
    let mut elapsed_ms = 0u64;
    let mut counted_seconds = 0u64;

    for &timestamp_ms in &timestamps {
        if let Some(previous) = previous_ms {
            let gap = timestamp_ms.saturating_sub(previous);
            elapsed_ms += gap;
            if config.realtime && gap > 0 {
                let scaled = gap as f64 / config.speed;
                tokio::time::sleep(Duration::from_secs_f64(scaled / 1000.0)).await;
            }
        }
        previous_ms = Some(timestamp_ms);

        while counted_seconds < elapsed_ms / 1000 {
            classroom.tick_second();
            counted_seconds += 1;
        }

        match engine.tick() {
            TickOutcome::Processed(report) => {
                summary.processed += 1;
                summary.triggers += usize::from(report.trigger.is_some());
                summary.clicks += usize::from(report.click);
                summary.scroll_events += usize::from(report.scroll_delta.is_some());
                if let Some(entry) = report.engagement_change {
                    classroom.apply_engagement_update(entry.state);
                }
            }
            TickOutcome::Skipped(reason) => {
                debug!(?reason, timestamp_ms, "Frame skipped");
                summary.skipped += 1;
            }
            TickOutcome::Failed(_) => summary.failed += 1,
        }
    }

    summary.engagement = engine.engagement_history();
    summary.final_snapshot = engine.snapshot();
    summary.classroom = classroom;
    engine.close();

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        failed = summary.failed,
        triggers = summary.triggers,
        lesson_remaining = %summary.classroom.remaining_display(),
        "Replay finished"
    );
    Ok(summary)
}
