//! Latest engine state for hosts that render on their own schedule.
//!
//! The tick publishes a whole new [`EngineSnapshot`] each time, replacing the
//! previous one inside a `tokio::sync::watch` channel. A reader running in a
//! different scheduling context therefore sees either the old or the new
//! record, never a mix of the two.

use gesto_models::{EngagementState, EngineStatus, GestureLabel};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::pointer::CursorState;

/// Immutable view of the engine after a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub cursor: CursorState,
    pub pinching: bool,
    /// Whether a hand was tracked on the last processed tick.
    pub hand_present: bool,
    /// Confident top gesture of the last processed tick, mapped or not.
    pub detected_gesture: Option<GestureLabel>,
    /// Dwell progress of the current hold in `[0, 100]`.
    pub progress: f32,
    pub engagement: EngagementState,
    pub status: EngineStatus,
    /// Provider timestamp of the last processed tick.
    pub timestamp_ms: Option<u64>,
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            cursor: CursorState::CENTER,
            pinching: false,
            hand_present: false,
            detected_gesture: None,
            progress: 0.0,
            engagement: EngagementState::Neutral,
            status: EngineStatus::Initializing,
            timestamp_ms: None,
        }
    }
}

/// Write side, owned by the engine.
#[derive(Debug)]
pub(crate) struct SnapshotPublisher {
    tx: watch::Sender<EngineSnapshot>,
}

impl SnapshotPublisher {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(EngineSnapshot::default());
        Self { tx }
    }

    pub(crate) fn publish(&self, snapshot: EngineSnapshot) {
        // Succeeds with or without readers
        self.tx.send_replace(snapshot);
    }

    pub(crate) fn current(&self) -> EngineSnapshot {
        self.tx.borrow().clone()
    }

    pub(crate) fn reader(&self) -> SnapshotReader {
        SnapshotReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read side, cloneable and `Send`, handed to the host.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<EngineSnapshot>,
}

impl SnapshotReader {
    /// Most recently published snapshot.
    pub fn latest(&self) -> EngineSnapshot {
        self.rx.borrow().clone()
    }

    /// Wait for the next publish. Returns `None` once the engine is dropped.
    pub async fn changed(&mut self) -> Option<EngineSnapshot> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_sees_latest_publish() {
        let publisher = SnapshotPublisher::new();
        let reader = publisher.reader();
        assert_eq!(reader.latest(), EngineSnapshot::default());

        let snapshot = EngineSnapshot {
            cursor: CursorState { x: 0.1, y: 0.9 },
            pinching: true,
            ..Default::default()
        };
        publisher.publish(snapshot.clone());
        assert_eq!(reader.latest(), snapshot);
        assert_eq!(publisher.current(), snapshot);
    }

    #[test]
    fn test_publish_without_readers() {
        let publisher = SnapshotPublisher::new();
        publisher.publish(EngineSnapshot {
            status: EngineStatus::Ready,
            ..Default::default()
        });
        assert_eq!(publisher.current().status, EngineStatus::Ready);
    }

    #[tokio::test]
    async fn test_changed_wakes_reader() {
        let publisher = SnapshotPublisher::new();
        let mut reader = publisher.reader();

        let handle = tokio::spawn(async move { reader.changed().await });
        publisher.publish(EngineSnapshot {
            progress: 42.0,
            ..Default::default()
        });

        let seen = handle.await.unwrap().unwrap();
        assert_eq!(seen.progress, 42.0);

        let mut orphan = publisher.reader();
        drop(publisher);
        assert!(orphan.changed().await.is_none());
    }
}
