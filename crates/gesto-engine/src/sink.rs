//! Event delivery to the host.

use std::sync::{Arc, Mutex};

use gesto_models::EngineEvent;
use tokio::sync::mpsc;

/// Receives engine events synchronously from inside a tick.
///
/// Implementations must return quickly; the tick does not continue until
/// `emit` does.
pub trait EventSink: Send {
    fn emit(&mut self, event: EngineEvent);
}

impl<F> EventSink for F
where
    F: FnMut(EngineEvent) + Send,
{
    fn emit(&mut self, event: EngineEvent) {
        self(event)
    }
}

/// Forwards events into an unbounded channel for an async consumer.
///
/// Events sent after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<EngineEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Collects events in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<EngineEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<EngineEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: EngineEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesto_models::EngineStatus;

    fn status(status: EngineStatus) -> EngineEvent {
        EngineEvent::Status { status }
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |event: EngineEvent| seen.push(event);
            sink.emit(status(EngineStatus::Ready));
        }
        assert_eq!(seen, vec![status(EngineStatus::Ready)]);
    }

    #[test]
    fn test_recording_sink_shares_buffer() {
        let sink = RecordingSink::new();
        let mut writer = sink.clone();
        writer.emit(status(EngineStatus::Initializing));
        writer.emit(status(EngineStatus::Ready));
        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.drain().len(), 2);
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn test_channel_sink() {
        let (mut sink, mut rx) = ChannelSink::new();
        sink.emit(status(EngineStatus::NoCamera));
        assert_eq!(rx.recv().await, Some(status(EngineStatus::NoCamera)));

        drop(rx);
        // Receiver gone, emit is silently dropped
        sink.emit(status(EngineStatus::Error));
    }
}
