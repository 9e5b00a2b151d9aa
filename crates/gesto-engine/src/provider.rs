//! Perception provider and video source seams.
//!
//! The engine never computes landmarks itself. It is handed two instances of
//! the same [`PerceptionProvider`] trait, one producing hands and one
//! producing faces, and a [`VideoSource`] that yields the frames both are
//! run on. The frame type is opaque to the engine.

use gesto_models::{Detection, FaceObservation, HandObservation};

use crate::error::EngineResult;

/// A black-box landmark model run synchronously on one frame.
///
/// Implementations must accept strictly increasing `timestamp_ms` values and
/// return `Detection::Absent` (not an error) when nothing is visible.
pub trait PerceptionProvider<F>: Send {
    type Output;

    /// Provider name for logs and error messages.
    fn name(&self) -> &'static str;

    /// Run the model on a frame.
    fn detect(&mut self, frame: &F, timestamp_ms: u64) -> EngineResult<Detection<Self::Output>>;

    /// Release model resources. Called once when the engine closes.
    fn close(&mut self) {}
}

/// Hand recognizer instance of the provider trait.
pub type HandProvider<F> = Box<dyn PerceptionProvider<F, Output = HandObservation>>;

/// Face landmarker instance of the provider trait.
pub type FaceProvider<F> = Box<dyn PerceptionProvider<F, Output = FaceObservation>>;

/// The pair of loaded models.
pub struct Providers<F> {
    pub hands: HandProvider<F>,
    pub face: FaceProvider<F>,
}

impl<F> Providers<F> {
    pub fn new(hands: HandProvider<F>, face: FaceProvider<F>) -> Self {
        Self { hands, face }
    }

    pub(crate) fn close(&mut self) {
        self.hands.close();
        self.face.close();
    }
}

/// Camera or other frame source polled once per tick.
pub trait VideoSource: Send {
    type Frame;

    /// The current decodable frame, or `None` while the source is paused,
    /// ended, or has not buffered enough data yet.
    fn current_frame(&mut self) -> Option<Self::Frame>;

    /// Stop capture and release the device.
    fn release(&mut self) {}
}

/// Boxed video source yielding frames of type `F`.
pub type BoxedSource<F> = Box<dyn VideoSource<Frame = F>>;
