//! Contracts with the engine's external collaborators.
//!
//! The monitoring engine does not capture video, estimate poses, or play
//! audio itself. It drives implementations of these traits, which lets the
//! whole engine run against scripted stand-ins under test.
//!
//! All traits are `Send` because the worker thread takes ownership of the
//! collaborators for the lifetime of the monitoring loop.

use crate::error::CaptureError;
use crate::types::{Frame, LandmarkFrame};

/// A source of video frames (typically a camera).
///
/// `read_frame` is allowed to block for the duration of one capture tick;
/// the engine runs it on a dedicated worker. A failed read moves the
/// engine into its disconnected state, where it calls [`reopen`] with
/// backoff until frames flow again.
///
/// [`reopen`]: CaptureSource::reopen
pub trait CaptureSource: Send {
    /// Reads the next frame.
    ///
    /// # Errors
    ///
    /// Returns a [`CaptureError`] when no frame could be produced; the
    /// engine treats every capture error as recoverable.
    fn read_frame(&mut self) -> Result<Frame, CaptureError>;

    /// Mean brightness of a frame (grayscale mean, 0-255 scale).
    fn brightness(&self, frame: &Frame) -> f64;

    /// Releases and reacquires the underlying device.
    ///
    /// # Errors
    ///
    /// Returns a [`CaptureError`] if the device could not be reopened;
    /// the engine will retry after a delay.
    fn reopen(&mut self) -> Result<(), CaptureError>;
}

/// A pose estimation provider.
pub trait PoseEstimator: Send {
    /// Estimates body landmarks for a frame.
    ///
    /// Returns `None` when no subject is detected.
    fn estimate(&mut self, frame: &Frame) -> Option<LandmarkFrame>;
}

/// An alert playback sink.
///
/// Fire-and-forget: the engine decides *when* to alert and never consumes
/// a result from the sink.
pub trait AlertSink: Send {
    /// Plays the alert.
    fn play(&mut self);
}
