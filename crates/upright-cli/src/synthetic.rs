//! Synthetic collaborators for driving the engine without hardware.
//!
//! The capture source emits empty frames at a fixed rate with a steady
//! brightness; the pose provider scripts a subject whose posture slowly
//! oscillates between upright and slouched, with periodic absences. The
//! alert sink logs instead of playing audio.

use std::f64::consts::TAU;
use std::thread;
use std::time::{Duration, Instant};

use upright_core::types::{Landmark, LandmarkFrame, LEFT_SHOULDER, MIN_LANDMARKS, NOSE, RIGHT_SHOULDER};
use upright_core::{AlertSink, CaptureError, CaptureSource, Frame, PoseEstimator};

/// Frame rate of the synthetic camera.
const FRAME_RATE_HZ: f64 = 30.0;

/// Capture source producing empty frames at [`FRAME_RATE_HZ`].
pub struct SyntheticCamera {
    brightness: f64,
    interval: Duration,
}

impl SyntheticCamera {
    /// Creates a camera with a well-lit feed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            brightness: 128.0,
            interval: Duration::from_secs_f64(1.0 / FRAME_RATE_HZ),
        }
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSource for SyntheticCamera {
    fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        thread::sleep(self.interval);
        Ok(Frame::default())
    }

    fn brightness(&self, _frame: &Frame) -> f64 {
        self.brightness
    }

    fn reopen(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }
}

/// Pose provider scripting a subject that slouches on a cycle.
///
/// The posture ratio follows a sinusoid between `slouched_ratio` and
/// `upright_ratio` over `cycle_secs`. When `absence_secs` is non-zero the
/// subject additionally leaves the frame for that long at the end of
/// every cycle.
pub struct WavingSubject {
    started: Instant,
    upright_ratio: f64,
    slouched_ratio: f64,
    cycle_secs: f64,
    absence_secs: f64,
    hold_secs: f64,
}

impl WavingSubject {
    /// Creates a subject cycling between the given posture extremes.
    #[must_use]
    pub fn new(upright_ratio: f64, slouched_ratio: f64, cycle_secs: f64) -> Self {
        Self {
            started: Instant::now(),
            upright_ratio,
            slouched_ratio,
            cycle_secs: cycle_secs.max(1.0),
            absence_secs: 0.0,
            hold_secs: 0.0,
        }
    }

    /// A subject that holds steady upright posture (for calibration).
    #[must_use]
    pub fn steady(ratio: f64) -> Self {
        Self::new(ratio, ratio, 1.0)
    }

    /// Adds a per-cycle absence from the frame.
    #[must_use]
    pub fn with_absence(mut self, absence_secs: f64) -> Self {
        self.absence_secs = absence_secs.max(0.0);
        self
    }

    /// Holds steady upright posture for the first `hold_secs` before the
    /// cycle begins (long enough to cover a calibration window).
    #[must_use]
    pub fn with_hold(mut self, hold_secs: f64) -> Self {
        self.hold_secs = hold_secs.max(0.0);
        self
    }

    fn ratio_at(&self, elapsed_secs: f64) -> Option<f64> {
        if elapsed_secs < self.hold_secs {
            return Some(self.upright_ratio);
        }
        let phase = (elapsed_secs - self.hold_secs) % (self.cycle_secs + self.absence_secs);
        if phase >= self.cycle_secs {
            return None;
        }
        let mid = f64::midpoint(self.upright_ratio, self.slouched_ratio);
        let amplitude = (self.upright_ratio - self.slouched_ratio) / 2.0;
        Some(mid + amplitude * (TAU * phase / self.cycle_secs).cos())
    }
}

impl PoseEstimator for WavingSubject {
    fn estimate(&mut self, _frame: &Frame) -> Option<LandmarkFrame> {
        let elapsed = self.started.elapsed().as_secs_f64();
        self.ratio_at(elapsed).and_then(|ratio| {
            // Shoulders at y = 0.6, span 0.4; place the nose so the
            // extracted ratio reproduces the scripted value.
            let mut points = vec![Landmark::new(0.0, 0.0); MIN_LANDMARKS];
            points[NOSE] = Landmark::new(0.5, 0.6 - ratio * 0.4);
            points[LEFT_SHOULDER] = Landmark::new(0.7, 0.6);
            points[RIGHT_SHOULDER] = Landmark::new(0.3, 0.6);
            LandmarkFrame::new(points)
        })
    }
}

/// Alert sink that logs instead of playing audio.
#[derive(Debug, Default)]
pub struct LoggingAlert;

impl AlertSink for LoggingAlert {
    fn play(&mut self) {
        tracing::info!("ALERT: fix your posture");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upright_engine::posture_ratio;

    #[test]
    fn scripted_ratio_roundtrips_through_landmarks() {
        let mut subject = WavingSubject::steady(0.9);
        let frame = subject.estimate(&Frame::default()).unwrap();
        let extracted = posture_ratio(&frame).unwrap();
        assert!((extracted - 0.9).abs() < 1e-9, "extracted {extracted}");
    }

    #[test]
    fn cycle_spans_both_extremes() {
        let subject = WavingSubject::new(0.95, 0.55, 10.0);
        let top = subject.ratio_at(0.0).unwrap();
        let bottom = subject.ratio_at(5.0).unwrap();
        assert!((top - 0.95).abs() < 1e-9);
        assert!((bottom - 0.55).abs() < 1e-9);
    }

    #[test]
    fn absence_window_hides_the_subject() {
        let subject = WavingSubject::new(0.95, 0.55, 4.0).with_absence(2.0);
        assert!(subject.ratio_at(1.0).is_some());
        assert!(subject.ratio_at(4.5).is_none());
        assert!(subject.ratio_at(6.5).is_some());
    }
}
