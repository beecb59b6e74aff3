//! Baseline calibration.
//!
//! A calibration session collects raw (non-averaged) posture ratios over a
//! fixed wall-clock window. The arithmetic mean of the collected ratios
//! becomes the user's personal "good posture" baseline; the effective
//! threshold is then `baseline * strictness`.
//!
//! Sessions are not restartable mid-flight: the monitoring loop ignores a
//! second calibration request while one is in progress, so two sessions
//! never interleave.

use upright_core::{CalibrationError, Timestamp};

/// A transient collection of posture ratios gathered during the
/// calibration window. Discarded after producing a baseline (or failing
/// to).
#[derive(Debug)]
pub struct CalibrationSession {
    samples: Vec<f64>,
    started: Timestamp,
    duration_secs: u64,
}

impl CalibrationSession {
    /// Begins a new session at `now` lasting `duration_secs`.
    #[must_use]
    pub fn begin(now: Timestamp, duration_secs: u64) -> Self {
        Self {
            samples: Vec::new(),
            started: now,
            duration_secs,
        }
    }

    /// Records one valid posture ratio.
    pub fn add_sample(&mut self, ratio: f64) {
        self.samples.push(ratio);
    }

    /// Whether the collection window has elapsed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn is_elapsed(&self, now: Timestamp) -> bool {
        now.duration_since(&self.started) >= self.duration_secs as f64
    }

    /// Number of ratios collected so far.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Consumes the session and produces the baseline.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::NoSamples`] if no subject was ever
    /// detected during the window; the caller leaves the threshold policy
    /// unchanged in that case.
    #[allow(clippy::cast_precision_loss)]
    pub fn finish(self) -> Result<f64, CalibrationError> {
        if self.samples.is_empty() {
            return Err(CalibrationError::NoSamples);
        }
        let n = self.samples.len() as f64;
        Ok(self.samples.iter().sum::<f64>() / n)
    }
}
