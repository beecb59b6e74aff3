//! Engine configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Valid range for the static posture threshold.
pub const THRESHOLD_RANGE: (f64, f64) = (0.5, 1.0);
/// Valid range for the calibration strictness multiplier.
pub const STRICTNESS_RANGE: (f64, f64) = (0.5, 1.0);
/// Valid range for the alert cooldown, in seconds.
pub const WARNING_WAIT_RANGE: (u64, u64) = (1, 10);
/// Valid range for the calibration window, in seconds.
pub const CALIBRATION_DURATION_RANGE: (u64, u64) = (2, 10);

/// Immutable-per-session monitor configuration.
///
/// The presentation layer enforces the valid ranges at input time; the
/// engine additionally normalizes whatever it receives via [`clamped`]
/// rather than propagating an invalid state (a negative cooldown, a
/// strictness above 1).
///
/// [`clamped`]: MonitorConfig::clamped
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonitorConfig {
    /// Static good/bad threshold, used until a calibration succeeds.
    pub posture_threshold: f64,
    /// Multiplier on the calibration baseline, in (0, 1].
    pub posture_strictness: f64,
    /// Minimum seconds between two audio alerts.
    pub warning_wait_secs: u64,
    /// Length of the calibration collection window in seconds.
    pub calibration_duration_secs: u64,
    /// Whether bad posture triggers the alert sink at all.
    pub sound_enabled: bool,
    /// Mean-brightness floor below which a lighting warning is raised.
    pub brightness_threshold: f64,
    /// Maximum number of aggregated points retained in the history log.
    pub log_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            posture_threshold: 0.75,
            posture_strictness: 0.85,
            warning_wait_secs: 3,
            calibration_duration_secs: 3,
            sound_enabled: true,
            brightness_threshold: 40.0,
            log_capacity: 14_400,
        }
    }
}

impl MonitorConfig {
    /// Returns a copy with every field forced into its valid range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            posture_threshold: self.posture_threshold.clamp(THRESHOLD_RANGE.0, THRESHOLD_RANGE.1),
            posture_strictness: self
                .posture_strictness
                .clamp(STRICTNESS_RANGE.0, STRICTNESS_RANGE.1),
            warning_wait_secs: self
                .warning_wait_secs
                .clamp(WARNING_WAIT_RANGE.0, WARNING_WAIT_RANGE.1),
            calibration_duration_secs: self
                .calibration_duration_secs
                .clamp(CALIBRATION_DURATION_RANGE.0, CALIBRATION_DURATION_RANGE.1),
            sound_enabled: self.sound_enabled,
            brightness_threshold: self.brightness_threshold.max(0.0),
            log_capacity: self.log_capacity.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let config = MonitorConfig::default();
        assert_eq!(config, config.clamped());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = MonitorConfig {
            posture_threshold: 2.0,
            posture_strictness: 0.1,
            warning_wait_secs: 0,
            calibration_duration_secs: 120,
            sound_enabled: true,
            brightness_threshold: -5.0,
            log_capacity: 0,
        }
        .clamped();

        assert!((config.posture_threshold - 1.0).abs() < f64::EPSILON);
        assert!((config.posture_strictness - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.warning_wait_secs, 1);
        assert_eq!(config.calibration_duration_secs, 10);
        assert!((config.brightness_threshold - 0.0).abs() < f64::EPSILON);
        assert_eq!(config.log_capacity, 1);
    }

    #[test]
    fn in_range_values_are_untouched() {
        let config = MonitorConfig {
            posture_threshold: 0.6,
            posture_strictness: 0.9,
            warning_wait_secs: 5,
            calibration_duration_secs: 4,
            sound_enabled: false,
            brightness_threshold: 30.0,
            log_capacity: 1800,
        };
        assert_eq!(config, config.clamped());
    }
}
