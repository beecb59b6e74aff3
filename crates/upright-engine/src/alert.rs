//! Debounced posture alerts.
//!
//! The monitoring loop classifies at frame rate, so a sustained slouch
//! would otherwise trigger the alert sink tens of times per second. The
//! controller enforces a cooldown between firings: a suppressed alert is
//! dropped, never buffered or replayed.

use upright_core::{AlertSink, MonitorConfig, Timestamp, Verdict};

/// Rate-limited trigger for the external alert sink.
#[derive(Debug, Default)]
pub struct AlertController {
    last_alert: Option<Timestamp>,
}

impl AlertController {
    /// Creates a controller with no alert history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the alert sink if the verdict and cooldown allow it.
    ///
    /// Fires iff the verdict is `Bad`, sound is enabled, and more than
    /// `warning_wait_secs` have passed since the previous firing. Returns
    /// whether the sink was triggered.
    #[allow(clippy::cast_precision_loss)]
    pub fn maybe_alert(
        &mut self,
        verdict: Verdict,
        now: Timestamp,
        config: &MonitorConfig,
        sink: &mut dyn AlertSink,
    ) -> bool {
        if !verdict.is_bad() || !config.sound_enabled {
            return false;
        }

        let cooled_down = match self.last_alert {
            Some(last) => now.duration_since(&last) > config.warning_wait_secs as f64,
            None => true,
        };
        if !cooled_down {
            return false;
        }

        self.last_alert = Some(now);
        sink.play();
        tracing::debug!(
            cooldown_secs = config.warning_wait_secs,
            "posture alert fired"
        );
        true
    }

    /// Time of the most recent firing, if any.
    #[must_use]
    pub fn last_alert(&self) -> Option<Timestamp> {
        self.last_alert
    }

    /// Clears the alert history.
    pub fn reset(&mut self) {
        self.last_alert = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSink {
        plays: usize,
    }

    impl AlertSink for CountingSink {
        fn play(&mut self) {
            self.plays += 1;
        }
    }

    fn ts(secs: f64) -> Timestamp {
        Timestamp::from_secs_f64(secs)
    }

    fn make_config(warning_wait_secs: u64, sound_enabled: bool) -> MonitorConfig {
        MonitorConfig {
            warning_wait_secs,
            sound_enabled,
            ..MonitorConfig::default()
        }
    }

    #[test]
    fn first_bad_verdict_fires() {
        let mut controller = AlertController::new();
        let mut sink = CountingSink { plays: 0 };
        let fired = controller.maybe_alert(Verdict::Bad, ts(10.0), &make_config(3, true), &mut sink);
        assert!(fired);
        assert_eq!(sink.plays, 1);
    }

    #[test]
    fn good_and_unknown_never_fire() {
        let mut controller = AlertController::new();
        let mut sink = CountingSink { plays: 0 };
        let config = make_config(3, true);
        assert!(!controller.maybe_alert(Verdict::Good, ts(10.0), &config, &mut sink));
        assert!(!controller.maybe_alert(Verdict::Unknown, ts(11.0), &config, &mut sink));
        assert_eq!(sink.plays, 0);
    }

    #[test]
    fn sound_disabled_suppresses_all_alerts() {
        let mut controller = AlertController::new();
        let mut sink = CountingSink { plays: 0 };
        let config = make_config(3, false);
        for i in 0..20 {
            controller.maybe_alert(Verdict::Bad, ts(f64::from(i)), &config, &mut sink);
        }
        assert_eq!(sink.plays, 0);
    }

    #[test]
    fn never_fires_twice_within_cooldown() {
        let mut controller = AlertController::new();
        let mut sink = CountingSink { plays: 0 };
        let config = make_config(3, true);

        // Bad verdicts at frame rate for 10 seconds.
        let mut t = 0.0;
        while t < 10.0 {
            controller.maybe_alert(Verdict::Bad, ts(t), &config, &mut sink);
            t += 0.033;
        }

        // Cooldown of 3s over 10s permits at most 4 firings (0, >3, >6, >9).
        assert!(sink.plays <= 4, "fired {} times", sink.plays);
        assert!(sink.plays >= 3, "fired only {} times", sink.plays);
    }

    #[test]
    fn fires_again_after_cooldown() {
        let mut controller = AlertController::new();
        let mut sink = CountingSink { plays: 0 };
        let config = make_config(3, true);

        assert!(controller.maybe_alert(Verdict::Bad, ts(0.0), &config, &mut sink));
        assert!(!controller.maybe_alert(Verdict::Bad, ts(3.0), &config, &mut sink));
        assert!(controller.maybe_alert(Verdict::Bad, ts(3.1), &config, &mut sink));
        assert_eq!(sink.plays, 2);
    }

    #[test]
    fn suppressed_alerts_are_dropped_not_queued() {
        let mut controller = AlertController::new();
        let mut sink = CountingSink { plays: 0 };
        let config = make_config(3, true);

        controller.maybe_alert(Verdict::Bad, ts(0.0), &config, &mut sink);
        for i in 1..30 {
            controller.maybe_alert(Verdict::Bad, ts(0.0 + f64::from(i) * 0.05), &config, &mut sink);
        }
        // Posture recovers; much later a single bad verdict fires exactly once.
        assert!(controller.maybe_alert(Verdict::Bad, ts(60.0), &config, &mut sink));
        assert_eq!(sink.plays, 2);
    }

    #[test]
    fn reset_clears_history() {
        let mut controller = AlertController::new();
        let mut sink = CountingSink { plays: 0 };
        let config = make_config(3, true);
        controller.maybe_alert(Verdict::Bad, ts(0.0), &config, &mut sink);
        assert!(controller.last_alert().is_some());
        controller.reset();
        assert!(controller.last_alert().is_none());
    }
}
