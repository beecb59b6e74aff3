//! Per-second aggregation of the raw ratio stream.
//!
//! The metric arrives at frame rate (tens of samples per second); the
//! history log stores one averaged point per wall-clock second. Frames
//! with no usable ratio are never fed in, so they neither count toward
//! nor reset the average, and seconds with no subject produce gaps in
//! the log rather than synthetic zero points.

use upright_core::{AggregatedPoint, Timestamp};

/// Reduces a high-rate ratio stream to one mean sample per second.
#[derive(Debug, Default)]
pub struct SecondAggregator {
    window_start: Option<Timestamp>,
    buffer: Vec<f64>,
}

impl SecondAggregator {
    /// Creates an aggregator with an empty accumulation window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one valid ratio observed at `now`.
    ///
    /// Returns an [`AggregatedPoint`] when a full second of accumulation
    /// is complete; the caller appends it to the history log. The current
    /// ratio always lands in the window that starts (or continues) at
    /// `now`, so a point only ever averages ratios from its own window.
    #[allow(clippy::cast_precision_loss)]
    pub fn observe(&mut self, ratio: f64, now: Timestamp) -> Option<AggregatedPoint> {
        let emitted = match self.window_start {
            None => {
                self.window_start = Some(now);
                None
            }
            Some(start) if now.duration_since(&start) >= 1.0 => {
                let point = if self.buffer.is_empty() {
                    // No valid ratio all window; restart without emitting.
                    None
                } else {
                    let mean = self.buffer.iter().sum::<f64>() / self.buffer.len() as f64;
                    self.buffer.clear();
                    Some(AggregatedPoint {
                        timestamp: now,
                        ratio: mean,
                    })
                };
                self.window_start = Some(now);
                point
            }
            Some(_) => None,
        };

        self.buffer.push(ratio);
        emitted
    }

    /// Number of ratios buffered in the current window.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Discards the current window and buffer.
    pub fn reset(&mut self) {
        self.window_start = None;
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(secs: f64) -> Timestamp {
        Timestamp::from_secs_f64(secs)
    }

    #[test]
    fn no_emission_within_first_second() {
        let mut agg = SecondAggregator::new();
        assert!(agg.observe(0.8, ts(0.0)).is_none());
        assert!(agg.observe(0.8, ts(0.5)).is_none());
        assert!(agg.observe(0.8, ts(0.99)).is_none());
        assert_eq!(agg.pending(), 3);
    }

    #[test]
    fn emits_mean_after_one_second() {
        let mut agg = SecondAggregator::new();
        agg.observe(0.6, ts(0.0));
        agg.observe(0.8, ts(0.5));
        let point = agg.observe(0.7, ts(1.0)).unwrap();
        assert!((point.ratio - 0.7).abs() < 1e-9, "mean was {}", point.ratio);
        assert!((point.timestamp.as_secs_f64() - 1.0).abs() < 1e-6);
        // The boundary sample starts the next window.
        assert_eq!(agg.pending(), 1);
    }

    #[test]
    fn constant_stream_emits_one_equal_point_per_second() {
        let mut agg = SecondAggregator::new();
        let mut points = Vec::new();

        // 30 fps constant-ratio stream for 10 seconds.
        let mut t = 0.0;
        while t < 10.0 {
            if let Some(p) = agg.observe(0.85, ts(t)) {
                points.push(p);
            }
            t += 1.0 / 30.0;
        }

        assert!(
            (9..=10).contains(&points.len()),
            "expected ~10 points, got {}",
            points.len()
        );
        for p in &points {
            assert!((p.ratio - 0.85).abs() < 1e-9);
        }
    }

    #[test]
    fn emitted_timestamps_are_monotonic() {
        let mut agg = SecondAggregator::new();
        let mut last: Option<Timestamp> = None;
        let mut t = 0.0;
        while t < 5.0 {
            if let Some(p) = agg.observe(0.8, ts(t)) {
                if let Some(prev) = last {
                    assert!(p.timestamp > prev);
                }
                last = Some(p.timestamp);
            }
            t += 0.1;
        }
        assert!(last.is_some());
    }

    #[test]
    fn gap_in_detection_restarts_window_without_emission() {
        let mut agg = SecondAggregator::new();
        agg.observe(0.8, ts(0.0));
        let point = agg.observe(0.8, ts(1.0)).unwrap();
        assert!((point.ratio - 0.8).abs() < 1e-9);

        // Subject leaves the frame for 5 seconds; the sample after the gap
        // averages the pre-gap boundary sample, and the window restarts.
        let resumed = agg.observe(0.6, ts(6.0));
        assert!(resumed.is_some());
        assert!((resumed.unwrap().ratio - 0.8).abs() < 1e-9);

        // The post-gap window now accumulates only post-gap samples.
        agg.observe(0.6, ts(6.5));
        let next = agg.observe(0.6, ts(7.0)).unwrap();
        assert!((next.ratio - 0.6).abs() < 1e-9);
    }

    #[test]
    fn reset_discards_pending_window() {
        let mut agg = SecondAggregator::new();
        agg.observe(0.8, ts(0.0));
        agg.observe(0.8, ts(0.5));
        agg.reset();
        assert_eq!(agg.pending(), 0);
        // A full second after reset is needed before the next emission.
        assert!(agg.observe(0.7, ts(0.6)).is_none());
        assert!(agg.observe(0.7, ts(1.5)).is_none());
        assert!(agg.observe(0.7, ts(1.7)).is_some());
    }
}
