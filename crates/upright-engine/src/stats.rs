//! Summary statistics over the aggregated posture log.
//!
//! Each aggregated point represents one second of monitoring. The covered
//! duration is therefore the timestamp span plus the final point's own
//! second, so that N contiguous points count as N seconds (and a log of
//! all-good points reports exactly 100% good).
//!
//! Streaks require temporal adjacency, not just list adjacency: a gap of
//! more than [`STREAK_GAP_SECS`] between consecutive points (the subject
//! left the frame) breaks a good streak.

use upright_core::{AggregatedPoint, PostureStats, ThresholdPolicy};

/// Maximum timestamp gap between consecutive points that still counts as
/// a contiguous run.
pub const STREAK_GAP_SECS: f64 = 1.5;

/// Computes posture statistics from a log snapshot.
///
/// The snapshot must be in non-decreasing timestamp order (the log's
/// structural invariant). A log with fewer than two points yields
/// zero-valued duration statistics while still reporting the active
/// threshold; nothing here ever divides by zero.
#[must_use]
pub fn compute_stats(points: &[AggregatedPoint], policy: &ThresholdPolicy) -> PostureStats {
    let threshold = policy.effective_threshold();

    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return PostureStats::zeroed(threshold);
    };
    let span = last.timestamp.duration_since(&first.timestamp);
    if span <= 0.0 {
        return PostureStats::zeroed(threshold);
    }
    let total_secs = span + 1.0;

    let mut good_secs = 0.0;
    let mut streak = 0.0_f64;
    let mut longest_streak = 0.0_f64;
    let mut prev: Option<&AggregatedPoint> = None;

    for point in points {
        let gap_broken = prev
            .is_some_and(|p| point.timestamp.duration_since(&p.timestamp) > STREAK_GAP_SECS);
        if gap_broken {
            streak = 0.0;
        }

        if point.ratio > threshold {
            good_secs += 1.0;
            streak += 1.0;
            longest_streak = longest_streak.max(streak);
        } else {
            streak = 0.0;
        }
        prev = Some(point);
    }

    PostureStats {
        total_secs,
        percent_good: (good_secs / total_secs * 100.0).clamp(0.0, 100.0),
        longest_streak_secs: longest_streak,
        active_threshold: threshold,
    }
}
