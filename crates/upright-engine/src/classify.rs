//! Good/bad posture classification.

use upright_core::{ThresholdPolicy, Verdict};

/// Classifies a posture ratio against the active threshold policy.
///
/// A missing ratio is `Unknown`. Otherwise the verdict is `Good` iff the
/// ratio is strictly greater than the effective threshold; equality counts
/// as `Bad`.
#[must_use]
pub fn classify(ratio: Option<f64>, policy: &ThresholdPolicy) -> Verdict {
    match ratio {
        None => Verdict::Unknown,
        Some(r) if r > policy.effective_threshold() => Verdict::Good,
        Some(_) => Verdict::Bad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_ratio_is_unknown() {
        let policy = ThresholdPolicy::Static(0.75);
        assert_eq!(classify(None, &policy), Verdict::Unknown);
    }

    #[test]
    fn above_threshold_is_good() {
        let policy = ThresholdPolicy::Static(0.75);
        assert_eq!(classify(Some(0.9), &policy), Verdict::Good);
    }

    #[test]
    fn below_threshold_is_bad() {
        let policy = ThresholdPolicy::Static(0.75);
        assert_eq!(classify(Some(0.5), &policy), Verdict::Bad);
    }

    #[test]
    fn equality_counts_as_bad() {
        let policy = ThresholdPolicy::Static(0.75);
        assert_eq!(classify(Some(0.75), &policy), Verdict::Bad);
    }

    #[test]
    fn calibrated_policy_uses_scaled_baseline() {
        let policy = ThresholdPolicy::Calibrated {
            baseline: 0.95,
            strictness: 0.85,
        };
        // Effective threshold is 0.8075.
        assert_eq!(classify(Some(0.81), &policy), Verdict::Good);
        assert_eq!(classify(Some(0.80), &policy), Verdict::Bad);
    }
}
