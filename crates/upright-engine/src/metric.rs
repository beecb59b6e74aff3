//! Posture metric extraction.
//!
//! The posture signal is the vertical offset between the shoulder midpoint
//! and the nose, normalized by shoulder width. Normalizing by the shoulder
//! span makes the ratio invariant to the subject's distance from the
//! camera: a larger ratio means the head sits higher relative to the
//! shoulders, a smaller or negative one means a forward/drooping head.
//!
//! No smoothing is applied here; noise reduction is the aggregator's job.

use upright_core::LandmarkFrame;

/// Minimum horizontal shoulder separation for a usable metric.
///
/// Below this the subject is too far away, occluded, or turned sideways,
/// and the ratio denominator approaches zero.
pub const MIN_SHOULDER_SPAN: f64 = 0.1;

/// Derives the posture ratio from a landmark frame.
///
/// Returns `None` when the shoulders are not reliably separated in x
/// (span below [`MIN_SHOULDER_SPAN`]). Pure: no state, no side effects.
#[must_use]
pub fn posture_ratio(frame: &LandmarkFrame) -> Option<f64> {
    let left = frame.left_shoulder();
    let right = frame.right_shoulder();

    let span = (left.x - right.x).abs();
    if span < MIN_SHOULDER_SPAN {
        return None;
    }

    let shoulder_y = f64::midpoint(left.y, right.y);
    Some((shoulder_y - frame.nose().y) / span)
}
