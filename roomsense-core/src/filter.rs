//! Change-threshold filtering for sampled values
//!
//! Decides whether a new sample differs enough from the last reported
//! one to be worth publishing. Only the light channel is filtered:
//! motion edges are significant by definition and bypass this check.

/// Check whether `new_value` deviates from `last_reported` by more than
/// `threshold`
///
/// Pure predicate over the absolute delta, symmetric in the two value
/// arguments. A delta exactly equal to the threshold is suppressed;
/// only strictly greater deviations report.
pub fn exceeds_delta(new_value: u16, last_reported: u16, threshold: f32) -> bool {
    f32::from(new_value.abs_diff(last_reported)) > threshold
}
