//! Scalar helpers shared by the vector, quaternion and transform types

/// Tolerance used for "nearly zero" comparisons throughout the engine
pub const EPSILON: f32 = 0.0001;

/// Check whether a value is within [`EPSILON`] of zero
#[inline]
pub fn near_zero(val: f32) -> bool {
    near_zero_eps(val, EPSILON)
}

/// Check whether a value is within `epsilon` of zero (exclusive)
#[inline]
pub fn near_zero_eps(val: f32, epsilon: f32) -> bool {
    val == 0.0 || val.abs() < epsilon
}

/// Clamp `val` into `[min, max]`
///
/// Unlike `f32::clamp` this never panics: when `min > max` the result is `min`.
#[inline]
pub fn clamp(val: f32, min: f32, max: f32) -> f32 {
    val.min(max).max(min)
}

/// Pick the canonical unit axis for a vector too short to normalize.
///
/// The component with the largest magnitude wins; ties go to the earlier
/// component. Returns the winning index and its sign (`+1` for zero).
pub(crate) fn snap_to_axis(components: &[f32]) -> (usize, f32) {
    let mut best = 0;
    for (i, c) in components.iter().enumerate().skip(1) {
        if c.abs() > components[best].abs() {
            best = i;
        }
    }
    let sign = if components.get(best).copied().unwrap_or(0.0) >= 0.0 { 1.0 } else { -1.0 };
    (best, sign)
}
