//! Linear range mapping and clamping helpers used by the animation
//! strategies.

/// Linearly map `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Values outside the input range extrapolate. A degenerate input range
/// (`in_min == in_max`) maps everything to `out_max`.
#[inline]
#[must_use]
pub fn map_range(
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
    value: f64,
) -> f64 {
    if in_min == in_max {
        return out_max;
    }
    ((value - in_min) / (in_max - in_min)) * (out_max - out_min) + out_min
}

/// Clamp `value` to `[min, max]`. Assumes `min <= max`.
#[inline]
#[must_use]
pub fn clamp(min: f64, max: f64, value: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// [`map_range`] followed by a clamp to the output range.
///
/// The output bounds may be given in either order; the result always lies
/// between them.
#[inline]
#[must_use]
pub fn map_range_clamp(
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
    value: f64,
) -> f64 {
    let mapped = map_range(in_min, in_max, out_min, out_max, value);
    clamp(out_min.min(out_max), out_min.max(out_max), mapped)
}
