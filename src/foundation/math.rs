pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Map `v` from `[in_a, in_b]` onto `[out_a, out_b]`, clamping to the output range.
///
/// A zero-width input range maps everything to `out_a`.
pub(crate) fn map_range(v: f64, in_a: f64, in_b: f64, out_a: f64, out_b: f64) -> f64 {
    let span = in_b - in_a;
    if span == 0.0 || !span.is_finite() {
        return out_a;
    }
    lerp(out_a, out_b, clamp01((v - in_a) / span))
}
