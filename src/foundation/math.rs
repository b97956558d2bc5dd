/// Tolerance used when deciding that two canvas coordinates coincide.
pub(crate) const COINCIDE_EPS: f64 = 1e-6;

/// Clamp `v` into `[lo, hi]`, resolving an empty or NaN range (and a NaN `v`) to `lo`.
///
/// `f64::clamp` panics on inverted or NaN bounds; an element wider than the canvas produces
/// exactly that.
pub(crate) fn clamp_span(v: f64, lo: f64, hi: f64) -> f64 {
    if hi.is_nan() || hi < lo || v.is_nan() {
        return lo;
    }
    v.clamp(lo, hi)
}

/// Strict proximity test used by every snap rule.
pub(crate) fn within(a: f64, b: f64, threshold: f64) -> bool {
    (a - b).abs() < threshold
}

pub(crate) fn coincides(a: f64, b: f64) -> bool {
    (a - b).abs() <= COINCIDE_EPS
}

/// Nearest multiple of `step`; a non-positive step disables rounding.
pub(crate) fn nearest_multiple(v: f64, step: f64) -> f64 {
    if step <= 0.0 || !step.is_finite() {
        return v;
    }
    (v / step).round() * step
}

/// Display zoom factor with a defined fallback for nonsense input.
pub(crate) fn sanitize_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() && zoom > 0.0 {
        zoom
    } else {
        1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
