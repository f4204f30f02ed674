//! Small numeric helpers shared by the metric stages.

/// Round `value` to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Shannon entropy of `weights` normalized by `ln(k)`, in `[0, 1]`.
///
/// Returns 0 for fewer than two weights or a non-positive total.
pub fn normalized_entropy(weights: &[f64]) -> f64 {
    if weights.len() < 2 {
        return 0.0;
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return 0.0;
    }

    let entropy: f64 = weights
        .iter()
        .map(|w| w / total)
        .filter(|p| *p > 0.0)
        .map(|p| -p * p.ln())
        .sum();

    (entropy / (weights.len() as f64).ln()).clamp(0.0, 1.0)
}

/// `part / whole`, or `fallback` when `whole` is zero.
pub fn ratio_or(part: usize, whole: usize, fallback: f64) -> f64 {
    if whole == 0 {
        fallback
    } else {
        part as f64 / whole as f64
    }
}
