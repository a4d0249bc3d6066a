//! Guarded log-domain primitives for Naive Bayes scoring.

/// ln(x) with non-positive inputs mapped to NEG_INFINITY instead of NaN.
pub fn safe_ln(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return f64::NEG_INFINITY;
    }
    x.ln()
}

/// Additive-smoothed log likelihood: ln((count + alpha) / (label_total + alpha_d)).
///
/// The denominator inflation term `alpha_d` is supplied by the caller;
/// the Naive Bayes model computes it as `alpha * total_token_occurrences`
/// over the whole model. A zero smoothed numerator or denominator yields
/// NEG_INFINITY rather than NaN.
pub fn smoothed_log_likelihood(count: u64, label_total: u64, alpha: f64, alpha_d: f64) -> f64 {
    let numerator = count as f64 + alpha;
    let denominator = label_total as f64 + alpha_d;
    if denominator <= 0.0 {
        return f64::NEG_INFINITY;
    }
    safe_ln(numerator / denominator)
}
