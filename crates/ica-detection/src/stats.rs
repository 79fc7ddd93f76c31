//! Statistical helpers for the detection pipeline

/// Floor applied to zero or non-finite scale estimates
///
/// Degenerate-input guard, not a meaningful statistic: keeps the z-score
/// and template computations total on structurally valid inputs (e.g. a
/// decomposition where every component contributes identically).
pub const SIGMA_FLOOR: f32 = 1e-12;

/// Arithmetic mean
pub fn mean(data: &[f32]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f32>() / data.len() as f32
}

/// Population standard deviation
pub fn population_std_dev(data: &[f32]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }
    let mu = mean(data);
    let variance = data.iter().map(|x| (x - mu).powi(2)).sum::<f32>() / data.len() as f32;
    variance.sqrt()
}

/// Z-scores against the population mean and standard deviation
///
/// A zero (or non-finite) standard deviation is floored to [`SIGMA_FLOOR`];
/// with a constant input vector every score comes out exactly 0.0.
pub fn zscores(data: &[f32]) -> Vec<f32> {
    let mu = mean(data);
    let mut sigma = population_std_dev(data);
    if sigma <= 0.0 || !sigma.is_finite() {
        tracing::debug!(sigma, "degenerate weight variance, flooring sigma");
        sigma = SIGMA_FLOOR;
    }
    data.iter().map(|x| (x - mu) / sigma).collect()
}

/// Index and value of the maximum element, first index on ties
pub fn argmax(data: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &value) in data.iter().enumerate() {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((idx, value)),
        }
    }
    best
}

/// Pearson correlation coefficient between two equal-length vectors
///
/// Returns 0.0 when either vector has zero variance; the result is
/// otherwise clamped to [-1, 1] against floating-point drift.
pub fn pearson(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    if a.len() < 2 {
        return 0.0;
    }

    let mean_a = mean(a);
    let mean_b = mean(b);

    let mut covariance = 0.0f32;
    let mut var_a = 0.0f32;
    let mut var_b = 0.0f32;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denominator = (var_a * var_b).sqrt();
    if denominator <= 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    (covariance / denominator).clamp(-1.0, 1.0)
}
