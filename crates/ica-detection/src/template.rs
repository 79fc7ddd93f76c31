//! Synthetic spatial template: a Gaussian bump centered at the target sensor

use crate::stats::SIGMA_FLOOR;
use ica_core::{IcaResult, SensorLayout};

/// Build the synthetic target-centered template over the layout
///
/// Per-sensor value is `exp(-d^2 / (2 * sigma^2))` where `d` is the planar
/// distance to the target sensor and `sigma` is one-tenth of the maximum
/// distance in the layout. The value at the target sensor itself is
/// exactly 1.0. A zero maximum distance (single-sensor or coincident
/// layouts) floors `sigma` instead of erroring, which makes the template
/// all ones.
pub fn gaussian_template(layout: &SensorLayout, target_index: usize) -> IcaResult<Vec<f32>> {
    let distances = layout.distances_from(target_index)?;

    let max_distance = distances.iter().fold(0.0f32, |a, &b| a.max(b));
    let mut sigma = max_distance / 10.0;
    if sigma <= 0.0 || !sigma.is_finite() {
        tracing::debug!(max_distance, "degenerate layout extent, flooring template sigma");
        sigma = SIGMA_FLOOR;
    }

    let two_sigma_sq = 2.0 * sigma * sigma;
    Ok(distances
        .iter()
        .map(|&d| (-(d * d) / two_sigma_sq).exp())
        .collect())
}
