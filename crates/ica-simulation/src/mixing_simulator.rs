//! Synthetic mixing matrix generator with optional injected sensor artifact

use ica_core::{IcaError, IcaResult, MixingMatrix, SensorLayout};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// A component to inject whose topography is a bump at one sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    /// Label of the sensor the injected component is centered on
    pub target_label: String,
    /// Component column the topography is written into
    pub component: usize,
    /// Peak contribution at the target sensor
    pub gain: f32,
    /// Bump width as a fraction of the maximum sensor distance
    pub spread: f32,
}

impl ArtifactSpec {
    /// Bump at the given sensor matching the detector's template width
    pub fn localized(target_label: impl Into<String>, component: usize, gain: f32) -> Self {
        ArtifactSpec {
            target_label: target_label.into(),
            component,
            gain,
            spread: 0.1,
        }
    }
}

/// Configuration for mixing matrix simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixingSimConfig {
    /// Number of component columns to generate
    pub component_count: usize,
    /// Standard deviation of the Gaussian background weights
    pub noise_std: f32,
    /// Optional injected localized component
    pub artifact: Option<ArtifactSpec>,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for MixingSimConfig {
    fn default() -> Self {
        MixingSimConfig {
            component_count: 32,
            noise_std: 0.1,
            artifact: None,
            seed: 42,
        }
    }
}

/// Generator for reproducible synthetic mixing matrices
pub struct MixingSimulator {
    config: MixingSimConfig,
    rng: rand::rngs::StdRng,
}

impl MixingSimulator {
    pub fn new(config: MixingSimConfig) -> Self {
        let rng = rand::rngs::StdRng::seed_from_u64(config.seed);
        MixingSimulator { config, rng }
    }

    /// Generate a sensor-by-component matrix over the given layout
    ///
    /// Background weights are zero-mean Gaussian; if an artifact is
    /// configured, its component column is overwritten with a distance
    /// falloff bump centered on the artifact's target sensor.
    pub fn generate(&mut self, layout: &SensorLayout) -> IcaResult<MixingMatrix> {
        if self.config.component_count == 0 {
            return Err(IcaError::ConfigurationError {
                message: "component_count must be at least 1".to_string(),
            });
        }

        let noise = Normal::new(0.0f32, self.config.noise_std).map_err(|e| {
            IcaError::ConfigurationError {
                message: format!("invalid noise_std {}: {}", self.config.noise_std, e),
            }
        })?;

        let sensor_count = layout.len();
        let component_count = self.config.component_count;
        let mut data: Vec<f32> = (0..sensor_count * component_count)
            .map(|_| noise.sample(&mut self.rng))
            .collect();

        if let Some(artifact) = self.config.artifact.clone() {
            if artifact.component >= component_count {
                return Err(IcaError::ConfigurationError {
                    message: format!(
                        "artifact component {} out of bounds ({} components)",
                        artifact.component, component_count
                    ),
                });
            }
            let target_index = layout.find_sensor(&artifact.target_label).ok_or_else(|| {
                IcaError::SensorNotFound {
                    label: artifact.target_label.clone(),
                }
            })?;

            let distances = layout.distances_from(target_index)?;
            let max_distance = distances.iter().fold(0.0f32, |a, &b| a.max(b));
            let sigma = (max_distance * artifact.spread).max(1e-6);
            let two_sigma_sq = 2.0 * sigma * sigma;

            for (sensor, &d) in distances.iter().enumerate() {
                let bump = artifact.gain * (-(d * d) / two_sigma_sq).exp();
                data[sensor * component_count + artifact.component] = bump;
            }
        }

        MixingMatrix::new(data, sensor_count, component_count)
    }
}
