//! Single-sensor excessive-component detection pipeline
//!
//! Stateless single-pass computation: score the per-component weights at
//! the target sensor, pick the extreme component, and compare its full
//! spatial topography against a synthetic template centered at the target.

use crate::config::DetectionConfig;
use crate::render::FigureRenderer;
use crate::stats::{argmax, pearson, zscores};
use crate::template::gaussian_template;
use ica_core::{
    DetectionResult, DetectionView, IcaError, IcaResult, MixingMatrix, SensorLayout,
};

/// Detector for components that disproportionately drive one sensor
#[derive(Debug, Clone, Default)]
pub struct ArtifactDetector {
    config: DetectionConfig,
}

impl ArtifactDetector {
    /// Create a detector with a validated configuration
    pub fn new(config: DetectionConfig) -> IcaResult<Self> {
        config.validate()?;
        Ok(ArtifactDetector { config })
    }

    /// The active configuration
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Run the pure detection pipeline, no I/O
    ///
    /// Returns the classification record (with `figure_path` unset) plus
    /// the derived spatial fields for the rendering collaborator.
    pub fn analyze(
        &self,
        layout: &SensorLayout,
        mixing: &MixingMatrix,
        source_id: &str,
    ) -> IcaResult<(DetectionResult, DetectionView)> {
        layout.validate()?;
        mixing.validate()?;
        if mixing.sensor_count() != layout.len() {
            return Err(IcaError::MalformedInput {
                reason: format!(
                    "mixing matrix has {} sensor rows but layout has {} sensors",
                    mixing.sensor_count(),
                    layout.len()
                ),
            });
        }

        // Target lookup: first match wins on malformed duplicate layouts
        let target_index = layout
            .find_sensor(&self.config.target_label)
            .ok_or_else(|| IcaError::SensorNotFound {
                label: self.config.target_label.clone(),
            })?;

        // Per-component weight magnitudes at the target sensor
        let abs_weights: Vec<f32> = mixing
            .row(target_index)?
            .iter()
            .map(|w| w.abs())
            .collect();

        let scores = zscores(&abs_weights);
        // Component count >= 1 is guaranteed by the matrix constructor
        let (component_index, max_zscore) = argmax(&scores).ok_or_else(|| {
            IcaError::MalformedInput {
                reason: "mixing matrix has no components to score".to_string(),
            }
        })?;
        let excessive = max_zscore > self.config.threshold;

        let template = gaussian_template(layout, target_index)?;
        let topography = mixing.column(component_index)?;
        let spatial_correlation = pearson(&topography, &template);

        tracing::info!(
            source_id,
            target = %self.config.target_label,
            max_zscore,
            component_index,
            spatial_correlation,
            excessive,
            "detection complete"
        );

        let result = DetectionResult {
            source_id: source_id.to_string(),
            excessive,
            max_zscore,
            component_index,
            threshold: self.config.threshold,
            spatial_correlation,
            figure_path: None,
        };
        let view = DetectionView {
            target_index,
            component_index,
            abs_weights,
            zscores: scores,
            topography,
            template,
        };

        Ok((result, view))
    }

    /// Run the pipeline and persist the figure through `renderer`
    ///
    /// The renderer is only invoked after the computation fully succeeds;
    /// its returned path is embedded in the result.
    pub fn detect(
        &self,
        layout: &SensorLayout,
        mixing: &MixingMatrix,
        source_id: &str,
        renderer: &mut dyn FigureRenderer,
    ) -> IcaResult<DetectionResult> {
        let (mut result, view) = self.analyze(layout, mixing, source_id)?;
        result.figure_path = renderer.render(layout, &view, &result)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;
    use ica_core::SensorPosition;

    /// Five sensors: target at origin, others at distances 1..4
    fn five_sensor_layout() -> SensorLayout {
        SensorLayout::new(vec![
            SensorPosition::new("E55", 0.0, 0.0),
            SensorPosition::new("E1", 1.0, 0.0),
            SensorPosition::new("E2", 2.0, 0.0),
            SensorPosition::new("E3", 3.0, 0.0),
            SensorPosition::new("E4", 4.0, 0.0),
        ])
        .unwrap()
    }

    /// Mixing matrix with the target-sensor row as given and small
    /// off-target contributions for the third component
    fn matrix_with_target_row(target_row: [f32; 3]) -> MixingMatrix {
        MixingMatrix::from_rows(vec![
            target_row.to_vec(),
            vec![0.2, 0.3, 0.4],
            vec![0.1, 0.2, 0.1],
            vec![0.3, 0.1, 0.05],
            vec![0.2, 0.2, 0.02],
        ])
        .unwrap()
    }

    /// 30-component matrix with one dominant weight at the target sensor
    ///
    /// With a population sigma the max z-score is bounded by
    /// sqrt(component_count - 1), so a small decomposition can never
    /// cross a threshold of 5; a realistic one can.
    fn dominant_component_matrix(extreme: usize) -> MixingMatrix {
        let component_count = 30;
        let rows: Vec<Vec<f32>> = (0..5)
            .map(|sensor| {
                (0..component_count)
                    .map(|c| {
                        if sensor == 0 && c == extreme {
                            10.0
                        } else if sensor == 0 {
                            0.1
                        } else {
                            0.05
                        }
                    })
                    .collect()
            })
            .collect();
        MixingMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_detects_excessive_component() {
        let detector = ArtifactDetector::default();
        let layout = five_sensor_layout();
        let mixing = dominant_component_matrix(17);

        let (result, view) = detector.analyze(&layout, &mixing, "rec01").unwrap();

        assert_eq!(result.component_index, 17);
        assert!(
            result.excessive,
            "max z {} should exceed threshold 5",
            result.max_zscore
        );
        assert_eq!(view.target_index, 0);
        assert_eq!(view.zscores[result.component_index], result.max_zscore);
        // Template is exactly 1.0 at the target sensor
        assert_eq!(view.template[view.target_index], 1.0);
    }

    #[test]
    fn test_extreme_component_index() {
        // Target row [0.1, 0.1, 10.0]: the third component (0-based 2) is
        // the extreme one regardless of whether the flag fires
        let detector = ArtifactDetector::default();
        let layout = five_sensor_layout();
        let mixing = matrix_with_target_row([0.1, 0.1, 10.0]);

        let (result, view) = detector.analyze(&layout, &mixing, "rec01b").unwrap();

        assert_eq!(result.component_index, 2);
        let max = view.zscores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(result.max_zscore, max);
    }

    #[test]
    fn test_near_uniform_weights_not_flagged() {
        let detector = ArtifactDetector::default();
        let layout = five_sensor_layout();
        let mixing = matrix_with_target_row([1.0, 1.0, 1.1]);

        let (result, _) = detector.analyze(&layout, &mixing, "rec02").unwrap();

        assert!(!result.excessive);
        assert!(result.max_zscore < 5.0);
    }

    #[test]
    fn test_flag_matches_threshold_comparison() {
        let detector = ArtifactDetector::default();
        let layout = five_sensor_layout();
        let mixing = matrix_with_target_row([0.5, 2.0, 8.0]);

        let (result, _) = detector.analyze(&layout, &mixing, "rec03").unwrap();
        assert_eq!(result.excessive, result.max_zscore > result.threshold);
    }

    #[test]
    fn test_uniform_weights_yield_zero_scores() {
        // All components contribute identically: sigma is floored, scores
        // all come out 0 and nothing is flagged
        let detector = ArtifactDetector::default();
        let layout = five_sensor_layout();
        let mixing = matrix_with_target_row([0.7, 0.7, 0.7]);

        let (result, view) = detector.analyze(&layout, &mixing, "rec04").unwrap();

        assert!(view.zscores.iter().all(|&z| z == 0.0));
        assert_eq!(result.max_zscore, 0.0);
        assert_eq!(result.component_index, 0); // first index on ties
        assert!(!result.excessive);
    }

    #[test]
    fn test_missing_target_sensor() {
        let detector = ArtifactDetector::new(DetectionConfig::for_sensor("E99")).unwrap();
        let layout = five_sensor_layout();
        let mixing = matrix_with_target_row([0.1, 0.1, 10.0]);

        let result = detector.analyze(&layout, &mixing, "rec05");
        assert_eq!(
            result.unwrap_err(),
            IcaError::SensorNotFound {
                label: "E99".to_string()
            }
        );
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let detector = ArtifactDetector::default();
        let layout = five_sensor_layout();
        let mixing = MixingMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();

        let result = detector.analyze(&layout, &mixing, "rec06");
        assert!(matches!(result, Err(IcaError::MalformedInput { .. })));
    }

    #[test]
    fn test_spatial_correlation_high_for_localized_component() {
        // Component 2's topography decays with distance from the target,
        // mirroring the template shape
        let detector = ArtifactDetector::default();
        let layout = five_sensor_layout();
        let mixing = MixingMatrix::from_rows(vec![
            vec![0.1, 0.1, 10.0],
            vec![0.2, 0.3, 0.4],
            vec![0.1, 0.2, 0.05],
            vec![0.3, 0.1, 0.01],
            vec![0.2, 0.2, 0.0],
        ])
        .unwrap();

        let (result, _) = detector.analyze(&layout, &mixing, "rec07").unwrap();
        assert!(
            result.spatial_correlation > 0.9,
            "localized topography should track the template, got {}",
            result.spatial_correlation
        );
    }

    #[test]
    fn test_missing_sensor_writes_no_file() {
        let dir = std::env::temp_dir().join("ica_detect_no_file_test");
        std::fs::create_dir_all(&dir).unwrap();
        let mut renderer = crate::render::SvgFigureRenderer::new(&dir);
        let expected = renderer.figure_path("rec_missing");

        let detector = ArtifactDetector::new(DetectionConfig::for_sensor("E99")).unwrap();
        let layout = five_sensor_layout();
        let mixing = matrix_with_target_row([0.1, 0.1, 10.0]);

        let result = detector.detect(&layout, &mixing, "rec_missing", &mut renderer);
        assert!(result.is_err());
        assert!(!expected.exists());
    }

    #[test]
    fn test_detect_with_null_renderer() {
        let detector = ArtifactDetector::default();
        let layout = five_sensor_layout();
        let mixing = dominant_component_matrix(11);

        let result = detector
            .detect(&layout, &mixing, "rec08", &mut NullRenderer)
            .unwrap();
        assert!(result.figure_path.is_none());
        assert!(result.excessive);
        assert_eq!(result.component_index, 11);
    }
}
