//! Detection output: the report record and the derived spatial fields

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Report column names, in the externally visible order
///
/// Column names and order are a compatibility surface for downstream
/// consumers; changing them is a breaking change.
pub const REPORT_COLUMNS: [&str; 7] = [
    "source_id",
    "excessive",
    "max_zscore",
    "component_index",
    "threshold",
    "spatial_correlation",
    "figure_path",
];

/// Classification record for one recording
///
/// Immutable once produced; the caller owns persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Identifier of the analyzed recording
    pub source_id: String,
    /// Whether one component exceeds the z-score threshold at the target sensor
    pub excessive: bool,
    /// Maximum z-score over per-component absolute weights at the target sensor
    pub max_zscore: f32,
    /// Index of the extreme component (0-based column into the mixing matrix)
    pub component_index: usize,
    /// Threshold the flag was evaluated against
    pub threshold: f32,
    /// Pearson correlation between the extreme component's topography and
    /// the synthetic target-centered template, in [-1, 1]
    pub spatial_correlation: f32,
    /// Path of the persisted figure, if a renderer produced one
    pub figure_path: Option<PathBuf>,
}

impl DetectionResult {
    /// Report row values matching [`REPORT_COLUMNS`] in order
    pub fn report_row(&self) -> Vec<String> {
        vec![
            self.source_id.clone(),
            self.excessive.to_string(),
            format!("{:.4}", self.max_zscore),
            self.component_index.to_string(),
            format!("{:.2}", self.threshold),
            format!("{:.4}", self.spatial_correlation),
            self.figure_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        ]
    }
}

/// Side output of the detection pipeline for the rendering collaborator
///
/// All vectors are in layout sensor order except `abs_weights` and
/// `zscores`, which are in component order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionView {
    /// Index of the target sensor in the layout
    pub target_index: usize,
    /// Index of the extreme component
    pub component_index: usize,
    /// Absolute per-component weights at the target sensor
    pub abs_weights: Vec<f32>,
    /// Z-scores of the absolute weights
    pub zscores: Vec<f32>,
    /// Extreme component's contribution across all sensors
    pub topography: Vec<f32>,
    /// Synthetic Gaussian template centered at the target sensor
    pub template: Vec<f32>,
}
