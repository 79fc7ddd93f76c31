//! ICA-Detection: Excessive-component artifact detection for EEG recordings
//!
//! Z-score scoring of per-component weights at one target sensor, synthetic
//! template synthesis, spatial correlation and result packaging.

pub mod config;
pub mod detector;
pub mod render;
pub mod stats;
pub mod template;

pub use config::{DetectionConfig, DEFAULT_TARGET_LABEL, DEFAULT_THRESHOLD};
pub use detector::ArtifactDetector;
pub use render::{FigureRenderer, NullRenderer, SvgFigureRenderer, FIGURE_SUFFIX};
pub use template::gaussian_template;
