//! Rendering collaborator seam
//!
//! The detection core is pure; persisting a figure is delegated to a
//! [`FigureRenderer`]. The shipped SVG renderer draws the three-panel
//! summary (weight bar chart, component topography, synthetic template);
//! the desktop viewer draws the same panels interactively.

use crate::config::DetectionConfig;
use ica_core::{DetectionResult, DetectionView, IcaError, IcaResult, SensorLayout};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Fixed suffix of persisted figure files
pub const FIGURE_SUFFIX: &str = "_ExcessiveICAComponentAnalysis.svg";

/// Collaborator that turns the detection view into a persisted figure
pub trait FigureRenderer {
    /// Render the three-panel figure; returns the persisted path, or
    /// `None` for renderers that don't produce a file
    fn render(
        &mut self,
        layout: &SensorLayout,
        view: &DetectionView,
        result: &DetectionResult,
    ) -> IcaResult<Option<PathBuf>>;
}

/// Renderer for headless or batch use: draws nothing, writes nothing
#[derive(Debug, Clone, Default)]
pub struct NullRenderer;

impl FigureRenderer for NullRenderer {
    fn render(
        &mut self,
        _layout: &SensorLayout,
        _view: &DetectionView,
        _result: &DetectionResult,
    ) -> IcaResult<Option<PathBuf>> {
        Ok(None)
    }
}

/// Renderer that persists the figure as a standalone SVG file
///
/// Filename is `<basename>` of the source id (path and extension
/// stripped) plus [`FIGURE_SUFFIX`], written into `output_dir`.
#[derive(Debug, Clone)]
pub struct SvgFigureRenderer {
    output_dir: PathBuf,
}

/// Panel geometry in figure coordinates
const PANEL_SIZE: f32 = 400.0;
const PANEL_MARGIN: f32 = 40.0;

impl SvgFigureRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        SvgFigureRenderer {
            output_dir: output_dir.into(),
        }
    }

    /// Renderer writing into the configuration's output directory
    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.output_dir.clone())
    }

    /// Figure path for a given source identifier
    pub fn figure_path(&self, source_id: &str) -> PathBuf {
        let basename = Path::new(source_id)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(source_id);
        self.output_dir.join(format!("{}{}", basename, FIGURE_SUFFIX))
    }

    fn build_svg(
        &self,
        layout: &SensorLayout,
        view: &DetectionView,
        result: &DetectionResult,
    ) -> String {
        let width = 3.0 * PANEL_SIZE;
        let mut svg = String::new();

        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
             viewBox=\"0 0 {} {}\">\n",
            width, PANEL_SIZE, width, PANEL_SIZE
        );
        let _ = write!(
            svg,
            "<rect width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
            width, PANEL_SIZE
        );

        self.draw_bar_panel(&mut svg, 0.0, view, result);
        self.draw_map_panel(
            &mut svg,
            PANEL_SIZE,
            layout,
            &view.topography,
            view.target_index,
            &format!("Component {} topography", view.component_index),
        );
        self.draw_map_panel(
            &mut svg,
            2.0 * PANEL_SIZE,
            layout,
            &view.template,
            view.target_index,
            "Synthetic template",
        );

        svg.push_str("</svg>\n");
        svg
    }

    /// Panel 1: absolute weights at the target sensor, extreme bar marked
    fn draw_bar_panel(&self, svg: &mut String, x0: f32, view: &DetectionView, result: &DetectionResult) {
        let inner = PANEL_SIZE - 2.0 * PANEL_MARGIN;
        let max_weight = view.abs_weights.iter().fold(0.0f32, |a, &b| a.max(b));
        let scale = if max_weight > 0.0 { inner / max_weight } else { 0.0 };
        let bar_width = inner / view.abs_weights.len() as f32;

        self.draw_title(
            svg,
            x0,
            &format!(
                "|weights| at target (max z = {:.2}, {})",
                result.max_zscore,
                if result.excessive { "EXCESSIVE" } else { "ok" }
            ),
        );

        for (idx, &weight) in view.abs_weights.iter().enumerate() {
            let height = weight * scale;
            let x = x0 + PANEL_MARGIN + idx as f32 * bar_width;
            let y = PANEL_SIZE - PANEL_MARGIN - height;
            let fill = if idx == view.component_index {
                "crimson"
            } else {
                "steelblue"
            };
            let _ = write!(
                svg,
                "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" \
                 fill=\"{}\" stroke=\"white\"/>\n",
                x,
                y,
                (bar_width - 1.0).max(1.0),
                height,
                fill
            );
        }

        // Baseline
        let _ = write!(
            svg,
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"black\"/>\n",
            x0 + PANEL_MARGIN,
            PANEL_SIZE - PANEL_MARGIN,
            x0 + PANEL_MARGIN + inner,
            PANEL_SIZE - PANEL_MARGIN
        );
    }

    /// Panels 2 and 3: per-sensor scalar field over the planar layout
    fn draw_map_panel(
        &self,
        svg: &mut String,
        x0: f32,
        layout: &SensorLayout,
        values: &[f32],
        target_index: usize,
        title: &str,
    ) {
        self.draw_title(svg, x0, title);

        let (min_x, max_x, min_y, max_y) = layout.sensors().iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY, f32::INFINITY, f32::NEG_INFINITY),
            |(lx, hx, ly, hy), s| (lx.min(s.x), hx.max(s.x), ly.min(s.y), hy.max(s.y)),
        );
        let span_x = (max_x - min_x).max(1e-6);
        let span_y = (max_y - min_y).max(1e-6);

        let min_v = values.iter().fold(f32::INFINITY, |a, &b| a.min(b));
        let max_v = values.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        let span_v = (max_v - min_v).max(1e-12);

        let inner = PANEL_SIZE - 2.0 * PANEL_MARGIN;
        for (idx, sensor) in layout.sensors().iter().enumerate() {
            let px = x0 + PANEL_MARGIN + (sensor.x - min_x) / span_x * inner;
            // SVG y axis grows downward
            let py = PANEL_SIZE - PANEL_MARGIN - (sensor.y - min_y) / span_y * inner;
            let t = (values[idx] - min_v) / span_v;
            let stroke = if idx == target_index { "black" } else { "none" };
            let _ = write!(
                svg,
                "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"6\" fill=\"{}\" \
                 stroke=\"{}\" stroke-width=\"2\"/>\n",
                px,
                py,
                heat_color(t),
                stroke
            );
        }
    }

    fn draw_title(&self, svg: &mut String, x0: f32, title: &str) {
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"{:.1}\" font-family=\"sans-serif\" font-size=\"14\">{}</text>\n",
            x0 + PANEL_MARGIN,
            PANEL_MARGIN - 14.0,
            title
        );
    }
}

impl Default for SvgFigureRenderer {
    fn default() -> Self {
        Self::new(".")
    }
}

impl FigureRenderer for SvgFigureRenderer {
    fn render(
        &mut self,
        layout: &SensorLayout,
        view: &DetectionView,
        result: &DetectionResult,
    ) -> IcaResult<Option<PathBuf>> {
        let path = self.figure_path(&result.source_id);
        let svg = self.build_svg(layout, view, result);

        std::fs::write(&path, svg).map_err(|e| IcaError::RenderError {
            reason: format!("failed to write figure '{}': {}", path.display(), e),
        })?;

        Ok(Some(path))
    }
}

/// Linear blue-to-red color map over t in [0, 1]
fn heat_color(t: f32) -> String {
    let t = t.clamp(0.0, 1.0);
    let r = (255.0 * t) as u8;
    let b = (255.0 * (1.0 - t)) as u8;
    let g = (96.0 * (1.0 - (2.0 * t - 1.0).abs())) as u8;
    format!("rgb({},{},{})", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ica_core::SensorPosition;

    fn test_inputs() -> (SensorLayout, DetectionView, DetectionResult) {
        let layout = SensorLayout::new(vec![
            SensorPosition::new("E1", 0.0, 0.0),
            SensorPosition::new("E55", 1.0, 1.0),
            SensorPosition::new("E3", 2.0, 0.0),
        ])
        .unwrap();
        let view = DetectionView {
            target_index: 1,
            component_index: 0,
            abs_weights: vec![3.0, 0.5],
            zscores: vec![1.0, -1.0],
            topography: vec![0.1, 2.8, 0.2],
            template: vec![0.2, 1.0, 0.2],
        };
        let result = DetectionResult {
            source_id: "subject01.set".to_string(),
            excessive: true,
            max_zscore: 6.1,
            component_index: 0,
            threshold: 5.0,
            spatial_correlation: 0.95,
            figure_path: None,
        };
        (layout, view, result)
    }

    #[test]
    fn test_from_config_uses_configured_output_dir() {
        let mut config = DetectionConfig::default();
        config.output_dir = PathBuf::from("/tmp/figures");

        let renderer = SvgFigureRenderer::from_config(&config);
        let path = renderer.figure_path("subject01.set");
        assert_eq!(
            path,
            PathBuf::from("/tmp/figures/subject01_ExcessiveICAComponentAnalysis.svg")
        );
    }

    #[test]
    fn test_figure_path_strips_extension_and_directories() {
        let renderer = SvgFigureRenderer::new("/tmp/out");
        let path = renderer.figure_path("data/subject01.set");
        assert_eq!(
            path,
            PathBuf::from("/tmp/out/subject01_ExcessiveICAComponentAnalysis.svg")
        );
    }

    #[test]
    fn test_render_writes_svg_file() {
        let dir = std::env::temp_dir().join("ica_render_test");
        std::fs::create_dir_all(&dir).unwrap();
        let mut renderer = SvgFigureRenderer::new(&dir);

        let (layout, view, result) = test_inputs();
        let path = renderer.render(&layout, &view, &result).unwrap().unwrap();

        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("<svg"));
        assert!(contents.contains("crimson")); // extreme bar marked
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_null_renderer_produces_no_path() {
        let (layout, view, result) = test_inputs();
        let path = NullRenderer.render(&layout, &view, &result).unwrap();
        assert!(path.is_none());
    }
}
