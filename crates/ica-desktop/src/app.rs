//! Application state and detection/visualization actions

use crate::ui;
use ica_core::{DetectionResult, DetectionView, MixingMatrix, SensorLayout};
use ica_detection::{ArtifactDetector, DetectionConfig, FigureRenderer, SvgFigureRenderer};
use ica_simulation::{ring_layout, ArtifactSpec, MixingSimConfig, MixingSimulator};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One loaded recording: decomposition plus geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingInput {
    /// Identifier the report and figure name derive from
    pub source_id: String,
    pub layout: SensorLayout,
    pub mixing: MixingMatrix,
}

/// Completed detection run held for display
pub struct Outcome {
    pub result: DetectionResult,
    pub view: DetectionView,
}

/// Main application state
pub struct IcaApp {
    pub input: Option<RecordingInput>,
    pub outcome: Option<Outcome>,

    // Detection parameters, editable in the control panel
    pub target_label: String,
    pub threshold: f32,
    pub output_dir: String,

    pub status: String,
}

impl Default for IcaApp {
    fn default() -> Self {
        let defaults = DetectionConfig::default();
        IcaApp {
            input: None,
            outcome: None,
            target_label: defaults.target_label,
            threshold: defaults.threshold,
            output_dir: ".".to_string(),
            status: "Open a recording or generate demo data".to_string(),
        }
    }
}

impl IcaApp {
    /// Open a recording JSON file chosen via the file dialog
    pub fn open_recording(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Recording JSON", &["json"])
            .pick_file()
        else {
            return;
        };
        self.load_recording(path);
    }

    fn load_recording(&mut self, path: PathBuf) {
        match std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|text| serde_json::from_str::<RecordingInput>(&text).map_err(Into::into))
        {
            Ok(input) => {
                self.status = format!(
                    "Loaded '{}': {} sensors, {} components",
                    input.source_id,
                    input.layout.len(),
                    input.mixing.component_count()
                );
                self.input = Some(input);
                self.outcome = None;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load recording");
                self.status = format!("Failed to load '{}': {}", path.display(), e);
            }
        }
    }

    /// Generate a synthetic recording with an injected artifact at the
    /// current target sensor
    pub fn generate_demo(&mut self) {
        let generated = ring_layout(64, 1.0).and_then(|layout| {
            let mut simulator = MixingSimulator::new(MixingSimConfig {
                component_count: 48,
                noise_std: 0.05,
                artifact: Some(ArtifactSpec::localized(self.target_label.clone(), 7, 10.0)),
                seed: 42,
            });
            let mixing = simulator.generate(&layout)?;
            Ok((layout, mixing))
        });

        match generated {
            Ok((layout, mixing)) => {
                self.input = Some(RecordingInput {
                    source_id: "demo_recording".to_string(),
                    layout,
                    mixing,
                });
                self.outcome = None;
                self.status = "Generated demo recording with injected artifact".to_string();
            }
            Err(e) => {
                self.status = format!("Demo generation failed: {}", e);
            }
        }
    }

    fn detection_config(&self) -> DetectionConfig {
        DetectionConfig {
            target_label: self.target_label.clone(),
            threshold: self.threshold,
            output_dir: PathBuf::from(&self.output_dir),
        }
    }

    /// Run detection on the loaded recording
    pub fn run_detection(&mut self) {
        let Some(input) = &self.input else {
            self.status = "No recording loaded".to_string();
            return;
        };

        let run = ArtifactDetector::new(self.detection_config()).and_then(|detector| {
            detector.analyze(&input.layout, &input.mixing, &input.source_id)
        });

        match run {
            Ok((result, view)) => {
                self.status = if result.excessive {
                    format!(
                        "EXCESSIVE: component {} at z = {:.2} (corr {:.2})",
                        result.component_index, result.max_zscore, result.spatial_correlation
                    )
                } else {
                    format!(
                        "Clean: max z = {:.2} below threshold {:.1}",
                        result.max_zscore, result.threshold
                    )
                };
                self.outcome = Some(Outcome { result, view });
            }
            Err(e) => {
                tracing::warn!(error = %e, "detection failed");
                self.status = format!("Detection failed: {}", e);
                self.outcome = None;
            }
        }
    }

    /// Persist the current figure through the SVG renderer
    pub fn export_figure(&mut self) {
        let config = self.detection_config();
        let (Some(input), Some(outcome)) = (&self.input, &mut self.outcome) else {
            self.status = "Run detection before exporting".to_string();
            return;
        };

        let mut renderer = SvgFigureRenderer::from_config(&config);
        match renderer.render(&input.layout, &outcome.view, &outcome.result) {
            Ok(path) => {
                outcome.result.figure_path = path.clone();
                self.status = match path {
                    Some(p) => format!("Figure written to {}", p.display()),
                    None => "Renderer produced no figure".to_string(),
                };
            }
            Err(e) => {
                self.status = format!("Figure export failed: {}", e);
            }
        }
    }
}

impl eframe::App for IcaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("control_panel")
            .default_width(280.0)
            .show(ctx, |ui| {
                ui::draw_control_panel(self, ui);
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::draw_figure(self, ui);
        });
    }
}
