//! Control panel and three-panel figure rendering

use crate::app::IcaApp;
use egui_plot::{Bar, BarChart, Plot, Points};
use ica_core::SensorLayout;

const EXTREME_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 20, 60);
const BAR_COLOR: egui::Color32 = egui::Color32::from_rgb(70, 130, 180);

/// Left-hand control panel: input, parameters, actions
pub fn draw_control_panel(app: &mut IcaApp, ui: &mut egui::Ui) {
    ui.heading("ICA Artifact Inspector");
    ui.separator();

    ui.label("Input");
    ui.horizontal(|ui| {
        if ui.button("Open recording...").clicked() {
            app.open_recording();
        }
        if ui.button("Demo data").clicked() {
            app.generate_demo();
        }
    });

    if let Some(input) = &app.input {
        ui.label(format!(
            "{} — {} sensors, {} components",
            input.source_id,
            input.layout.len(),
            input.mixing.component_count()
        ));
    }

    ui.separator();
    ui.label("Detection parameters");
    ui.horizontal(|ui| {
        ui.label("Target sensor:");
        ui.text_edit_singleline(&mut app.target_label);
    });
    ui.horizontal(|ui| {
        ui.label("Z threshold:");
        ui.add(egui::DragValue::new(&mut app.threshold).speed(0.1));
    });
    ui.horizontal(|ui| {
        ui.label("Output dir:");
        ui.text_edit_singleline(&mut app.output_dir);
    });

    ui.separator();
    if ui.button("Run detection").clicked() {
        app.run_detection();
    }
    if ui.button("Export figure").clicked() {
        app.export_figure();
    }

    if let Some(outcome) = &app.outcome {
        ui.separator();
        ui.label("Result");
        let result = &outcome.result;
        ui.monospace(format!("excessive: {}", result.excessive));
        ui.monospace(format!("max z-score: {:.3}", result.max_zscore));
        ui.monospace(format!("component: {}", result.component_index));
        ui.monospace(format!("correlation: {:.3}", result.spatial_correlation));
        if let Some(path) = &result.figure_path {
            ui.monospace(format!("figure: {}", path.display()));
        }
    }
}

/// Central area: weight bar chart plus the two spatial maps
pub fn draw_figure(app: &IcaApp, ui: &mut egui::Ui) {
    let (Some(input), Some(outcome)) = (&app.input, &app.outcome) else {
        ui.centered_and_justified(|ui| {
            ui.label("Load a recording and run detection to see the figure");
        });
        return;
    };

    let view = &outcome.view;
    let panel_height = ui.available_height() / 2.0 - 10.0;

    ui.horizontal(|ui| {
        ui.label(format!(
            "Absolute component weights at '{}' (extreme component in red)",
            app.target_label
        ));
    });

    let bars: Vec<Bar> = view
        .abs_weights
        .iter()
        .enumerate()
        .map(|(idx, &weight)| {
            let color = if idx == view.component_index {
                EXTREME_COLOR
            } else {
                BAR_COLOR
            };
            Bar::new(idx as f64, weight as f64).fill(color)
        })
        .collect();

    Plot::new("weight_bars")
        .height(panel_height)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });

    ui.columns(2, |columns| {
        columns[0].label(format!("Component {} topography", view.component_index));
        draw_sensor_map(
            &mut columns[0],
            "topography_map",
            &input.layout,
            &view.topography,
            view.target_index,
            panel_height - 20.0,
        );

        columns[1].label("Synthetic template");
        draw_sensor_map(
            &mut columns[1],
            "template_map",
            &input.layout,
            &view.template,
            view.target_index,
            panel_height - 20.0,
        );
    });
}

/// Scatter map of a per-sensor scalar field over the planar layout
fn draw_sensor_map(
    ui: &mut egui::Ui,
    id: &str,
    layout: &SensorLayout,
    values: &[f32],
    target_index: usize,
    height: f32,
) {
    let min_v = values.iter().fold(f32::INFINITY, |a, &b| a.min(b));
    let max_v = values.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let span = (max_v - min_v).max(1e-12);

    Plot::new(id.to_string())
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show(ui, |plot_ui| {
            for (idx, sensor) in layout.sensors().iter().enumerate() {
                let t = (values[idx] - min_v) / span;
                plot_ui.points(
                    Points::new(vec![[sensor.x as f64, sensor.y as f64]])
                        .radius(5.0)
                        .color(heat_color(t)),
                );
            }

            // Open marker around the target sensor
            if let Some(target) = layout.sensor(target_index) {
                plot_ui.points(
                    Points::new(vec![[target.x as f64, target.y as f64]])
                        .radius(9.0)
                        .filled(false)
                        .color(egui::Color32::BLACK),
                );
            }
        });
}

/// Linear blue-to-red color map over t in [0, 1]
fn heat_color(t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let r = (255.0 * t) as u8;
    let b = (255.0 * (1.0 - t)) as u8;
    let g = (96.0 * (1.0 - (2.0 * t - 1.0).abs())) as u8;
    egui::Color32::from_rgb(r, g, b)
}
