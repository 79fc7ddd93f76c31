//! ICA Desktop Viewer - Excessive component inspection for EEG recordings

mod app;
mod ui;

use app::IcaApp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ICA Artifact Inspector",
        options,
        Box::new(|_cc| Ok(Box::new(IcaApp::default()))),
    )
    .map_err(|e| format!("Failed to run native app: {}", e))?;

    Ok(())
}
