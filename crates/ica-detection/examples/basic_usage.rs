//! Basic usage of the excessive-component detector
//!
//! Builds a small sensor layout and two mixing matrices (one with a
//! dominant component at the target sensor, one near-uniform) and runs
//! the detection pipeline on both.

use ica_core::{IcaResult, MixingMatrix, SensorLayout, SensorPosition, REPORT_COLUMNS};
use ica_detection::{ArtifactDetector, DetectionConfig, NullRenderer};

fn main() -> IcaResult<()> {
    println!("=== Excessive ICA Component Detection ===\n");

    let layout = SensorLayout::new(vec![
        SensorPosition::new("E55", 0.0, 0.0),
        SensorPosition::new("E1", 1.0, 0.0),
        SensorPosition::new("E2", 2.0, 0.0),
        SensorPosition::new("E3", 3.0, 0.0),
        SensorPosition::new("E4", 4.0, 0.0),
    ])?;

    let detector = ArtifactDetector::new(DetectionConfig::default())?;

    // Recording 1: one of 30 components dominates the target sensor
    let dominant = artifact_matrix(layout.len(), 30, 12);
    run_and_report(&detector, &layout, &dominant, "artifact_recording")?;

    // Recording 2: near-uniform contributions, nothing to flag
    let uniform = MixingMatrix::from_rows(vec![
        vec![1.0, 1.0, 1.1],
        vec![0.9, 1.0, 1.0],
        vec![1.0, 1.1, 0.9],
        vec![1.1, 0.9, 1.0],
        vec![1.0, 1.0, 1.0],
    ])?;
    run_and_report(&detector, &layout, &uniform, "clean_recording")?;

    Ok(())
}

/// Matrix where `extreme` contributes 10.0 at the first sensor and the
/// rest is low-level background
fn artifact_matrix(sensors: usize, components: usize, extreme: usize) -> MixingMatrix {
    let rows: Vec<Vec<f32>> = (0..sensors)
        .map(|s| {
            (0..components)
                .map(|c| {
                    if s == 0 && c == extreme {
                        10.0
                    } else {
                        0.1
                    }
                })
                .collect()
        })
        .collect();
    MixingMatrix::from_rows(rows).expect("matrix shape is consistent")
}

fn run_and_report(
    detector: &ArtifactDetector,
    layout: &SensorLayout,
    mixing: &MixingMatrix,
    source_id: &str,
) -> IcaResult<()> {
    let result = detector.detect(layout, mixing, source_id, &mut NullRenderer)?;

    println!("{}", source_id);
    for (column, value) in REPORT_COLUMNS.iter().zip(result.report_row()) {
        println!("  {:>20}: {}", column, value);
    }
    println!();

    Ok(())
}
