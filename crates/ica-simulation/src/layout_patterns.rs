//! Synthetic sensor layout generators

use ica_core::{IcaResult, SensorLayout, SensorPosition};

/// Sensors evenly spaced on a circle of the given radius
///
/// Labels run `E1..E<count>` in placement order.
pub fn ring_layout(count: usize, radius: f32) -> IcaResult<SensorLayout> {
    let sensors = (0..count)
        .map(|i| {
            let angle = 2.0 * std::f32::consts::PI * i as f32 / count.max(1) as f32;
            SensorPosition::new(
                format!("E{}", i + 1),
                radius * angle.cos(),
                radius * angle.sin(),
            )
        })
        .collect();
    SensorLayout::new(sensors)
}

/// Sensors on a rectangular grid, row-major from the origin
///
/// Labels run `E1..E<cols*rows>`.
pub fn grid_layout(cols: usize, rows: usize, spacing: f32) -> IcaResult<SensorLayout> {
    let sensors = (0..rows)
        .flat_map(|r| {
            (0..cols).map(move |c| {
                SensorPosition::new(
                    format!("E{}", r * cols + c + 1),
                    c as f32 * spacing,
                    r as f32 * spacing,
                )
            })
        })
        .collect();
    SensorLayout::new(sensors)
}
