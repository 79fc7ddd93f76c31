//! Sensor layout: ordered electrode positions in a planar projection

use crate::error::{IcaError, IcaResult};
use serde::{Deserialize, Serialize};

/// A single sensor with label and planar coordinates
///
/// Coordinates are in an arbitrary but shared scale across the whole
/// layout (e.g. head-radius-normalized units from the montage file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPosition {
    /// Unique sensor label, e.g. "E55"
    pub label: String,
    /// Planar X coordinate
    pub x: f32,
    /// Planar Y coordinate
    pub y: f32,
}

impl SensorPosition {
    pub fn new(label: impl Into<String>, x: f32, y: f32) -> Self {
        SensorPosition {
            label: label.into(),
            x,
            y,
        }
    }

    /// Euclidean planar distance to another sensor
    pub fn distance_to(&self, other: &SensorPosition) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Ordered sequence of sensor positions
///
/// Sensor order defines the row order of the associated mixing matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorLayout {
    sensors: Vec<SensorPosition>,
}

impl SensorLayout {
    /// Create a layout, validating every sensor record
    pub fn new(sensors: Vec<SensorPosition>) -> IcaResult<Self> {
        let layout = SensorLayout { sensors };
        layout.validate()?;
        Ok(layout)
    }

    /// Validate sensor records: non-empty labels, finite coordinates
    pub fn validate(&self) -> IcaResult<()> {
        if self.sensors.is_empty() {
            return Err(IcaError::MalformedInput {
                reason: "layout contains no sensors".to_string(),
            });
        }

        for (idx, sensor) in self.sensors.iter().enumerate() {
            if sensor.label.is_empty() {
                return Err(IcaError::MalformedInput {
                    reason: format!("sensor at index {} has an empty label", idx),
                });
            }
            if !sensor.x.is_finite() || !sensor.y.is_finite() {
                return Err(IcaError::MalformedInput {
                    reason: format!(
                        "sensor '{}' has non-finite coordinates ({}, {})",
                        sensor.label, sensor.x, sensor.y
                    ),
                });
            }
        }

        Ok(())
    }

    /// Number of sensors in the layout
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// Check if the layout is empty
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Get a sensor by index
    pub fn sensor(&self, index: usize) -> Option<&SensorPosition> {
        self.sensors.get(index)
    }

    /// All sensors in layout order
    pub fn sensors(&self) -> &[SensorPosition] {
        &self.sensors
    }

    /// Find the index of the sensor with the given label
    ///
    /// Labels are expected to be unique; on a malformed layout with
    /// duplicates the first match wins.
    pub fn find_sensor(&self, label: &str) -> Option<usize> {
        self.sensors.iter().position(|s| s.label == label)
    }

    /// Euclidean distance from every sensor to the sensor at `index`
    ///
    /// Returned in layout order; entry at `index` is 0.0.
    pub fn distances_from(&self, index: usize) -> IcaResult<Vec<f32>> {
        let target = self.sensors.get(index).ok_or_else(|| IcaError::MalformedInput {
            reason: format!(
                "sensor index {} out of bounds (layout has {} sensors)",
                index,
                self.sensors.len()
            ),
        })?;

        Ok(self
            .sensors
            .iter()
            .map(|s| s.distance_to(target))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_layout() -> SensorLayout {
        SensorLayout::new(vec![
            SensorPosition::new("E1", 0.0, 0.0),
            SensorPosition::new("E2", 3.0, 4.0),
            SensorPosition::new("E55", 1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_find_sensor() {
        let layout = test_layout();
        assert_eq!(layout.find_sensor("E55"), Some(2));
        assert_eq!(layout.find_sensor("E99"), None);
    }

    #[test]
    fn test_find_sensor_first_match_wins() {
        let layout = SensorLayout::new(vec![
            SensorPosition::new("E55", 0.0, 0.0),
            SensorPosition::new("E55", 1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(layout.find_sensor("E55"), Some(0));
    }

    #[test]
    fn test_distances_from() {
        let layout = test_layout();
        let distances = layout.distances_from(0).unwrap();
        assert_eq!(distances.len(), 3);
        assert_eq!(distances[0], 0.0);
        assert_eq!(distances[1], 5.0); // 3-4-5 triangle
        assert_eq!(distances[2], 1.0);
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        let result = SensorLayout::new(vec![SensorPosition::new("E1", f32::NAN, 0.0)]);
        assert!(matches!(result, Err(IcaError::MalformedInput { .. })));
    }

    #[test]
    fn test_rejects_empty_layout() {
        let result = SensorLayout::new(vec![]);
        assert!(matches!(result, Err(IcaError::MalformedInput { .. })));
    }
}
