//! Mixing matrix: sensor-by-component contributions from an ICA decomposition

use crate::error::{IcaError, IcaResult};
use serde::{Deserialize, Serialize};

/// Dense sensor-by-component mixing matrix (`icawinv`)
///
/// Row `s` holds the contribution of every component to sensor `s`;
/// column `c` is the spatial topography of component `c` across all
/// sensors. Storage is row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixingMatrix {
    data: Vec<f32>,
    sensor_count: usize,
    component_count: usize,
}

impl MixingMatrix {
    /// Create a matrix from row-major data
    pub fn new(data: Vec<f32>, sensor_count: usize, component_count: usize) -> IcaResult<Self> {
        if component_count == 0 {
            return Err(IcaError::MalformedInput {
                reason: "mixing matrix must have at least one component".to_string(),
            });
        }
        if sensor_count == 0 {
            return Err(IcaError::MalformedInput {
                reason: "mixing matrix must have at least one sensor row".to_string(),
            });
        }
        if data.len() != sensor_count * component_count {
            return Err(IcaError::MalformedInput {
                reason: format!(
                    "mixing matrix data length {} doesn't match {} sensors x {} components",
                    data.len(),
                    sensor_count,
                    component_count
                ),
            });
        }

        let matrix = MixingMatrix {
            data,
            sensor_count,
            component_count,
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Validate matrix entries: every weight must be finite
    ///
    /// A NaN weight would otherwise propagate into a NaN z-score and a
    /// silently-false classification instead of an input error.
    pub fn validate(&self) -> IcaResult<()> {
        for (idx, value) in self.data.iter().enumerate() {
            if !value.is_finite() {
                return Err(IcaError::MalformedInput {
                    reason: format!(
                        "mixing matrix entry at sensor {}, component {} is non-finite ({})",
                        idx / self.component_count,
                        idx % self.component_count,
                        value
                    ),
                });
            }
        }
        Ok(())
    }

    /// Create a matrix from per-sensor rows
    pub fn from_rows(rows: Vec<Vec<f32>>) -> IcaResult<Self> {
        let sensor_count = rows.len();
        let component_count = rows.first().map(|r| r.len()).unwrap_or(0);

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != component_count {
                return Err(IcaError::MalformedInput {
                    reason: format!(
                        "mixing matrix row {} has {} components, expected {}",
                        idx,
                        row.len(),
                        component_count
                    ),
                });
            }
        }

        let data: Vec<f32> = rows.into_iter().flatten().collect();
        Self::new(data, sensor_count, component_count)
    }

    /// Number of sensor rows
    pub fn sensor_count(&self) -> usize {
        self.sensor_count
    }

    /// Number of component columns
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// Per-component contributions at one sensor
    pub fn row(&self, sensor: usize) -> IcaResult<&[f32]> {
        if sensor >= self.sensor_count {
            return Err(IcaError::MalformedInput {
                reason: format!(
                    "sensor row {} out of bounds (matrix has {} rows)",
                    sensor, self.sensor_count
                ),
            });
        }
        let start = sensor * self.component_count;
        Ok(&self.data[start..start + self.component_count])
    }

    /// Spatial topography of one component across all sensors
    pub fn column(&self, component: usize) -> IcaResult<Vec<f32>> {
        if component >= self.component_count {
            return Err(IcaError::MalformedInput {
                reason: format!(
                    "component column {} out of bounds (matrix has {} columns)",
                    component, self.component_count
                ),
            });
        }
        Ok((0..self.sensor_count)
            .map(|s| self.data[s * self.component_count + component])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_and_column_access() {
        // 2 sensors x 3 components
        let matrix = MixingMatrix::from_rows(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
        ])
        .unwrap();

        assert_eq!(matrix.sensor_count(), 2);
        assert_eq!(matrix.component_count(), 3);
        assert_eq!(matrix.row(0).unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(matrix.row(1).unwrap(), &[4.0, 5.0, 6.0]);
        assert_eq!(matrix.column(0).unwrap(), vec![1.0, 4.0]);
        assert_eq!(matrix.column(2).unwrap(), vec![3.0, 6.0]);
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let result = MixingMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(IcaError::MalformedInput { .. })));
    }

    #[test]
    fn test_rejects_zero_components() {
        let result = MixingMatrix::new(vec![], 2, 0);
        assert!(matches!(result, Err(IcaError::MalformedInput { .. })));
    }

    #[test]
    fn test_rejects_non_finite_weights() {
        let nan = MixingMatrix::from_rows(vec![vec![1.0, f32::NAN], vec![0.5, 0.2]]);
        assert!(matches!(nan, Err(IcaError::MalformedInput { .. })));

        let inf = MixingMatrix::new(vec![0.1, f32::INFINITY], 2, 1);
        assert!(matches!(inf, Err(IcaError::MalformedInput { .. })));
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let result = MixingMatrix::new(vec![1.0, 2.0, 3.0], 2, 2);
        assert!(matches!(result, Err(IcaError::MalformedInput { .. })));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let matrix = MixingMatrix::from_rows(vec![vec![1.0], vec![2.0]]).unwrap();
        assert!(matrix.row(2).is_err());
        assert!(matrix.column(1).is_err());
    }
}
