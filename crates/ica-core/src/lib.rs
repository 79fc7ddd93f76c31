//! ICA-Core: Foundation types for excessive-component artifact detection
//!
//! Sensor geometry, mixing-matrix container, detection output record
//! and the shared error taxonomy.

pub mod error;
pub mod layout;
pub mod mixing;
pub mod result;

pub use error::{IcaError, IcaResult};
pub use layout::{SensorLayout, SensorPosition};
pub use mixing::MixingMatrix;
pub use result::{DetectionResult, DetectionView, REPORT_COLUMNS};
