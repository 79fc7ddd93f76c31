//! ICA-Simulation: Synthetic layouts and mixing matrices for testing and demos
//!
//! Reproducible (seeded) fixture generation, including matrices with an
//! injected sensor-localized component the detector should flag.

pub mod layout_patterns;
pub mod mixing_simulator;

pub use layout_patterns::{grid_layout, ring_layout};
pub use mixing_simulator::{ArtifactSpec, MixingSimConfig, MixingSimulator};
