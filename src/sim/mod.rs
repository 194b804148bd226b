// src/sim/mod.rs
//! Synthetic physiological simulators and their shared primitives.

pub mod anomaly;
pub mod rng;
pub mod synaptic;
pub mod types;
pub mod vitals;
pub mod window;

pub use anomaly::AnomalyEngine;
pub use rng::{ConstantRandom, RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use synaptic::SynapticSimulator;
pub use types::*;
pub use vitals::VitalSignSimulator;
pub use window::SlidingWindow;

/// Clamp a fraction to `[0, 1]` before publication.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Clamp a percentage to `[0, 100]` before publication.
pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
