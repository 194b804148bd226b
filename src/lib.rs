//! CardioSim-Core: Synthetic pediatric cardiac monitoring simulation library
//!
//! This library provides the simulation core behind a clinical monitoring
//! dashboard. It features:
//!
//! - Three independent timer-driven physiological simulators
//! - Deterministic, injectable randomness for reproducible replays
//! - Bounded sliding windows with oldest-first eviction
//! - Deferred "AI assessment" recomputation with safe teardown
//! - A conversational risk-model auditor over a remote completion API
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cardiosim_core::config::VitalsConfig;
//! use cardiosim_core::runtime::spawn_vitals;
//! use cardiosim_core::sim::rng::ThreadRandom;
//! use cardiosim_core::sim::vitals::{VitalSignSimulator, VitalsTick};
//! use parking_lot::Mutex;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let simulator = Arc::new(Mutex::new(VitalSignSimulator::new(VitalsConfig::default())));
//!     let handle = spawn_vitals(simulator, ThreadRandom, |tick: VitalsTick| {
//!         println!("t={} ecg={:.2}", tick.sample.time, tick.sample.ecg);
//!     });
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(2)).await;
//!     handle.stop();
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auditor;
pub mod catalog;
pub mod config;
pub mod error;
pub mod runtime;
pub mod sim;

// Re-export commonly used types for convenience
pub use config::{AnomalyConfig, SimulationProfile, SynapticConfig, VitalsConfig};
pub use error::{AuditorError, ConfigError};
pub use runtime::{SampleSink, SimulatorHandle};
pub use sim::anomaly::AnomalyEngine;
pub use sim::rng::{RandomSource, SeededRandom, ThreadRandom};
pub use sim::synaptic::SynapticSimulator;
pub use sim::types::{EngineStatus, SensorSample, VitalsSample};
pub use sim::vitals::VitalSignSimulator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
