// src/config/mod.rs
//! Per-simulator configuration with validation and profile loading.
//!
//! All thresholds default to the fixed values the simulators were designed
//! around; a TOML profile can override cadence and window parameters for
//! bench or soak scenarios without touching the tick logic.

pub mod constants;
pub mod loader;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub use loader::SimulationProfile;

/// Vital-sign simulator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Tick period, milliseconds.
    pub tick_interval_ms: u64,
    /// Bounded sample window length.
    pub sample_window: usize,
    /// Artificial latency before a deferred assessment lands, milliseconds.
    pub assessment_delay_ms: u64,
    /// Distress windows, exclusive tick ranges.
    pub distress_windows: Vec<(u64, u64)>,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: constants::vitals::TICK_INTERVAL_MS,
            sample_window: constants::vitals::SAMPLE_WINDOW,
            assessment_delay_ms: constants::vitals::ASSESSMENT_DELAY_MS,
            distress_windows: constants::vitals::DISTRESS_WINDOWS.to_vec(),
        }
    }
}

impl VitalsConfig {
    /// Validate ranges before constructing a simulator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::OutOfRange {
                field: "tick_interval_ms",
                value: 0.0,
                min: 1.0,
                max: f64::MAX,
            });
        }
        if self.sample_window == 0 {
            return Err(ConfigError::OutOfRange {
                field: "sample_window",
                value: 0.0,
                min: 1.0,
                max: f64::MAX,
            });
        }
        Ok(())
    }
}

/// Multimodal anomaly engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Tick period, milliseconds.
    pub tick_interval_ms: u64,
    /// Bounded sample window length.
    pub sample_window: usize,
    /// Bounded deviation-history window length.
    pub history_window: usize,
    /// Fused-score alert threshold.
    pub anomaly_threshold: f64,
    /// Heart-rate easing factor toward target.
    pub hr_smoothing_alpha: f64,
    /// Long-run baseline smoothing factor.
    pub baseline_alpha: f64,
    /// Calibration progress added per tick.
    pub calibration_increment: f64,
    /// Fusion weight of the ECG deviation.
    pub ecg_weight: f64,
    /// Fusion weight of the PPG deviation.
    pub ppg_weight: f64,
    /// Fusion weight of the SCG deviation.
    pub scg_weight: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        let (ecg_weight, ppg_weight, scg_weight) = constants::anomaly::FUSION_WEIGHTS;
        Self {
            tick_interval_ms: constants::anomaly::TICK_INTERVAL_MS,
            sample_window: constants::anomaly::SAMPLE_WINDOW,
            history_window: constants::anomaly::HISTORY_WINDOW,
            anomaly_threshold: constants::anomaly::ANOMALY_THRESHOLD,
            hr_smoothing_alpha: constants::anomaly::HR_SMOOTHING_ALPHA,
            baseline_alpha: constants::anomaly::BASELINE_ALPHA,
            calibration_increment: constants::anomaly::CALIBRATION_INCREMENT,
            ecg_weight,
            ppg_weight,
            scg_weight,
        }
    }
}

impl AnomalyConfig {
    /// Validate ranges and fusion-weight normalization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_window == 0 || self.history_window == 0 {
            return Err(ConfigError::OutOfRange {
                field: "sample_window",
                value: 0.0,
                min: 1.0,
                max: f64::MAX,
            });
        }
        for (field, value) in [
            ("anomaly_threshold", self.anomaly_threshold),
            ("hr_smoothing_alpha", self.hr_smoothing_alpha),
            ("baseline_alpha", self.baseline_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        if self.calibration_increment <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "calibration_increment",
                value: self.calibration_increment,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            });
        }
        let sum = self.ecg_weight + self.ppg_weight + self.scg_weight;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(ConfigError::InvalidFusionWeights { sum });
        }
        Ok(())
    }
}

/// Synaptic activity simulator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SynapticConfig {
    /// Tick period, milliseconds.
    pub tick_interval_ms: u64,
    /// Raster events older than this many ticks are evicted.
    pub raster_retention_ticks: u64,
    /// Bounded rate-series window length.
    pub rate_window: usize,
}

impl Default for SynapticConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: constants::synaptic::TICK_INTERVAL_MS,
            raster_retention_ticks: constants::synaptic::RASTER_RETENTION_TICKS,
            rate_window: constants::synaptic::RATE_WINDOW,
        }
    }
}

impl SynapticConfig {
    /// Validate ranges before constructing a simulator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_window == 0 {
            return Err(ConfigError::OutOfRange {
                field: "rate_window",
                value: 0.0,
                min: 1.0,
                max: f64::MAX,
            });
        }
        if self.raster_retention_ticks == 0 {
            return Err(ConfigError::OutOfRange {
                field: "raster_retention_ticks",
                value: 0.0,
                min: 1.0,
                max: f64::MAX,
            });
        }
        Ok(())
    }
}
