// src/config/loader.rs
//! TOML profile loading for the three simulators.

use super::{AnomalyConfig, SynapticConfig, VitalsConfig};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Combined simulation profile, one section per simulator.
///
/// Missing sections and fields fall back to the built-in defaults, so an
/// empty file is a valid profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationProfile {
    /// Vital-sign simulator section.
    pub vitals: VitalsConfig,
    /// Anomaly engine section.
    pub anomaly: AnomalyConfig,
    /// Synaptic simulator section.
    pub synaptic: SynapticConfig,
}

impl SimulationProfile {
    /// Parse and validate a profile from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let profile: SimulationProfile = toml::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load and validate a profile file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.vitals.validate()?;
        self.anomaly.validate()?;
        self.synaptic.validate()?;
        Ok(())
    }
}
