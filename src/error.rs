// src/error.rs
//! Error types for configuration and the remote auditor boundary.
//!
//! The simulators themselves have no error taxonomy: they perform no I/O and
//! only produce degraded or alert states as designed output. The fallible
//! surfaces are configuration loading and the remote text-completion call.

use thiserror::Error;

/// Configuration validation and loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric field fell outside its documented range.
    #[error("{field} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        /// Offending field name.
        field: &'static str,
        /// Supplied value.
        value: f64,
        /// Minimum accepted.
        min: f64,
        /// Maximum accepted.
        max: f64,
    },

    /// Fusion weights must sum to 1.0.
    #[error("fusion weights sum to {sum}, expected 1.0")]
    InvalidFusionWeights {
        /// Actual weight sum.
        sum: f64,
    },

    /// Profile file could not be read.
    #[error("failed to read profile {path}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Profile file could not be parsed as TOML.
    #[error("failed to parse profile")]
    Parse(#[from] toml::de::Error),
}

/// Remote text-completion errors. Callers substitute a fixed fallback
/// message rather than propagating these to the conversational surface.
#[derive(Debug, Error)]
pub enum AuditorError {
    /// Transport-level failure.
    #[error("completion request failed")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("completion endpoint returned status {0}")]
    Status(reqwest::StatusCode),

    /// Response parsed but carried no candidate text.
    #[error("completion response had no candidate text")]
    EmptyResponse,
}
