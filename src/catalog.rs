//! Static detection-log catalog for display surfaces
//! Location: src/catalog.rs

use serde::{Deserialize, Serialize};

/// Detection classification in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionKind {
    /// Rhythm disturbance flagged by the spiking path.
    Arrhythmia,
    /// Change in mechanical stroke characteristics.
    MechanicalDelta,
    /// Perfusion loss inferred from PPG damping.
    Hypoperfusion,
}

impl DetectionKind {
    /// Display label matching the log rendering.
    pub fn label(&self) -> &'static str {
        match self {
            DetectionKind::Arrhythmia => "Arrhythmia",
            DetectionKind::MechanicalDelta => "MechanicalDelta",
            DetectionKind::Hypoperfusion => "Hypoperfusion",
        }
    }
}

/// Inference path that produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionSource {
    /// On-device spiking network.
    SnnEdge,
    /// Cloud convolutional model.
    CnnCloud,
}

impl DetectionSource {
    /// Display label matching the log rendering.
    pub fn label(&self) -> &'static str {
        match self {
            DetectionSource::SnnEdge => "SNN-Edge",
            DetectionSource::CnnCloud => "CNN-Cloud",
        }
    }
}

/// One entry in the static detection log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionLogEntry {
    /// Wall-clock label, HH:MM:SS.
    pub timestamp: &'static str,
    /// Detection classification.
    pub kind: DetectionKind,
    /// Model confidence in `[0, 1]`.
    pub confidence: f64,
    /// Inference path.
    pub source: DetectionSource,
    /// Human-readable summary.
    pub description: &'static str,
}

/// Canned detection log shown on the neural-analysis surface.
pub const DETECTION_LOG: [DetectionLogEntry; 3] = [
    DetectionLogEntry {
        timestamp: "10:42:15",
        kind: DetectionKind::Arrhythmia,
        confidence: 0.98,
        source: DetectionSource::SnnEdge,
        description: "Premature Ventricular Contraction detected via edge-spiking.",
    },
    DetectionLogEntry {
        timestamp: "10:45:30",
        kind: DetectionKind::MechanicalDelta,
        confidence: 0.85,
        source: DetectionSource::CnnCloud,
        description: "Reduction in SCG stroke amplitude; potential contractility shift.",
    },
    DetectionLogEntry {
        timestamp: "10:50:02",
        kind: DetectionKind::Hypoperfusion,
        confidence: 0.92,
        source: DetectionSource::SnnEdge,
        description: "PPG amplitude damping consistent with peripheral vasoconstriction.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_confidences_in_unit_range() {
        for entry in DETECTION_LOG {
            assert!((0.0..=1.0).contains(&entry.confidence));
        }
    }

    #[test]
    fn test_log_serializes() {
        let json = serde_json::to_string(&DETECTION_LOG).unwrap();
        assert!(json.contains("10:42:15"));
        assert!(json.contains("edge-spiking"));
    }

    #[test]
    fn test_labels_match_display_strings() {
        assert_eq!(DetectionSource::SnnEdge.label(), "SNN-Edge");
        assert_eq!(DetectionSource::CnnCloud.label(), "CNN-Cloud");
        assert_eq!(DetectionKind::MechanicalDelta.label(), "MechanicalDelta");
    }
}
