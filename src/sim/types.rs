//! Core value types shared by the simulators
//! Location: src/sim/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavioral mode governing the heart-rate target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Baseline quiet state.
    Resting,
    /// Elevated activity, raised heart-rate target.
    Active,
    /// Mild agitation.
    Fussing,
    /// Sustained agitation with high motion intensity.
    Crying,
    /// Forced state inside a distress window (vital-sign simulator only).
    AcuteTachycardia,
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BehaviorState::Resting => write!(f, "Resting"),
            BehaviorState::Active => write!(f, "Active"),
            BehaviorState::Fussing => write!(f, "Fussing"),
            BehaviorState::Crying => write!(f, "Crying"),
            BehaviorState::AcuteTachycardia => write!(f, "Acute Tachycardia"),
        }
    }
}

/// Injected pathology, mutually exclusive with behavioral modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathologyState {
    /// No pathology active; the behavior state governs targets.
    None,
    /// Supraventricular tachycardia.
    Svt,
    /// Abnormally low heart rate.
    Bradycardia,
    /// Burst of premature ventricular contractions.
    PvcBurst,
}

impl PathologyState {
    /// Whether a pathology currently governs the simulator targets.
    pub fn is_active(&self) -> bool {
        !matches!(self, PathologyState::None)
    }
}

impl fmt::Display for PathologyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathologyState::None => write!(f, "None"),
            PathologyState::Svt => write!(f, "SVT"),
            PathologyState::Bradycardia => write!(f, "Bradycardia"),
            PathologyState::PvcBurst => write!(f, "PVC Burst"),
        }
    }
}

/// Immutable multimodal sample published by the anomaly engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Tick index the sample was computed on.
    pub time: u64,
    /// ECG amplitude including motion noise.
    pub ecg: f64,
    /// PPG waveform scaled by stroke volume.
    pub ppg: f64,
    /// SCG waveform scaled by stroke volume.
    pub scg: f64,
    /// Fused anomaly score, clamped to `[0, 1]`.
    pub anomaly_score: Option<f64>,
}

/// Immutable sample published by the vital-sign simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsSample {
    /// Tick index the sample was computed on.
    pub time: u64,
    /// ECG amplitude; high inside the QRS window, noise floor elsewhere.
    pub ecg: f64,
    /// PPG amplitude.
    pub ppg: f64,
    /// Instantaneous SpO2, percent.
    pub spo2: f64,
    /// Whether this tick falls inside the QRS detection window.
    pub qrs_triggered: bool,
    /// Simulated detector confidence for this tick, percent.
    pub qrs_confidence: f64,
}

/// Per-channel deviation breakdown retained alongside the fused score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyHistoryEntry {
    /// Tick index of the underlying sample.
    pub timestamp: u64,
    /// Fused anomaly score.
    pub score: f64,
    /// ECG morphology deviation contribution.
    pub ecg_deviation: f64,
    /// PPG perfusion deviation contribution.
    pub ppg_deviation: f64,
    /// SCG mechanical deviation contribution.
    pub scg_deviation: f64,
    /// Behavior state at sample time.
    pub behavior: BehaviorState,
    /// Pathology state at sample time.
    pub pathology: PathologyState,
}

/// Kind of opportunistically detected event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectedEventKind {
    /// Simulated QRS complex picked up by the beat detector.
    QrsComplex,
}

impl fmt::Display for DetectedEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectedEventKind::QrsComplex => write!(f, "QRS Detection"),
        }
    }
}

/// Event emitted when a trigger condition fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedEvent {
    /// Unique id, the emitting tick index.
    pub id: u64,
    /// Tick index of the detection.
    pub time: u64,
    /// What was detected.
    pub kind: DetectedEventKind,
    /// Detection confidence, percent, clamped to `[0, 100]`.
    pub confidence: f64,
}

/// Assessment severity published with each AI interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentLevel {
    /// Stable cardiovascular profile.
    Normal,
    /// Distress markers present.
    Critical,
}

impl fmt::Display for AssessmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentLevel::Normal => write!(f, "Normal"),
            AssessmentLevel::Critical => write!(f, "Critical"),
        }
    }
}

/// Single evidence driver backing an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssessmentDriver {
    /// Marker name.
    pub name: &'static str,
    /// Qualitative status label.
    pub status: &'static str,
    /// Displayed value or delta.
    pub value: &'static str,
    /// One-line rationale.
    pub description: &'static str,
}

/// Periodic natural-language assessment with confidence and evidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiAssessment {
    /// Summary text.
    pub text: String,
    /// Severity level.
    pub level: AssessmentLevel,
    /// Interpretation confidence, percent, clamped to `[0, 100]`.
    pub confidence: f64,
    /// Evidence drivers behind the summary.
    pub drivers: Vec<AssessmentDriver>,
}

/// History entry appended only when the assessment level changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusHistoryEntry {
    /// Tick of the assessment that caused the transition.
    pub timestamp: u64,
    /// New level.
    pub level: AssessmentLevel,
    /// Short transition reason.
    pub reason: &'static str,
}

/// Display metrics snapshotted on a coarse cadence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalMetrics {
    /// Rounded heart rate, beats per minute.
    pub bpm: u32,
    /// Rounded oxygen saturation, percent.
    pub spo2: u32,
    /// Skin temperature, degrees Celsius.
    pub temp_c: f64,
    /// Signal quality index, percent, clamped to `[0, 100]`.
    pub sqi: f64,
    /// Latest ECG peak amplitude, rounded to two decimals.
    pub ecg_peak: f64,
}

/// Abstract processing layer of the spike simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpikeLayer {
    /// Input encoder layer.
    Input,
    /// Hidden feature layer.
    Hidden,
    /// Output classifier layer.
    Output,
}

impl SpikeLayer {
    /// All layers, in raster order.
    pub const ALL: [SpikeLayer; 3] = [SpikeLayer::Input, SpikeLayer::Hidden, SpikeLayer::Output];

    /// 1-based raster row index.
    pub fn index(&self) -> u8 {
        match self {
            SpikeLayer::Input => 1,
            SpikeLayer::Hidden => 2,
            SpikeLayer::Output => 3,
        }
    }
}

/// Classification of a spike event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpikeKind {
    /// Spike fired inside an anomalous burst window.
    Arrhythmia,
    /// Ordinary state-dependent firing.
    Physiological,
}

/// Single spike event for raster display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpikeEvent {
    /// Tick the spike fired on.
    pub time: u64,
    /// Originating layer.
    pub layer: SpikeLayer,
    /// Event classification.
    pub kind: SpikeKind,
}

/// Smoothed per-layer firing rates for sparkline display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikeRates {
    /// Tick the rates were sampled on.
    pub time: u64,
    /// Input encoder rate, Hz.
    pub input: f64,
    /// Hidden feature rate, Hz.
    pub hidden: f64,
    /// Output classifier rate, Hz.
    pub output: f64,
    /// Whether the tick fell inside an anomalous burst window.
    pub burst_event: bool,
}

/// Three-way classification recomputed fresh from current engine values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// A pathology is currently injected.
    Pathological(PathologyState),
    /// The fused score crossed the alert threshold without a named pathology.
    OutlierAlert,
    /// Baseline calibration has not yet completed.
    Calibrating,
    /// Calibrated and nominal.
    Stable,
}

impl EngineStatus {
    /// Whether this status should render as a critical alert.
    pub fn is_critical(&self) -> bool {
        matches!(self, EngineStatus::Pathological(_) | EngineStatus::OutlierAlert)
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineStatus::Pathological(p) => write!(f, "Pathological Event: {}", p),
            EngineStatus::OutlierAlert => write!(f, "System Alert: Multimodal Outlier"),
            EngineStatus::Calibrating => write!(f, "Temporal Baseline Training..."),
            EngineStatus::Stable => write!(f, "Multimodal Baseline Stable"),
        }
    }
}
