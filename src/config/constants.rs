// src/config/constants.rs
//! Fixed simulation constants, lifted out of the tick logic so every
//! threshold has a name and a single definition.

/// Vital-sign simulator constants.
pub mod vitals {
    /// Tick period, milliseconds.
    pub const TICK_INTERVAL_MS: u64 = 100;
    /// Bounded sample window length.
    pub const SAMPLE_WINDOW: usize = 50;
    /// Hardcoded distress windows, exclusive tick ranges.
    pub const DISTRESS_WINDOWS: [(u64, u64); 2] = [(200, 350), (600, 750)];
    /// Ticks between behavior re-draws.
    pub const BEHAVIOR_PERIOD_TICKS: u64 = 150;
    /// Ticks between metric snapshots.
    pub const METRICS_PERIOD_TICKS: u64 = 8;
    /// Ticks between detected-event emission checks.
    pub const EVENT_PERIOD_TICKS: u64 = 5;
    /// Ticks between assessment requests.
    pub const ASSESSMENT_PERIOD_TICKS: u64 = 100;
    /// Artificial assessment latency, milliseconds.
    pub const ASSESSMENT_DELAY_MS: u64 = 1200;
    /// Most-recent detected events retained.
    pub const EVENT_LIST_LEN: usize = 3;
    /// Status-history entries retained.
    pub const STATUS_HISTORY_LEN: usize = 5;

    /// Resting heart-rate base, bpm.
    pub const HR_RESTING: f64 = 108.0;
    /// Active heart-rate base, bpm.
    pub const HR_ACTIVE: f64 = 135.0;
    /// Fussing heart-rate base, bpm.
    pub const HR_FUSSING: f64 = 122.0;
    /// Distress heart-rate base, bpm.
    pub const HR_DISTRESS: f64 = 172.0;
    /// Nominal SpO2 base, percent.
    pub const SPO2_NOMINAL: f64 = 98.0;
    /// Distress SpO2 base, percent.
    pub const SPO2_DISTRESS: f64 = 92.0;
    /// Respiratory sinusoid frequency, radians per tick.
    pub const RESP_FREQUENCY: f64 = 0.05;
    /// Beat-phase advance per tick.
    pub const BEAT_CONSTANT: f64 = 0.15;
    /// QRS window within one cardiac cycle, exclusive.
    pub const QRS_PHASE_RANGE: (f64, f64) = (0.08, 0.12);
    /// Detector confidence baseline, percent.
    pub const QRS_CONFIDENCE_BASE: f64 = 96.2;
    /// Detector confidence random spread, percent.
    pub const QRS_CONFIDENCE_SPREAD: f64 = 3.5;
    /// Confidence penalty while in distress, percent.
    pub const QRS_CONFIDENCE_DISTRESS_PENALTY: f64 = 4.2;
    /// ECG amplitude baseline inside the QRS window.
    pub const ECG_QRS_BASE: f64 = 1.2;
    /// ECG random spread inside the QRS window.
    pub const ECG_QRS_SPREAD: f64 = 0.15;
    /// ECG noise-floor baseline outside the QRS window.
    pub const ECG_FLOOR_BASE: f64 = 0.05;
    /// ECG noise-floor random spread.
    pub const ECG_FLOOR_SPREAD: f64 = 0.05;
    /// PPG sinusoid frequency, radians per tick.
    pub const PPG_WAVE_FREQUENCY: f64 = 0.15;
    /// PPG sinusoid amplitude.
    pub const PPG_WAVE_AMPLITUDE: f64 = 0.2;
    /// PPG baseline offset.
    pub const PPG_BASELINE: f64 = 0.5;
    /// PPG random noise spread.
    pub const PPG_NOISE_SPREAD: f64 = 0.01;
    /// Baseline skin temperature, Celsius.
    pub const TEMP_BASE_C: f64 = 37.1;
    /// Temperature bias added during distress, Celsius.
    pub const TEMP_DISTRESS_BIAS_C: f64 = 0.9;
}

/// Multimodal anomaly engine constants.
pub mod anomaly {
    /// Tick period, milliseconds.
    pub const TICK_INTERVAL_MS: u64 = 120;
    /// Bounded sample window length.
    pub const SAMPLE_WINDOW: usize = 60;
    /// Bounded deviation-history window length.
    pub const HISTORY_WINDOW: usize = 40;
    /// Ticks between history snapshots.
    pub const HISTORY_PERIOD_TICKS: u64 = 5;
    /// Ticks between state-machine transitions.
    pub const TRANSITION_PERIOD_TICKS: u64 = 150;

    /// Fused-score alert threshold.
    pub const ANOMALY_THRESHOLD: f64 = 0.65;
    /// Heart-rate easing factor toward target.
    pub const HR_SMOOTHING_ALPHA: f64 = 0.05;
    /// Long-run baseline smoothing factor.
    pub const BASELINE_ALPHA: f64 = 0.01;
    /// Calibration progress added per tick.
    pub const CALIBRATION_INCREMENT: f64 = 0.4;
    /// Calibration saturation value.
    pub const CALIBRATION_MAX: f64 = 100.0;
    /// Resting ectopic-beat probability.
    pub const ECTOPIC_BASELINE: f64 = 0.005;
    /// Beat-phase advance per tick.
    pub const BEAT_CONSTANT: f64 = 0.18;
    /// Forced early beat phase for premature contractions.
    pub const PVC_PHASE: f64 = 0.04;
    /// Fusion weights for (ECG, PPG, SCG) deviations.
    pub const FUSION_WEIGHTS: (f64, f64, f64) = (0.5, 0.3, 0.2);
    /// Upper clamp applied to each channel deviation; allows small noise overshoot.
    pub const DEVIATION_CLAMP: f64 = 1.05;

    /// SVT transition cut point. A uniform draw strictly above a cut point
    /// selects that outcome, evaluated in descending order; a draw below all
    /// cut points selects Resting.
    pub const CUT_SVT: f64 = 0.94;
    /// Bradycardia cut point.
    pub const CUT_BRADYCARDIA: f64 = 0.88;
    /// PVC burst cut point.
    pub const CUT_PVC_BURST: f64 = 0.82;
    /// Crying cut point.
    pub const CUT_CRYING: f64 = 0.65;
    /// Active cut point.
    pub const CUT_ACTIVE: f64 = 0.45;

    /// SVT target heart rate, bpm.
    pub const HR_SVT: f64 = 245.0;
    /// Bradycardia target heart rate, bpm.
    pub const HR_BRADYCARDIA: f64 = 48.0;
    /// PVC burst target heart rate, bpm.
    pub const HR_PVC_BURST: f64 = 125.0;
    /// Crying target heart rate, bpm.
    pub const HR_CRYING: f64 = 165.0;
    /// Active target heart rate, bpm.
    pub const HR_ACTIVE: f64 = 135.0;
    /// Resting target heart rate, bpm.
    pub const HR_RESTING: f64 = 105.0;
}

/// Synaptic activity simulator constants.
pub mod synaptic {
    /// Tick period, milliseconds.
    pub const TICK_INTERVAL_MS: u64 = 150;
    /// Anomalous burst window, exclusive tick range.
    pub const BURST_WINDOW: (u64, u64) = (100, 150);
    /// Modulo period of the respiratory transition window.
    pub const TRANSITION_MODULO: u64 = 80;
    /// Ticks at the start of each modulo period counting as a transition.
    pub const TRANSITION_SPAN: u64 = 10;
    /// Raster events older than this many ticks are evicted.
    pub const RASTER_RETENTION_TICKS: u64 = 50;
    /// Bounded rate-series window length.
    pub const RATE_WINDOW: usize = 50;

    /// Input layer base firing probability.
    pub const P_INPUT_BASE: f64 = 0.4;
    /// Input layer burst boost.
    pub const P_INPUT_BURST: f64 = 0.3;
    /// Hidden layer base firing probability.
    pub const P_HIDDEN_BASE: f64 = 0.2;
    /// Hidden layer burst boost.
    pub const P_HIDDEN_BURST: f64 = 0.2;
    /// Hidden layer transition boost.
    pub const P_HIDDEN_TRANSITION: f64 = 0.1;
    /// Output layer base firing probability.
    pub const P_OUTPUT_BASE: f64 = 0.05;
    /// Output layer burst boost.
    pub const P_OUTPUT_BURST: f64 = 0.15;
}
