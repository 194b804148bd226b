//! Vital-sign stream simulation with periodic AI interpretation
//! Location: src/sim/vitals.rs

use crate::config::constants::vitals as c;
use crate::config::VitalsConfig;
use crate::sim::rng::RandomSource;
use crate::sim::types::{
    AiAssessment, AssessmentDriver, AssessmentLevel, BehaviorState, DetectedEvent,
    DetectedEventKind, StatusHistoryEntry, VitalMetrics, VitalsSample,
};
use crate::sim::window::SlidingWindow;
use crate::sim::clamp_percent;
use tracing::{debug, trace};

const INITIAL_DRIVERS: [AssessmentDriver; 3] = [
    AssessmentDriver {
        name: "HR Variance",
        status: "Stable",
        value: "Nominal",
        description: "Baseline consistency",
    },
    AssessmentDriver {
        name: "PPG Amplitude",
        status: "Stable",
        value: "High",
        description: "Strong perfusion",
    },
    AssessmentDriver {
        name: "QRS Morphology",
        status: "Stable",
        value: "Normal",
        description: "Sinus rhythm",
    },
];

const STABLE_DRIVERS: [AssessmentDriver; 3] = [
    AssessmentDriver {
        name: "HR Variance",
        status: "Stable",
        value: "Nominal",
        description: "Resting rhythm consistency",
    },
    AssessmentDriver {
        name: "PPG Amplitude",
        status: "Stable",
        value: "High",
        description: "Optimal perfusion signal",
    },
    AssessmentDriver {
        name: "QRS Morphology",
        status: "Stable",
        value: "Normal",
        description: "Expected pediatric pattern",
    },
];

const CRITICAL_DRIVERS: [AssessmentDriver; 3] = [
    AssessmentDriver {
        name: "HR Variance",
        status: "Elevated",
        value: "+42%",
        description: "Unstable rate transition",
    },
    AssessmentDriver {
        name: "PPG Amplitude",
        status: "Decreased",
        value: "-18%",
        description: "Potential contractility drop",
    },
    AssessmentDriver {
        name: "QRS Morphology",
        status: "Irregular",
        value: "Abnormal",
        description: "Width deviation detected",
    },
];

const STABLE_TEXT: &str =
    "Cardiovascular profile stable. Normal sinus rhythm with typical pediatric variability.";
const CRITICAL_TEXT: &str = "CRITICAL: Abnormal HR elevation detected relative to activity \
profile. SpO2 threshold triggered (<94%).";

/// Marker that an assessment should be recomputed for this tick.
///
/// The tick loop never blocks on the recomputation; the runtime schedules it
/// after the configured artificial delay and applies the outcome through
/// [`VitalSignSimulator::apply_assessment`] only while the simulator is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentRequest {
    /// Tick the request was raised on.
    pub tick: u64,
    /// Distress flag frozen at request time.
    pub distressed: bool,
}

/// Completed assessment ready to land on the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentOutcome {
    /// Tick of the originating request.
    pub tick: u64,
    /// The recomputed assessment.
    pub assessment: AiAssessment,
    /// Transition reason recorded if the level changed.
    pub reason: &'static str,
}

/// Build the assessment for a request. Pure given a fixed random source.
pub fn build_assessment(request: AssessmentRequest, rng: &mut dyn RandomSource) -> AssessmentOutcome {
    let (text, level, confidence, drivers, reason) = if request.distressed {
        (
            CRITICAL_TEXT,
            AssessmentLevel::Critical,
            88.4 + rng.next_f64() * 4.0,
            CRITICAL_DRIVERS,
            "Risk Detected",
        )
    } else {
        (
            STABLE_TEXT,
            AssessmentLevel::Normal,
            95.2 + rng.next_f64() * 2.0,
            STABLE_DRIVERS,
            "Stable Baseline",
        )
    };
    AssessmentOutcome {
        tick: request.tick,
        assessment: AiAssessment {
            text: text.to_string(),
            level,
            confidence: clamp_percent(confidence),
            drivers: drivers.to_vec(),
        },
        reason,
    }
}

/// Output of one vital-sign tick.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalsTick {
    /// Sample appended to the stream window this tick.
    pub sample: VitalsSample,
    /// Present when an assessment recomputation is due.
    pub assessment_request: Option<AssessmentRequest>,
}

/// Continuous ECG/PPG generator with embedded QRS peaks, derived display
/// metrics and a periodically recomputed AI interpretation.
#[derive(Debug, Clone)]
pub struct VitalSignSimulator {
    config: VitalsConfig,
    tick: u64,
    hr_base: f64,
    hr_current: f64,
    resp_freq: f64,
    spo2_base: f64,
    behavior: BehaviorState,
    samples: SlidingWindow<VitalsSample>,
    events: Vec<DetectedEvent>,
    metrics: VitalMetrics,
    assessment: AiAssessment,
    status_history: Vec<StatusHistoryEntry>,
    last_level: AssessmentLevel,
}

impl VitalSignSimulator {
    /// Create a simulator at its initial resting state.
    pub fn new(config: VitalsConfig) -> Self {
        let samples = SlidingWindow::new(config.sample_window);
        Self {
            config,
            tick: 0,
            hr_base: c::HR_RESTING,
            hr_current: c::HR_RESTING,
            resp_freq: c::RESP_FREQUENCY,
            spo2_base: c::SPO2_NOMINAL,
            behavior: BehaviorState::Resting,
            samples,
            events: Vec::with_capacity(c::EVENT_LIST_LEN),
            metrics: VitalMetrics {
                bpm: c::HR_RESTING as u32,
                spo2: c::SPO2_NOMINAL as u32,
                temp_c: c::TEMP_BASE_C,
                sqi: 94.0,
                ecg_peak: c::ECG_QRS_BASE,
            },
            assessment: AiAssessment {
                text: "Baseline analysis active...".to_string(),
                level: AssessmentLevel::Normal,
                confidence: 94.8,
                drivers: INITIAL_DRIVERS.to_vec(),
            },
            status_history: Vec::with_capacity(c::STATUS_HISTORY_LEN),
            last_level: AssessmentLevel::Normal,
        }
    }

    /// Whether a tick index falls inside a hardcoded distress window.
    pub fn is_distress_tick(&self, tick: u64) -> bool {
        self.config
            .distress_windows
            .iter()
            .any(|&(start, end)| tick > start && tick < end)
    }

    /// Advance one tick, producing this tick's sample and, on the coarse
    /// cadence, an assessment request for the runtime to defer.
    pub fn advance(&mut self, rng: &mut dyn RandomSource) -> VitalsTick {
        let t = self.tick;
        let distressed = self.is_distress_tick(t);

        if t % c::BEHAVIOR_PERIOD_TICKS == 0 && !distressed {
            const CHOICES: [BehaviorState; 4] = [
                BehaviorState::Resting,
                BehaviorState::Active,
                BehaviorState::Resting,
                BehaviorState::Fussing,
            ];
            let idx = ((rng.next_f64() * CHOICES.len() as f64) as usize).min(CHOICES.len() - 1);
            self.behavior = CHOICES[idx];
            self.hr_base = match self.behavior {
                BehaviorState::Active => c::HR_ACTIVE,
                BehaviorState::Fussing => c::HR_FUSSING,
                _ => c::HR_RESTING,
            };
            debug!(tick = t, behavior = %self.behavior, hr_base = self.hr_base, "behavior transition");
        }

        if distressed {
            self.behavior = BehaviorState::AcuteTachycardia;
            self.hr_base = c::HR_DISTRESS;
            self.spo2_base = c::SPO2_DISTRESS;
        } else {
            self.spo2_base = c::SPO2_NOMINAL;
        }

        let resp_wave = (t as f64 * self.resp_freq).sin();
        self.hr_current = self.hr_base + resp_wave * 5.0 + rng.next_f64() * 3.0;

        let hr_period = 60.0 / self.hr_current;
        let beat_pos = (t as f64 * c::BEAT_CONSTANT) % hr_period;
        let (qrs_lo, qrs_hi) = c::QRS_PHASE_RANGE;
        let qrs = beat_pos > qrs_lo && beat_pos < qrs_hi;

        let mut confidence = c::QRS_CONFIDENCE_BASE + rng.next_f64() * c::QRS_CONFIDENCE_SPREAD;
        if distressed {
            confidence -= c::QRS_CONFIDENCE_DISTRESS_PENALTY;
        }
        let confidence = clamp_percent(confidence);

        let ecg = if qrs {
            c::ECG_QRS_BASE + rng.next_f64() * c::ECG_QRS_SPREAD
        } else {
            c::ECG_FLOOR_BASE + rng.next_f64() * c::ECG_FLOOR_SPREAD
        };
        let ppg = (t as f64 * c::PPG_WAVE_FREQUENCY).sin() * c::PPG_WAVE_AMPLITUDE
            + c::PPG_BASELINE
            + rng.next_f64() * c::PPG_NOISE_SPREAD;
        let spo2 = self.spo2_base + resp_wave * 0.4 + rng.next_f64() * 0.2;

        let sample = VitalsSample {
            time: t,
            ecg,
            ppg,
            spo2,
            qrs_triggered: qrs,
            qrs_confidence: confidence,
        };
        self.samples.push(sample);

        if qrs && t % c::EVENT_PERIOD_TICKS == 0 {
            self.events.insert(
                0,
                DetectedEvent {
                    id: t,
                    time: t,
                    kind: DetectedEventKind::QrsComplex,
                    confidence,
                },
            );
            self.events.truncate(c::EVENT_LIST_LEN);
            trace!(tick = t, confidence, "qrs event emitted");
        }

        if t % c::METRICS_PERIOD_TICKS == 0 {
            let temp_c = c::TEMP_BASE_C
                + if distressed {
                    c::TEMP_DISTRESS_BIAS_C
                } else {
                    (t as f64 * 0.01).sin() * 0.1
                };
            self.metrics = VitalMetrics {
                bpm: self.hr_current.round() as u32,
                spo2: clamp_percent(spo2).round() as u32,
                temp_c,
                sqi: clamp_percent(95.0 + (rng.next_f64() * 4.0 - 2.0)),
                ecg_peak: (ecg * 100.0).round() / 100.0,
            };
        }

        let assessment_request = if t % c::ASSESSMENT_PERIOD_TICKS == 0 {
            Some(AssessmentRequest { tick: t, distressed })
        } else {
            None
        };

        self.tick += 1;
        VitalsTick {
            sample,
            assessment_request,
        }
    }

    /// Land a deferred assessment. Status history gains an entry only when
    /// the level differs from the previous entry (or the history is empty).
    pub fn apply_assessment(&mut self, outcome: AssessmentOutcome) {
        let level = outcome.assessment.level;
        if level != self.last_level || self.status_history.is_empty() {
            self.status_history.insert(
                0,
                StatusHistoryEntry {
                    timestamp: outcome.tick,
                    level,
                    reason: outcome.reason,
                },
            );
            self.status_history.truncate(c::STATUS_HISTORY_LEN);
            self.last_level = level;
            debug!(tick = outcome.tick, level = %level, "assessment level transition");
        }
        self.assessment = outcome.assessment;
    }

    /// Current tick counter (next tick to be computed).
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Current behavior state.
    pub fn behavior(&self) -> BehaviorState {
        self.behavior
    }

    /// Bounded stream window, oldest first.
    pub fn samples(&self) -> &SlidingWindow<VitalsSample> {
        &self.samples
    }

    /// Most recent detected events, newest first, at most three.
    pub fn detected_events(&self) -> &[DetectedEvent] {
        &self.events
    }

    /// Latest display metrics snapshot.
    pub fn metrics(&self) -> &VitalMetrics {
        &self.metrics
    }

    /// Latest applied assessment.
    pub fn assessment(&self) -> &AiAssessment {
        &self.assessment
    }

    /// Status transitions, newest first, at most five.
    pub fn status_history(&self) -> &[StatusHistoryEntry] {
        &self.status_history
    }

    /// Configuration the simulator was built with.
    pub fn config(&self) -> &VitalsConfig {
        &self.config
    }
}
