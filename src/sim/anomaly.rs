//! Multimodal anomaly engine with pathology injection and fused scoring
//! Location: src/sim/anomaly.rs

use crate::config::constants::anomaly as c;
use crate::config::AnomalyConfig;
use crate::sim::clamp_unit;
use crate::sim::rng::RandomSource;
use crate::sim::types::{
    AnomalyHistoryEntry, BehaviorState, EngineStatus, PathologyState, SensorSample,
};
use crate::sim::window::SlidingWindow;
use tracing::debug;

/// Weighted fusion of the three channel deviations, capped at 1.0.
pub fn fuse_score(config: &AnomalyConfig, ecg: f64, ppg: f64, scg: f64) -> f64 {
    (ecg * config.ecg_weight + ppg * config.ppg_weight + scg * config.scg_weight).min(1.0)
}

/// Richer physiological state machine producing ECG/PPG/SCG waveforms,
/// per-channel deviation contributions and a fused anomaly score.
#[derive(Debug, Clone)]
pub struct AnomalyEngine {
    config: AnomalyConfig,
    tick: u64,
    behavior: BehaviorState,
    pathology: PathologyState,
    hr_target: f64,
    hr_base: f64,
    hr_current: f64,
    resp_freq: f64,
    motion_intensity: f64,
    ectopic_probability: f64,
    calibration_progress: f64,
    // Long-run baseline; smoothed for parity with the original engine but
    // not read by any published metric.
    baseline_hr: f64,
    samples: SlidingWindow<SensorSample>,
    history: SlidingWindow<AnomalyHistoryEntry>,
}

impl AnomalyEngine {
    /// Create an engine at its initial resting state, uncalibrated.
    pub fn new(config: AnomalyConfig) -> Self {
        let samples = SlidingWindow::new(config.sample_window);
        let history = SlidingWindow::new(config.history_window);
        Self {
            config,
            tick: 0,
            behavior: BehaviorState::Resting,
            pathology: PathologyState::None,
            hr_target: 110.0,
            hr_base: 110.0,
            hr_current: 110.0,
            resp_freq: 0.05,
            motion_intensity: 0.05,
            ectopic_probability: c::ECTOPIC_BASELINE,
            calibration_progress: 0.0,
            baseline_hr: 110.0,
            samples,
            history,
        }
    }

    /// Draw one transition outcome. Pathology resets before the draw, so
    /// behavior outcomes leave no stale pathology behind.
    fn transition(&mut self, draw: f64) {
        self.pathology = PathologyState::None;
        self.ectopic_probability = c::ECTOPIC_BASELINE;

        if draw > c::CUT_SVT {
            self.pathology = PathologyState::Svt;
            self.hr_target = c::HR_SVT;
            self.resp_freq = 0.12;
            self.motion_intensity = 0.1;
        } else if draw > c::CUT_BRADYCARDIA {
            self.pathology = PathologyState::Bradycardia;
            self.hr_target = c::HR_BRADYCARDIA;
            self.resp_freq = 0.03;
            self.motion_intensity = 0.02;
        } else if draw > c::CUT_PVC_BURST {
            self.pathology = PathologyState::PvcBurst;
            self.ectopic_probability = 0.45;
            self.hr_target = c::HR_PVC_BURST;
        } else if draw > c::CUT_CRYING {
            self.behavior = BehaviorState::Crying;
            self.hr_target = c::HR_CRYING;
            self.resp_freq = 0.14;
            self.motion_intensity = 0.9;
        } else if draw > c::CUT_ACTIVE {
            self.behavior = BehaviorState::Active;
            self.hr_target = c::HR_ACTIVE;
            self.resp_freq = 0.09;
            self.motion_intensity = 0.45;
        } else {
            self.behavior = BehaviorState::Resting;
            self.hr_target = c::HR_RESTING;
            self.resp_freq = 0.04;
            self.motion_intensity = 0.04;
        }

        debug!(
            tick = self.tick,
            draw,
            behavior = %self.behavior,
            pathology = %self.pathology,
            hr_target = self.hr_target,
            "state transition"
        );
    }

    /// Advance one tick and return the published sample. All derived values
    /// come from this tick's single consistent snapshot of state.
    pub fn advance(&mut self, rng: &mut dyn RandomSource) -> SensorSample {
        let t = self.tick;

        if t % c::TRANSITION_PERIOD_TICKS == 0 {
            let draw = rng.next_f64();
            self.transition(draw);
        }

        self.hr_base += (self.hr_target - self.hr_base) * self.config.hr_smoothing_alpha;
        let resp_wave = (t as f64 * self.resp_freq).sin();
        self.hr_current = self.hr_base + resp_wave * 10.0 + (rng.next_f64() * 5.0 - 2.5);

        let hr_period = 60.0 / self.hr_current;
        let mut beat_position = (t as f64 * c::BEAT_CONSTANT) % hr_period;
        let is_pvc = rng.next_f64() < self.ectopic_probability;
        if is_pvc {
            beat_position = c::PVC_PHASE;
        }

        let qrs_width_factor = match self.pathology {
            PathologyState::Svt => 0.8,
            PathologyState::Bradycardia => 1.2,
            _ => 1.0,
        };
        let qrs_amplitude = if beat_position < 0.12 {
            if is_pvc {
                2.1
            } else {
                1.3 * qrs_width_factor + rng.next_f64() * 0.25
            }
        } else {
            0.06 + rng.next_f64() * 0.04
        };

        let motion_noise = (rng.next_f64() - 0.5) * self.motion_intensity * 1.5;
        let stroke_volume_factor = match self.pathology {
            PathologyState::Svt => 0.45,
            PathologyState::Bradycardia => 1.35,
            _ => 1.0,
        };

        let ecg_deviation = self.ecg_deviation(is_pvc) + rng.next_f64() * 0.05;
        let ppg_deviation = Self::ppg_deviation(stroke_volume_factor) + rng.next_f64() * 0.05;
        let scg_deviation = self.scg_deviation(motion_noise);

        let ecg_deviation = ecg_deviation.clamp(0.0, c::DEVIATION_CLAMP);
        let ppg_deviation = ppg_deviation.clamp(0.0, c::DEVIATION_CLAMP);
        let scg_deviation = scg_deviation.clamp(0.0, c::DEVIATION_CLAMP);

        let score = clamp_unit(fuse_score(
            &self.config,
            ecg_deviation,
            ppg_deviation,
            scg_deviation,
        ));

        let sample = SensorSample {
            time: t,
            ecg: qrs_amplitude + motion_noise,
            ppg: ((t as f64 * c::BEAT_CONSTANT).sin() * 0.25 + 0.6) * stroke_volume_factor,
            scg: (t as f64 * 0.6).cos() * 0.2 * stroke_volume_factor,
            anomaly_score: Some(score),
        };
        self.samples.push(sample);

        if t % c::HISTORY_PERIOD_TICKS == 0 {
            self.history.push(AnomalyHistoryEntry {
                timestamp: t,
                score,
                ecg_deviation,
                ppg_deviation,
                scg_deviation,
                behavior: self.behavior,
                pathology: self.pathology,
            });
        }

        if self.calibration_progress < c::CALIBRATION_MAX {
            self.calibration_progress =
                (self.calibration_progress + self.config.calibration_increment).min(c::CALIBRATION_MAX);
        } else if self.pathology == PathologyState::None {
            // Inert long-run baseline bookkeeping, kept for behavioral parity.
            self.baseline_hr = self.baseline_hr * (1.0 - self.config.baseline_alpha)
                + self.hr_current * self.config.baseline_alpha;
        }

        self.tick += 1;
        sample
    }

    fn ecg_deviation(&self, is_pvc: bool) -> f64 {
        if is_pvc {
            0.8
        } else {
            match self.pathology {
                PathologyState::Svt => 0.6,
                PathologyState::Bradycardia => 0.4,
                _ => 0.05,
            }
        }
    }

    fn ppg_deviation(stroke_volume_factor: f64) -> f64 {
        if stroke_volume_factor < 0.8 {
            0.5
        } else if stroke_volume_factor > 1.2 {
            0.3
        } else {
            0.1
        }
    }

    // Crying wins over an active pathology; pathology draws leave the
    // behavior state untouched, so the overlap is reachable.
    fn scg_deviation(&self, motion_noise: f64) -> f64 {
        let base = if self.behavior == BehaviorState::Crying {
            0.4
        } else if self.pathology.is_active() {
            0.5
        } else {
            0.1
        };
        base + if motion_noise > 0.5 { 0.2 } else { 0.0 }
    }

    /// Three-way status classification, recomputed fresh from the latest
    /// sample, current pathology and calibration progress.
    pub fn status(&self) -> EngineStatus {
        let last_score = self
            .samples
            .latest()
            .and_then(|s| s.anomaly_score)
            .unwrap_or(0.0);
        if self.pathology.is_active() {
            EngineStatus::Pathological(self.pathology)
        } else if last_score > self.config.anomaly_threshold {
            EngineStatus::OutlierAlert
        } else if self.calibration_progress < c::CALIBRATION_MAX {
            EngineStatus::Calibrating
        } else {
            EngineStatus::Stable
        }
    }

    /// Current tick counter (next tick to be computed).
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Current behavior state.
    pub fn behavior(&self) -> BehaviorState {
        self.behavior
    }

    /// Current pathology state.
    pub fn pathology(&self) -> PathologyState {
        self.pathology
    }

    /// Current heart-rate target, bpm.
    pub fn hr_target(&self) -> f64 {
        self.hr_target
    }

    /// Smoothed instantaneous heart rate, bpm.
    pub fn hr_current(&self) -> f64 {
        self.hr_current
    }

    /// Calibration progress in `[0, 100]`.
    pub fn calibration_progress(&self) -> f64 {
        self.calibration_progress
    }

    /// Bounded sample window, oldest first.
    pub fn samples(&self) -> &SlidingWindow<SensorSample> {
        &self.samples
    }

    /// Bounded deviation history, oldest first.
    pub fn history(&self) -> &SlidingWindow<AnomalyHistoryEntry> {
        &self.history
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &AnomalyConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ConstantRandom, ScriptedRandom, SeededRandom};

    #[test]
    fn test_transition_threshold_table() {
        let cases = [
            (0.95, PathologyState::Svt, c::HR_SVT),
            (0.90, PathologyState::Bradycardia, c::HR_BRADYCARDIA),
            (0.84, PathologyState::PvcBurst, c::HR_PVC_BURST),
        ];
        for (draw, pathology, hr) in cases {
            let mut engine = AnomalyEngine::new(AnomalyConfig::default());
            engine.transition(draw);
            assert_eq!(engine.pathology(), pathology, "draw {draw}");
            assert_eq!(engine.hr_target(), hr, "draw {draw}");
        }

        let behaviors = [
            (0.70, BehaviorState::Crying, c::HR_CRYING),
            (0.50, BehaviorState::Active, c::HR_ACTIVE),
            (0.30, BehaviorState::Resting, c::HR_RESTING),
        ];
        for (draw, behavior, hr) in behaviors {
            let mut engine = AnomalyEngine::new(AnomalyConfig::default());
            engine.transition(draw);
            assert_eq!(engine.pathology(), PathologyState::None, "draw {draw}");
            assert_eq!(engine.behavior(), behavior, "draw {draw}");
            assert_eq!(engine.hr_target(), hr, "draw {draw}");
        }
    }

    #[test]
    fn test_pathology_resets_on_behavior_outcome() {
        let mut engine = AnomalyEngine::new(AnomalyConfig::default());
        engine.transition(0.95);
        assert_eq!(engine.pathology(), PathologyState::Svt);
        engine.transition(0.30);
        assert_eq!(engine.pathology(), PathologyState::None);
        assert!((engine.ectopic_probability - c::ECTOPIC_BASELINE).abs() < 1e-12);
    }

    #[test]
    fn test_fused_score_formula() {
        let cfg = AnomalyConfig::default();
        let score = fuse_score(&cfg, 0.8, 0.5, 0.5);
        assert!((score - (0.5 * 0.8 + 0.3 * 0.5 + 0.2 * 0.5)).abs() < 1e-12);
        // Saturates at 1.0
        assert_eq!(fuse_score(&cfg, 1.05, 1.05, 1.05), 1.0);
    }

    #[test]
    fn test_score_and_deviations_clamped() {
        let mut engine = AnomalyEngine::new(AnomalyConfig::default());
        let mut rng = SeededRandom::new(99);
        for _ in 0..600 {
            let sample = engine.advance(&mut rng);
            let score = sample.anomaly_score.unwrap();
            assert!((0.0..=1.0).contains(&score), "score {score}");
        }
        for entry in engine.history().iter() {
            assert!((0.0..=c::DEVIATION_CLAMP).contains(&entry.ecg_deviation));
            assert!((0.0..=c::DEVIATION_CLAMP).contains(&entry.ppg_deviation));
            assert!((0.0..=c::DEVIATION_CLAMP).contains(&entry.scg_deviation));
        }
    }

    #[test]
    fn test_windows_bounded() {
        let mut engine = AnomalyEngine::new(AnomalyConfig::default());
        let mut rng = SeededRandom::new(1);
        for _ in 0..1000 {
            engine.advance(&mut rng);
        }
        assert_eq!(engine.samples().len(), 60);
        assert_eq!(engine.history().len(), 40);
        let times: Vec<u64> = engine.samples().iter().map(|s| s.time).collect();
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_calibration_monotone_and_saturating() {
        let mut engine = AnomalyEngine::new(AnomalyConfig::default());
        let mut rng = ConstantRandom(0.3);
        let mut previous = engine.calibration_progress();
        for _ in 0..300 {
            engine.advance(&mut rng);
            let progress = engine.calibration_progress();
            assert!(progress >= previous);
            assert!(progress <= 100.0);
            previous = progress;
        }
        assert_eq!(engine.calibration_progress(), 100.0);
    }

    #[test]
    fn test_status_branches() {
        // Uncalibrated, resting: training label
        let mut engine = AnomalyEngine::new(AnomalyConfig::default());
        let mut rng = ConstantRandom(0.3);
        engine.advance(&mut rng);
        assert_eq!(engine.status(), EngineStatus::Calibrating);

        // Calibrated, resting: stable
        for _ in 0..300 {
            engine.advance(&mut rng);
        }
        assert_eq!(engine.status(), EngineStatus::Stable);

        // Pathology dominates regardless of score
        let mut svt = AnomalyEngine::new(AnomalyConfig::default());
        let mut rng = ConstantRandom(0.96);
        svt.advance(&mut rng);
        assert_eq!(svt.status(), EngineStatus::Pathological(PathologyState::Svt));
    }

    #[test]
    fn test_pvc_trigger_forces_early_phase_and_high_amplitude() {
        let mut engine = AnomalyEngine::new(AnomalyConfig::default());
        // Transition draw 0.84 selects PVC burst (ectopic probability 0.45),
        // then a 0.1 ectopic draw fires a premature contraction.
        let mut rng = ScriptedRandom::new(vec![0.84, 0.5, 0.1], 0.5);
        let sample = engine.advance(&mut rng);
        // PVC amplitude is fixed at 2.1 before motion noise
        assert!(sample.ecg > 1.5, "ecg {}", sample.ecg);
        let entry = engine.history().latest().unwrap();
        assert!(entry.ecg_deviation >= 0.8);
    }

    #[test]
    fn test_crying_scg_base_survives_pathology_overlap() {
        let mut engine = AnomalyEngine::new(AnomalyConfig::default());
        engine.transition(0.70);
        assert_eq!(engine.behavior(), BehaviorState::Crying);
        engine.transition(0.95);
        assert_eq!(engine.behavior(), BehaviorState::Crying);
        assert_eq!(engine.pathology(), PathologyState::Svt);
        // Crying keeps the lower SCG base even with SVT active
        assert_eq!(engine.scg_deviation(0.0), 0.4);
        assert_eq!(engine.scg_deviation(0.6), 0.4 + 0.2);
    }

    #[test]
    fn test_svt_depresses_stroke_volume() {
        let mut engine = AnomalyEngine::new(AnomalyConfig::default());
        let mut rng = ConstantRandom(0.96);
        for _ in 0..20 {
            engine.advance(&mut rng);
        }
        // PPG scale 0.45 keeps the waveform well below the nominal envelope
        let max_ppg = engine
            .samples()
            .iter()
            .map(|s| s.ppg)
            .fold(f64::MIN, f64::max);
        assert!(max_ppg < 0.6, "max ppg {max_ppg}");
    }

    #[test]
    fn test_baseline_only_smooths_when_calibrated_and_clean() {
        let mut engine = AnomalyEngine::new(AnomalyConfig::default());
        let mut rng = ConstantRandom(0.3);
        let initial = engine.baseline_hr;
        for _ in 0..300 {
            engine.advance(&mut rng);
        }
        // 250 ticks at +0.4 per tick reach the 100 saturation point, after
        // which the resting run starts moving the baseline
        assert_ne!(engine.baseline_hr, initial);
    }
}
