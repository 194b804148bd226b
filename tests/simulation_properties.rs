//! End-to-end simulation behavior across the three generators.

use cardiosim_core::config::{AnomalyConfig, SynapticConfig, VitalsConfig};
use cardiosim_core::sim::anomaly::{fuse_score, AnomalyEngine};
use cardiosim_core::sim::rng::{ConstantRandom, SeededRandom};
use cardiosim_core::sim::synaptic::SynapticSimulator;
use cardiosim_core::sim::types::{BehaviorState, EngineStatus, PathologyState};
use cardiosim_core::sim::vitals::VitalSignSimulator;
use cardiosim_core::sim::window::SlidingWindow;
use proptest::prelude::*;

#[test]
fn svt_run_elevates_deviations_over_resting_run() {
    let mut svt = AnomalyEngine::new(AnomalyConfig::default());
    let mut svt_rng = ConstantRandom(0.96);
    let mut resting = AnomalyEngine::new(AnomalyConfig::default());
    let mut resting_rng = ConstantRandom(0.30);

    for _ in 0..140 {
        svt.advance(&mut svt_rng);
        resting.advance(&mut resting_rng);
    }

    assert_eq!(svt.pathology(), PathologyState::Svt);
    assert_eq!(svt.hr_target(), 245.0);
    assert_eq!(resting.pathology(), PathologyState::None);
    assert_eq!(resting.behavior(), BehaviorState::Resting);

    let mean = |engine: &AnomalyEngine| {
        let entries: Vec<f64> = engine.history().iter().map(|e| e.score).collect();
        entries.iter().sum::<f64>() / entries.len() as f64
    };
    assert!(
        mean(&svt) > mean(&resting) + 0.2,
        "svt {:.3} vs resting {:.3}",
        mean(&svt),
        mean(&resting)
    );
    assert!(matches!(svt.status(), EngineStatus::Pathological(PathologyState::Svt)));
}

#[test]
fn hr_eases_toward_target_under_smoothing() {
    let mut engine = AnomalyEngine::new(AnomalyConfig::default());
    let mut rng = ConstantRandom(0.96);
    engine.advance(&mut rng);
    let early = engine.hr_current();
    for _ in 0..120 {
        engine.advance(&mut rng);
    }
    let late = engine.hr_current();
    assert!(late > early);
    // Noise and respiration keep the rate within a small band of target
    assert!((late - 245.0).abs() < 20.0, "late {late}");
}

#[test]
fn published_history_scores_match_fusion_weights() {
    let mut engine = AnomalyEngine::new(AnomalyConfig::default());
    let mut rng = SeededRandom::new(11);
    for _ in 0..400 {
        engine.advance(&mut rng);
    }
    let cfg = engine.config().clone();
    for entry in engine.history().iter() {
        let expected = fuse_score(
            &cfg,
            entry.ecg_deviation,
            entry.ppg_deviation,
            entry.scg_deviation,
        )
        .min(1.0);
        assert!((entry.score - expected).abs() < 1e-9);
    }
}

#[test]
fn vitals_distress_windows_degrade_and_recover() {
    let mut sim = VitalSignSimulator::new(VitalsConfig::default());
    let mut rng = SeededRandom::new(21);

    let mut distressed_spo2 = Vec::new();
    let mut calm_spo2 = Vec::new();
    for _ in 0..800 {
        let tick = sim.advance(&mut rng);
        let t = tick.sample.time;
        let in_distress = (t > 200 && t < 350) || (t > 600 && t < 750);
        if in_distress {
            distressed_spo2.push(tick.sample.spo2);
        } else if t > 100 {
            calm_spo2.push(tick.sample.spo2);
        }
    }

    let mean = |v: &[f64]| v.iter().sum::<f64>() / v.len() as f64;
    assert!(mean(&distressed_spo2) < 94.0);
    assert!(mean(&calm_spo2) > 96.0);
}

#[test]
fn vitals_sample_stream_is_monotonic_and_bounded() {
    let mut sim = VitalSignSimulator::new(VitalsConfig::default());
    let mut rng = SeededRandom::new(22);
    for _ in 0..500 {
        sim.advance(&mut rng);
    }
    assert_eq!(sim.samples().len(), sim.config().sample_window);
    let times: Vec<u64> = sim.samples().iter().map(|s| s.time).collect();
    assert!(times.windows(2).all(|w| w[0] + 1 == w[1]));
}

#[test]
fn synaptic_burst_window_lifts_mean_rates() {
    let config = SynapticConfig::default();
    let mut sim = SynapticSimulator::new(config);
    let mut rng = SeededRandom::new(31);

    let mut burst_rates = Vec::new();
    let mut quiet_rates = Vec::new();
    for _ in 0..160 {
        let tick = sim.advance(&mut rng);
        if tick.rates.burst_event {
            burst_rates.push(tick.rates.input);
        } else {
            quiet_rates.push(tick.rates.input);
        }
    }

    let mean = |v: &[f64]| v.iter().sum::<f64>() / v.len() as f64;
    assert!(!burst_rates.is_empty());
    assert!(mean(&burst_rates) > mean(&quiet_rates) + 30.0);
}

proptest! {
    #[test]
    fn window_never_exceeds_capacity(capacity in 1usize..64, pushes in 0usize..256) {
        let mut window = SlidingWindow::new(capacity);
        for i in 0..pushes {
            window.push(i);
        }
        prop_assert!(window.len() <= capacity);
        prop_assert_eq!(window.len(), pushes.min(capacity));
    }

    #[test]
    fn window_eviction_preserves_suffix(capacity in 1usize..32, pushes in 1usize..128) {
        let mut window = SlidingWindow::new(capacity);
        for i in 0..pushes {
            window.push(i);
        }
        let kept: Vec<usize> = window.iter().copied().collect();
        let expected: Vec<usize> = (pushes.saturating_sub(capacity)..pushes).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn calibration_saturates_for_any_increment(increment in 0.01f64..5.0) {
        let config = AnomalyConfig { calibration_increment: increment, ..AnomalyConfig::default() };
        let mut engine = AnomalyEngine::new(config);
        let mut rng = ConstantRandom(0.3);
        let mut previous = 0.0f64;
        for _ in 0..((100.0 / increment) as usize + 10) {
            engine.advance(&mut rng);
            let progress = engine.calibration_progress();
            prop_assert!(progress >= previous);
            prop_assert!(progress <= 100.0);
            previous = progress;
        }
        prop_assert_eq!(engine.calibration_progress(), 100.0);
    }
}
