//! Timer-driven simulator tasks with scoped teardown
//! Location: src/runtime/mod.rs

use crate::sim::rng::RandomSource;
use crate::sim::vitals::{build_assessment, VitalSignSimulator, VitalsTick};
use crate::sim::anomaly::AnomalyEngine;
use crate::sim::synaptic::{SynapticSimulator, SynapticTick};
use crate::sim::types::SensorSample;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Consumer of published tick records. Each published record is computed
/// from a single tick's consistent snapshot, and `time` is monotonically
/// increasing across calls.
pub trait SampleSink<T>: Send {
    /// Receive one published record.
    fn publish(&mut self, record: T);
}

impl<T, F> SampleSink<T> for F
where
    F: FnMut(T) + Send,
{
    fn publish(&mut self, record: T) {
        self(record)
    }
}

/// Handle to a running simulator task. Dropping the handle detaches the
/// task; call [`SimulatorHandle::stop`] to tear it down.
pub struct SimulatorHandle {
    alive: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl SimulatorHandle {
    /// Whether the task has not been stopped yet.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Stop the tick loop and discard any deferred work still in flight.
    pub fn stop(self) {
        self.alive.store(false, Ordering::Release);
        self.task.abort();
        debug!("simulator task stopped");
    }
}

/// Apply a deferred assessment outcome only while the owning task is
/// still alive. Outcomes landing after teardown are dropped.
fn apply_if_alive(
    alive: &AtomicBool,
    simulator: &Mutex<VitalSignSimulator>,
    outcome: crate::sim::vitals::AssessmentOutcome,
) -> bool {
    if !alive.load(Ordering::Acquire) {
        debug!(tick = outcome.tick, "discarding assessment after teardown");
        return false;
    }
    simulator.lock().apply_assessment(outcome);
    true
}

/// Spawn the vital-sign simulator on its own periodic timer. Assessment
/// requests produced by the tick loop are recomputed after the configured
/// artificial delay and land on whatever later tick is current, unless the
/// handle was stopped in the meantime.
pub fn spawn_vitals<R, S>(
    simulator: Arc<Mutex<VitalSignSimulator>>,
    mut rng: R,
    mut sink: S,
) -> SimulatorHandle
where
    R: RandomSource + Clone + Send + 'static,
    S: SampleSink<VitalsTick> + 'static,
{
    let alive = Arc::new(AtomicBool::new(true));
    let task_alive = Arc::clone(&alive);
    let (tick_ms, delay_ms) = {
        let sim = simulator.lock();
        (sim.config().tick_interval_ms, sim.config().assessment_delay_ms)
    };
    info!(tick_ms, delay_ms, "starting vital-sign simulator");

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
        loop {
            interval.tick().await;
            if !task_alive.load(Ordering::Acquire) {
                break;
            }
            let tick = simulator.lock().advance(&mut rng);
            if let Some(request) = tick.assessment_request {
                let deferred_alive = Arc::clone(&task_alive);
                let deferred_sim = Arc::clone(&simulator);
                let mut deferred_rng = rng.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    let outcome = build_assessment(request, &mut deferred_rng);
                    apply_if_alive(&deferred_alive, &deferred_sim, outcome);
                });
            }
            sink.publish(tick);
        }
    });

    SimulatorHandle { alive, task }
}

/// Spawn the anomaly engine on its own periodic timer.
pub fn spawn_anomaly<R, S>(
    engine: Arc<Mutex<AnomalyEngine>>,
    mut rng: R,
    mut sink: S,
) -> SimulatorHandle
where
    R: RandomSource + Send + 'static,
    S: SampleSink<SensorSample> + 'static,
{
    let alive = Arc::new(AtomicBool::new(true));
    let task_alive = Arc::clone(&alive);
    let tick_ms = engine.lock().config().tick_interval_ms;
    info!(tick_ms, "starting anomaly engine");

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
        loop {
            interval.tick().await;
            if !task_alive.load(Ordering::Acquire) {
                break;
            }
            let sample = engine.lock().advance(&mut rng);
            sink.publish(sample);
        }
    });

    SimulatorHandle { alive, task }
}

/// Spawn the synaptic activity simulator on its own periodic timer.
pub fn spawn_synaptic<R, S>(
    simulator: Arc<Mutex<SynapticSimulator>>,
    mut rng: R,
    mut sink: S,
) -> SimulatorHandle
where
    R: RandomSource + Send + 'static,
    S: SampleSink<SynapticTick> + 'static,
{
    let alive = Arc::new(AtomicBool::new(true));
    let task_alive = Arc::clone(&alive);
    let tick_ms = simulator.lock().config().tick_interval_ms;
    info!(tick_ms, "starting synaptic simulator");

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
        loop {
            interval.tick().await;
            if !task_alive.load(Ordering::Acquire) {
                break;
            }
            let tick = simulator.lock().advance(&mut rng);
            sink.publish(tick);
        }
    });

    SimulatorHandle { alive, task }
}
