//! Three-layer spiking-network activity simulator
//! Location: src/sim/synaptic.rs

use crate::config::constants::synaptic as c;
use crate::config::SynapticConfig;
use crate::sim::rng::RandomSource;
use crate::sim::types::{SpikeEvent, SpikeKind, SpikeLayer, SpikeRates};
use crate::sim::window::SlidingWindow;
use tracing::trace;

/// Output of one synaptic tick: freshly generated spikes and the layer
/// firing-rate summary for the same instant.
#[derive(Debug, Clone)]
pub struct SynapticTick {
    /// Spikes emitted on this tick, at most one per layer.
    pub spikes: Vec<SpikeEvent>,
    /// Per-layer rate estimates published this tick.
    pub rates: SpikeRates,
}

/// Simulates spiking activity across input, hidden and output layers with
/// periodic arrhythmia-burst windows and hidden-layer transition phases.
#[derive(Debug, Clone)]
pub struct SynapticSimulator {
    config: SynapticConfig,
    tick: u64,
    raster: Vec<SpikeEvent>,
    rates: SlidingWindow<SpikeRates>,
}

impl SynapticSimulator {
    /// Create a simulator with empty raster and rate history.
    pub fn new(config: SynapticConfig) -> Self {
        let rates = SlidingWindow::new(config.rate_window);
        Self {
            config,
            tick: 0,
            raster: Vec::new(),
            rates,
        }
    }

    /// Whether tick `t` falls inside the scripted arrhythmia-burst window.
    pub fn in_burst(t: u64) -> bool {
        t > c::BURST_WINDOW.0 && t < c::BURST_WINDOW.1
    }

    /// Whether tick `t` falls inside a hidden-layer transition phase.
    pub fn in_transition(t: u64) -> bool {
        t % c::TRANSITION_MODULO < c::TRANSITION_SPAN
    }

    fn layer_probability(layer: SpikeLayer, burst: bool, transition: bool) -> f64 {
        match layer {
            SpikeLayer::Input => c::P_INPUT_BASE + if burst { c::P_INPUT_BURST } else { 0.0 },
            SpikeLayer::Hidden => {
                c::P_HIDDEN_BASE
                    + if burst { c::P_HIDDEN_BURST } else { 0.0 }
                    + if transition { c::P_HIDDEN_TRANSITION } else { 0.0 }
            }
            SpikeLayer::Output => c::P_OUTPUT_BASE + if burst { c::P_OUTPUT_BURST } else { 0.0 },
        }
    }

    /// Advance one tick: draw spikes per layer, age out old raster entries
    /// and publish the rate summary.
    pub fn advance(&mut self, rng: &mut dyn RandomSource) -> SynapticTick {
        let t = self.tick;
        let burst = Self::in_burst(t);
        let transition = Self::in_transition(t);

        let mut spikes = Vec::with_capacity(3);
        for layer in SpikeLayer::ALL {
            let probability = Self::layer_probability(layer, burst, transition);
            if rng.next_f64() < probability {
                let kind = if burst {
                    SpikeKind::Arrhythmia
                } else {
                    SpikeKind::Physiological
                };
                spikes.push(SpikeEvent {
                    time: t,
                    layer,
                    kind,
                });
            }
        }

        let retention = self.config.raster_retention_ticks;
        self.raster.retain(|s| s.time + retention > t);
        self.raster.extend(spikes.iter().copied());

        let rates = SpikeRates {
            time: t,
            input: 45.0 + if burst { 40.0 } else { 0.0 } + rng.next_f64() * 10.0,
            hidden: 20.0
                + if burst { 15.0 } else { 0.0 }
                + if transition { 5.0 } else { 0.0 }
                + rng.next_f64() * 5.0,
            output: 2.0 + if burst { 8.0 } else { 0.0 } + rng.next_f64() * 2.0,
            burst_event: burst,
        };
        self.rates.push(rates);

        trace!(
            tick = t,
            burst,
            transition,
            spikes = spikes.len(),
            "synaptic tick"
        );

        self.tick += 1;
        SynapticTick { spikes, rates }
    }

    /// Current tick counter (next tick to be computed).
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Spikes still within the raster retention horizon, oldest first.
    pub fn raster(&self) -> &[SpikeEvent] {
        &self.raster
    }

    /// Bounded rate history, oldest first.
    pub fn rates(&self) -> &SlidingWindow<SpikeRates> {
        &self.rates
    }

    /// Configuration the simulator was built with.
    pub fn config(&self) -> &SynapticConfig {
        &self.config
    }
}
