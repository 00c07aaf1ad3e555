//! # Intersection — synchronous facade over the signal simulation
//!
//! Wraps a `bevy::app::App` carrying [`SimulationPlugin`] and exposes the
//! queries and commands an outside presentation layer needs. Every command
//! runs to completion before returning, so callers get single-flight ticks
//! for free as long as they hold the `Intersection` exclusively.

use std::collections::{BTreeMap, BTreeSet};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SignalConfig;
use crate::metrics::TrafficMetrics;
use crate::petri_net::{Direction, HistoryEntry, LightState, PetriNet, Phase};
use crate::phase_sequencer::{fire_manual, ControlMode, PhaseTimer};
use crate::q_learning::QAgent;
use crate::sim_rng::{SimRng, DEFAULT_SEED};
use crate::traffic_queues::{QueueSnapshot, TrafficQueues};
use crate::{reset_simulation, SignalTick, SimClock, SimulationPlugin, TickCounter};

/// Everything an observer renders, captured at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionSnapshot {
    pub tick: u64,
    pub time: f64,
    pub mode: ControlMode,
    pub phase: Phase,
    pub phase_elapsed: f64,
    pub green_duration: f64,
    pub marking: BTreeMap<String, u32>,
    pub enabled_transitions: BTreeSet<String>,
    pub history: Vec<HistoryEntry>,
    pub queues: Vec<QueueSnapshot>,
    pub metrics: TrafficMetrics,
}

impl IntersectionSnapshot {
    /// Collect a snapshot from a world running [`SimulationPlugin`].
    /// Returns `None` if any simulation resource is missing.
    pub fn collect(world: &World) -> Option<Self> {
        let net = world.get_resource::<PetriNet>()?;
        let queues = world.get_resource::<TrafficQueues>()?;
        let timer = world.get_resource::<PhaseTimer>()?;
        let config = world.get_resource::<SignalConfig>()?;
        Some(Self {
            tick: world.get_resource::<TickCounter>()?.0,
            time: world.get_resource::<SimClock>()?.seconds,
            mode: *world.get_resource::<ControlMode>()?,
            phase: net.current_phase(),
            phase_elapsed: timer.elapsed,
            green_duration: config.green_duration(),
            marking: net.marking(),
            enabled_transitions: net.enabled_transitions(),
            history: net.recent_history().to_vec(),
            queues: queues.snapshot(net),
            metrics: world.get_resource::<TrafficMetrics>()?.clone(),
        })
    }
}

pub struct Intersection {
    app: App,
}

impl Default for Intersection {
    fn default() -> Self {
        Self::new()
    }
}

impl Intersection {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Build an intersection whose arrivals, departures and exploration are
    /// replayable from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let mut app = App::new();
        app.insert_resource(SimRng::from_seed_u64(seed));
        app.add_plugins(SimulationPlugin);
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Advance one tick under the current control mode.
    pub fn tick(&mut self) {
        self.app.world_mut().run_schedule(SignalTick);
    }

    pub fn run_ticks(&mut self, n: u32) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Fire a transition by hand. Only honoured in manual mode; the engine's
    /// enablement check still applies.
    pub fn fire_manual(&mut self, transition: &str) -> bool {
        let world = self.app.world_mut();
        let mode = *world.resource::<ControlMode>();
        let now = world.resource::<SimClock>().seconds;
        world.resource_scope(|world, mut net: Mut<PetriNet>| {
            let mut timer = world.resource_mut::<PhaseTimer>();
            fire_manual(mode, &mut net, &mut timer, transition, now)
        })
    }

    pub fn reset(&mut self) {
        reset_simulation(self.app.world_mut());
    }

    /// Set the green duration in seconds. Out-of-range values are clamped;
    /// the applied value is returned.
    pub fn set_phase_duration(&mut self, seconds: f64) -> f64 {
        let applied = self
            .app
            .world_mut()
            .resource_mut::<SignalConfig>()
            .set_green_duration(seconds);
        info!("Green duration set to {}s", applied);
        applied
    }

    pub fn set_mode(&mut self, mode: ControlMode) {
        let mut current = self.app.world_mut().resource_mut::<ControlMode>();
        if *current != mode {
            info!("Control mode {} -> {}", current.name(), mode.name());
            *current = mode;
        }
    }

    pub fn clear_history(&mut self) {
        self.app.world_mut().resource_mut::<PetriNet>().clear_history();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn net(&self) -> &PetriNet {
        self.app.world().resource::<PetriNet>()
    }

    pub fn light_state(&self, direction: Direction) -> LightState {
        self.net().light_state(direction)
    }

    /// Light state by direction name; unknown names read as red.
    pub fn light_state_named(&self, direction: &str) -> LightState {
        self.net().light_state_named(direction)
    }

    pub fn current_phase(&self) -> Phase {
        self.net().current_phase()
    }

    pub fn marking(&self) -> BTreeMap<String, u32> {
        self.net().marking()
    }

    pub fn enabled_transitions(&self) -> BTreeSet<String> {
        self.net().enabled_transitions()
    }

    pub fn recent_history(&self) -> Vec<HistoryEntry> {
        self.net().recent_history().to_vec()
    }

    pub fn queues(&self) -> Vec<QueueSnapshot> {
        let world = self.app.world();
        world.resource::<TrafficQueues>().snapshot(self.net())
    }

    pub fn traffic(&self) -> &TrafficQueues {
        self.app.world().resource::<TrafficQueues>()
    }

    pub fn metrics(&self) -> &TrafficMetrics {
        self.app.world().resource::<TrafficMetrics>()
    }

    pub fn agent(&self) -> &QAgent {
        self.app.world().resource::<QAgent>()
    }

    pub fn mode(&self) -> ControlMode {
        *self.app.world().resource::<ControlMode>()
    }

    pub fn phase_elapsed(&self) -> f64 {
        self.app.world().resource::<PhaseTimer>().elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.app.world().resource::<TickCounter>().0
    }

    pub fn snapshot(&self) -> Option<IntersectionSnapshot> {
        IntersectionSnapshot::collect(self.app.world())
    }

    /// Access the ECS world mutably, for setups the facade does not cover.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
