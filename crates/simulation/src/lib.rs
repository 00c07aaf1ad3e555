use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod intersection;
pub mod metrics;
pub mod petri_net;
pub mod phase_sequencer;
pub mod q_learning;
pub mod realtime;
pub mod sim_rng;
pub mod simulation_sets;
pub mod traffic_queues;

pub use intersection::{Intersection, IntersectionSnapshot};
pub use simulation_sets::{SignalSet, SignalTick};

use config::TICK_SECONDS;
use metrics::TrafficMetrics;
use petri_net::PetriNet;
use phase_sequencer::PhaseTimer;
use q_learning::PendingDecision;
use sim_rng::SimRng;
use traffic_queues::TrafficQueues;

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Number of completed ticks since start or the last reset.
#[derive(Resource, Debug, Default)]
pub struct TickCounter(pub u64);

/// Simulation time in seconds; one tick advances it by [`TICK_SECONDS`].
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    pub seconds: f64,
}

pub fn advance_clock(mut tick: ResMut<TickCounter>, mut clock: ResMut<SimClock>) {
    tick.0 = tick.0.wrapping_add(1);
    clock.seconds += TICK_SECONDS;
}

/// Return the intersection to its starting configuration: initial marking,
/// empty history, fresh random queues, zeroed timers and metrics. The
/// control mode, signal timing and the agent's learned values are kept.
pub fn reset_simulation(world: &mut World) {
    if let Some(mut net) = world.get_resource_mut::<PetriNet>() {
        net.reset();
    }
    world.insert_resource(TickCounter::default());
    world.insert_resource(SimClock::default());
    world.insert_resource(PhaseTimer::default());
    world.insert_resource(PendingDecision::default());
    world.insert_resource(TrafficMetrics::default());

    world.init_resource::<SimRng>();
    world.init_resource::<TrafficQueues>();
    world.resource_scope(|world, mut rng: Mut<SimRng>| {
        world.resource_mut::<TrafficQueues>().reset(&mut rng.0, 0.0);
    });
    info!("Intersection reset to initial marking");
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(simulation_sets::SignalSetsPlugin)
            .init_resource::<SimRng>()
            .init_resource::<TickCounter>()
            .init_resource::<SimClock>()
            .insert_resource(PetriNet::intersection())
            .add_systems(SignalTick, advance_clock.in_set(SignalSet::Observe));

        app.add_plugins((
            phase_sequencer::PhaseSequencerPlugin,
            traffic_queues::TrafficQueuesPlugin,
            q_learning::QLearningPlugin,
            metrics::MetricsPlugin,
        ));
    }
}
