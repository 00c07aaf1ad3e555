use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::phase_sequencer::PhaseTimer;
use crate::q_learning::{AgentAction, PendingDecision, QAgent};
use crate::traffic_queues::TrafficQueues;
use crate::TickCounter;

/// Intersection-wide aggregates, refreshed at the end of every tick.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficMetrics {
    /// Sum of accumulated wait over all approaches, in seconds.
    pub total_wait: f64,
    /// Mean wait per queued vehicle.
    pub average_wait: f64,
    pub total_vehicles: u32,
    /// Reward credited to the agent this tick (always <= 0).
    pub latest_reward: f64,
    pub last_action: Option<AgentAction>,
    /// Distinct states with a learned value.
    pub states_explored: usize,
    pub transitions_fired: u64,
    pub ticks: u64,
}

pub fn update_traffic_metrics(
    tick: Res<TickCounter>,
    queues: Res<TrafficQueues>,
    decision: Res<PendingDecision>,
    agent: Res<QAgent>,
    timer: Res<PhaseTimer>,
    mut metrics: ResMut<TrafficMetrics>,
) {
    *metrics = TrafficMetrics {
        total_wait: queues.total_wait(),
        average_wait: queues.average_wait(),
        total_vehicles: queues.total_vehicles(),
        latest_reward: decision.reward,
        last_action: Some(decision.action),
        states_explored: agent.table().len(),
        transitions_fired: timer.transitions_fired,
        ticks: tick.0,
    };
    debug!(
        "tick {}: {} vehicles, avg wait {:.2}s, reward {:.3}, action {}",
        metrics.ticks,
        metrics.total_vehicles,
        metrics.average_wait,
        metrics.latest_reward,
        decision.action.name()
    );
}

pub struct MetricsPlugin;

impl Plugin for MetricsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrafficMetrics>().add_systems(
            crate::SignalTick,
            update_traffic_metrics.in_set(crate::SignalSet::Report),
        );
    }
}
