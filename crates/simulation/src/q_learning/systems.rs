use bevy::prelude::*;

use super::action::AgentAction;
use super::agent::{reward, QAgent};
use super::state::WorldState;
use crate::petri_net::PetriNet;
use crate::sim_rng::SimRng;
use crate::traffic_queues::TrafficQueues;

/// The agent's decision for the tick in flight, carried from the Observe
/// phase to the Learn phase.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PendingDecision {
    /// Pre-tick state; taken by the Learn phase.
    pub state: Option<WorldState>,
    pub action: AgentAction,
    /// Reward of the pre-tick traffic, scored before the queues move.
    pub reward: f64,
}

impl Default for PendingDecision {
    fn default() -> Self {
        Self {
            state: None,
            action: AgentAction::ExtendCurrent,
            reward: 0.0,
        }
    }
}

/// Snapshot the pre-tick world, score it and pick an action.
pub fn observe_and_decide(
    net: Res<PetriNet>,
    queues: Res<TrafficQueues>,
    agent: Res<QAgent>,
    mut rng: ResMut<SimRng>,
    mut pending: ResMut<PendingDecision>,
) {
    let state = WorldState::observe(&queues, net.current_phase());
    let action = agent.choose_action(&state, &AgentAction::ALL, &mut rng.0);
    *pending = PendingDecision {
        state: Some(state),
        action,
        reward: reward(&queues),
    };
}

/// Update the table from the pre-tick state and reward and the state left
/// after firing and queue movement.
///
/// The reward scores the pre-tick traffic while the next state is
/// post-tick, so the credit is offset by one step. Changing that offset
/// changes what the agent learns; revisit it together with the reward.
pub fn learn_from_tick(
    net: Res<PetriNet>,
    queues: Res<TrafficQueues>,
    mut agent: ResMut<QAgent>,
    mut pending: ResMut<PendingDecision>,
) {
    let Some(state) = pending.state.take() else {
        return;
    };
    let next = WorldState::observe(&queues, net.current_phase());
    agent.update(&state, pending.action, pending.reward, &next);
}
