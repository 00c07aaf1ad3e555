mod action;
mod agent;
mod state;
mod systems;
mod table;

#[cfg(test)]
mod tests;

pub use action::AgentAction;
pub use agent::{reward, QAgent};
pub use state::{state_key, StateKey, WorldState};
pub use systems::{learn_from_tick, observe_and_decide, PendingDecision};
pub use table::QTable;

use bevy::prelude::*;

use crate::simulation_sets::{SignalSet, SignalTick};

pub struct QLearningPlugin;

impl Plugin for QLearningPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<QAgent>()
            .init_resource::<PendingDecision>()
            .add_systems(SignalTick, observe_and_decide.in_set(SignalSet::Observe))
            .add_systems(SignalTick, learn_from_tick.in_set(SignalSet::Learn));
    }
}
