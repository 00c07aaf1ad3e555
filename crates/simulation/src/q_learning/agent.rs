use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::action::AgentAction;
use super::state::WorldState;
use super::table::QTable;
use crate::config::{DISCOUNT_FACTOR, EXPLORATION_RATE, LEARNING_RATE};
use crate::traffic_queues::TrafficQueues;

/// Tabular one-step Q-learning agent. The agent is the only owner of its
/// value table.
#[derive(Resource, Debug, Clone)]
pub struct QAgent {
    table: QTable,
    pub learning_rate: f64,
    pub discount_factor: f64,
    pub exploration_rate: f64,
}

impl Default for QAgent {
    fn default() -> Self {
        Self::new(LEARNING_RATE, DISCOUNT_FACTOR, EXPLORATION_RATE)
    }
}

impl QAgent {
    pub fn new(learning_rate: f64, discount_factor: f64, exploration_rate: f64) -> Self {
        Self {
            table: QTable::default(),
            learning_rate,
            discount_factor,
            exploration_rate,
        }
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn value(&self, state: &WorldState, action: AgentAction) -> f64 {
        self.table.value(&state.key(), action)
    }

    /// Epsilon-greedy selection.
    ///
    /// Explores uniformly among `available` with probability
    /// `exploration_rate`; otherwise returns the highest-valued available
    /// action, keeping the earliest one on ties. An empty `available` slice
    /// falls back to [`AgentAction::ExtendCurrent`]. A non-finite
    /// exploration rate is read as [`EXPLORATION_RATE`].
    pub fn choose_action<R: Rng + ?Sized>(
        &self,
        state: &WorldState,
        available: &[AgentAction],
        rng: &mut R,
    ) -> AgentAction {
        if available.is_empty() {
            return AgentAction::ExtendCurrent;
        }
        let exploration_rate = if self.exploration_rate.is_finite() {
            self.exploration_rate.clamp(0.0, 1.0)
        } else {
            EXPLORATION_RATE
        };
        if rng.gen_bool(exploration_rate) {
            if let Some(&action) = available.choose(rng) {
                return action;
            }
        }

        let key = state.key();
        let mut best = available[0];
        let mut best_value = self.table.value(&key, best);
        for &action in &available[1..] {
            let value = self.table.value(&key, action);
            if value > best_value {
                best = action;
                best_value = value;
            }
        }
        best
    }

    /// One-step update:
    /// `Q(s,a) += α · (r + γ · max_a' Q(s',a') − Q(s,a))`.
    pub fn update(
        &mut self,
        state: &WorldState,
        action: AgentAction,
        reward: f64,
        next_state: &WorldState,
    ) {
        let key = state.key();
        let old = self.table.value(&key, action);
        let future = self.table.max_value(&next_state.key());
        let target = reward + self.discount_factor * future;
        let new = old + self.learning_rate * (target - old);
        self.table.set(key, action, new);
    }
}

/// Negative mean wait per queued vehicle; zero when nothing is queued.
pub fn reward(queues: &TrafficQueues) -> f64 {
    let vehicles = queues.total_vehicles();
    if vehicles == 0 {
        return 0.0;
    }
    -(queues.total_wait() / f64::from(vehicles))
}
