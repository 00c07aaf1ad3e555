use serde::{Deserialize, Serialize};

use crate::petri_net::Phase;
use crate::traffic_queues::TrafficQueues;

/// What the agent sees each tick: the four queue lengths (in
/// `Direction::ALL` order) and which axis has the right of way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    pub queues: [u32; 4],
    pub phase: Phase,
}

impl WorldState {
    pub fn observe(queues: &TrafficQueues, phase: Phase) -> Self {
        Self {
            queues: queues.queue_lengths(),
            phase,
        }
    }

    pub fn key(&self) -> StateKey {
        state_key(self)
    }
}

/// Table key for a [`WorldState`]. Equal states always produce equal keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey {
    queues: [u32; 4],
    ns_active: bool,
}

pub fn state_key(state: &WorldState) -> StateKey {
    StateKey {
        queues: state.queues,
        ns_active: state.phase == Phase::NorthSouth,
    }
}
