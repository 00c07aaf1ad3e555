use crate::petri_net::{Direction, LightState, PetriNet};

/// Read-only view of the signal heads, as seen by the queue simulator.
///
/// The simulator never touches net internals; anything that can answer
/// "what colour is this direction showing?" can drive it.
pub trait LightStateProvider {
    fn light_state(&self, direction: Direction) -> LightState;
}

impl LightStateProvider for PetriNet {
    fn light_state(&self, direction: Direction) -> LightState {
        PetriNet::light_state(self, direction)
    }
}

/// Fixed lights, indexed in `Direction::ALL` order.
impl LightStateProvider for [LightState; 4] {
    fn light_state(&self, direction: Direction) -> LightState {
        self[direction.index()]
    }
}
