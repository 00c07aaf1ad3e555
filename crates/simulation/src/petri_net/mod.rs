mod net;
mod topology;
mod types;


pub use net::PetriNet;
pub use topology::{
    Direction, LightState, Phase, EW_TO_RED_NS_GREEN, EW_TO_YELLOW, NS_TO_RED_EW_GREEN,
    NS_TO_YELLOW, PHASE_EW, PHASE_NS, SIGNAL_CAPACITY,
};
pub use types::{FireError, HistoryEntry, Place, PlaceArc, Transition};
