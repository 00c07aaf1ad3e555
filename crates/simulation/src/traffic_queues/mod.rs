mod provider;
mod queues;
mod systems;


pub use provider::LightStateProvider;
pub use queues::{QueueSnapshot, TrafficProfile, TrafficQueues, TrafficRecord};
pub use systems::{update_traffic_queues, TrafficQueuesPlugin};
