use bevy::prelude::*;

use super::queues::TrafficQueues;
use crate::petri_net::PetriNet;
use crate::sim_rng::SimRng;
use crate::SimClock;

/// Move vehicles using the light states left by this tick's sequencing.
pub fn update_traffic_queues(
    net: Res<PetriNet>,
    clock: Res<SimClock>,
    mut rng: ResMut<SimRng>,
    mut queues: ResMut<TrafficQueues>,
) {
    queues.update(&*net, &mut rng.0, clock.seconds);
}

pub struct TrafficQueuesPlugin;

impl Plugin for TrafficQueuesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimRng>();
        let queues = app
            .world_mut()
            .resource_scope(|_world, mut rng: Mut<SimRng>| TrafficQueues::random(&mut rng.0, 0.0));
        app.insert_resource(queues).add_systems(
            crate::SignalTick,
            update_traffic_queues.in_set(crate::SignalSet::Traffic),
        );
    }
}
