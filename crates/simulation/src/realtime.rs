//! Wall-clock driver: runs one [`SignalTick`] per fixed timestep.
//!
//! The fixed timestep is the tick interval (one second by default). Each
//! `FixedUpdate` run executes the whole tick synchronously from an exclusive
//! system, so ticks never overlap. Automatic ticking pauses while the mode is
//! manual, leaving operators the only writers. Stopping the app loop is the
//! only way to cancel; a tick that has started always finishes.

use std::time::Duration;

use bevy::prelude::*;

use crate::config::TICK_SECONDS;
use crate::phase_sequencer::ControlMode;
use crate::SignalTick;

pub struct RealtimeDriverPlugin {
    pub interval: Duration,
}

impl Default for RealtimeDriverPlugin {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs_f64(TICK_SECONDS),
        }
    }
}

impl Plugin for RealtimeDriverPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_duration(self.interval))
            .add_systems(FixedUpdate, run_signal_tick.run_if(automatic_control));
    }
}

/// Exclusive system that advances the intersection by one tick.
pub fn run_signal_tick(world: &mut World) {
    world.run_schedule(SignalTick);
}

/// Run condition: true when operators are not driving the lights by hand.
pub fn automatic_control(mode: Res<ControlMode>) -> bool {
    *mode != ControlMode::Manual
}
