mod rule;
mod state;
mod systems;


pub use rule::{adaptive_transition, next_transition};
pub use state::{ControlMode, PhaseTimer};
pub use systems::{advance_phase_timer, fire_manual, run_phase_sequencer};

use bevy::prelude::*;

use crate::config::SignalConfig;
use crate::simulation_sets::{SignalSet, SignalTick};

pub struct PhaseSequencerPlugin;

impl Plugin for PhaseSequencerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlMode>()
            .init_resource::<PhaseTimer>()
            .init_resource::<SignalConfig>()
            .add_systems(SignalTick, advance_phase_timer.in_set(SignalSet::Observe))
            .add_systems(SignalTick, run_phase_sequencer.in_set(SignalSet::Sequence));
    }
}
