use bevy::prelude::*;

use super::rule::{adaptive_transition, next_transition};
use super::state::{ControlMode, PhaseTimer};
use crate::config::{SignalConfig, TICK_SECONDS};
use crate::petri_net::PetriNet;
use crate::q_learning::PendingDecision;
use crate::SimClock;

pub fn advance_phase_timer(mut timer: ResMut<PhaseTimer>) {
    timer.advance(TICK_SECONDS);
}

/// Fire whatever transition the active control mode calls for.
///
/// The elapsed counter restarts only when a firing succeeds.
pub fn run_phase_sequencer(
    mode: Res<ControlMode>,
    config: Res<SignalConfig>,
    decision: Res<PendingDecision>,
    clock: Res<SimClock>,
    mut timer: ResMut<PhaseTimer>,
    mut net: ResMut<PetriNet>,
) {
    let phase = net.current_phase();
    let [lead, _] = phase.directions();
    let active_light = net.light_state(lead);

    let due = match *mode {
        ControlMode::Manual => None,
        ControlMode::Auto => next_transition(
            phase,
            active_light,
            timer.elapsed,
            config.green_duration(),
            config.yellow_duration(),
        ),
        ControlMode::Adaptive => adaptive_transition(
            phase,
            active_light,
            timer.elapsed,
            decision.action,
            config.yellow_duration(),
        ),
    };

    let Some(transition) = due else {
        return;
    };
    if net.fire(transition, clock.seconds) {
        timer.record_fire();
    } else {
        warn!(
            "PhaseSequencer: '{}' was due but not enabled (phase {:?}, light {:?})",
            transition, phase, active_light
        );
    }
}

/// Operator firing, honoured only in manual mode. Shares the engine's
/// enablement check with automatic sequencing.
pub fn fire_manual(
    mode: ControlMode,
    net: &mut PetriNet,
    timer: &mut PhaseTimer,
    transition: &str,
    now: f64,
) -> bool {
    if mode != ControlMode::Manual {
        warn!(
            "PhaseSequencer: manual fire of '{}' ignored in {} mode",
            transition,
            mode.name()
        );
        return false;
    }
    match net.try_fire(transition, now) {
        Ok(()) => {
            timer.record_fire();
            true
        }
        Err(e) => {
            warn!("PhaseSequencer: manual fire rejected: {}", e);
            false
        }
    }
}
