use crate::config::{MAX_GREEN_DURATION, MIN_GREEN_DURATION};
use crate::petri_net::{LightState, Phase};
use crate::q_learning::AgentAction;

/// Timed sequencing rule.
///
/// Ends the active green once it has lasted `green_duration` and ends the
/// active yellow once it has lasted `yellow_duration`. Returns the id of the
/// transition to fire, if any.
pub fn next_transition(
    phase: Phase,
    active_light: LightState,
    elapsed: f64,
    green_duration: f64,
    yellow_duration: f64,
) -> Option<&'static str> {
    match active_light {
        LightState::Green if elapsed >= green_duration => Some(phase.to_yellow()),
        LightState::Yellow if elapsed >= yellow_duration => Some(phase.hand_over()),
        _ => None,
    }
}

/// Agent-driven rule used in adaptive mode.
///
/// The agent may end a green that has lasted at least
/// [`MIN_GREEN_DURATION`]; a green that reaches [`MAX_GREEN_DURATION`] ends
/// regardless. Yellow is always timed.
pub fn adaptive_transition(
    phase: Phase,
    active_light: LightState,
    elapsed: f64,
    action: AgentAction,
    yellow_duration: f64,
) -> Option<&'static str> {
    match active_light {
        LightState::Green => {
            let agent_switch = action == AgentAction::SwitchPhase && elapsed >= MIN_GREEN_DURATION;
            (agent_switch || elapsed >= MAX_GREEN_DURATION).then(|| phase.to_yellow())
        }
        LightState::Yellow | LightState::Red => {
            next_transition(phase, active_light, elapsed, f64::INFINITY, yellow_duration)
        }
    }
}
