use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Who decides when the lights change.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    /// Fixed green and yellow durations.
    #[default]
    Auto,
    /// The sequencer is idle; an operator fires transitions by hand.
    Manual,
    /// The learning agent ends each green; yellow stays timed.
    Adaptive,
}

impl ControlMode {
    pub fn name(self) -> &'static str {
        match self {
            ControlMode::Auto => "auto",
            ControlMode::Manual => "manual",
            ControlMode::Adaptive => "adaptive",
        }
    }

    pub fn parse(name: &str) -> Option<ControlMode> {
        [ControlMode::Auto, ControlMode::Manual, ControlMode::Adaptive]
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Time spent in the current light state of the active phase.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseTimer {
    /// Seconds since the last successful firing.
    pub elapsed: f64,
    /// Successful firings since the last reset, automatic and manual.
    pub transitions_fired: u64,
}

impl PhaseTimer {
    pub fn advance(&mut self, seconds: f64) {
        self.elapsed += seconds;
    }

    /// Restart the phase clock after a successful firing.
    pub fn record_fire(&mut self) {
        self.elapsed = 0.0;
        self.transitions_fired += 1;
    }
}
