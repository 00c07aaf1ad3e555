use bevy::prelude::*;
use serde::Serialize;

/// Wall-clock length of one simulation tick, in seconds.
pub const TICK_SECONDS: f64 = 1.0;

pub const DEFAULT_GREEN_DURATION: f64 = 10.0;
pub const MIN_GREEN_DURATION: f64 = 5.0;
pub const MAX_GREEN_DURATION: f64 = 60.0;
/// Yellow is fixed; only the green duration is operator-tunable.
pub const YELLOW_DURATION: f64 = 3.0;

pub const MAX_QUEUE: u32 = 25;
pub const INITIAL_QUEUE_MAX: u32 = 10;
pub const ARRIVAL_PROBABILITY: f64 = 0.3;
pub const MAX_ARRIVALS_PER_TICK: u32 = 3;
pub const MIN_DEPARTURES_PER_TICK: u32 = 1;
pub const MAX_DEPARTURES_PER_TICK: u32 = 4;
/// Wait accrued per tick by a non-empty queue facing a yellow or red light.
pub const WAIT_UNIT: f64 = 1.0;
/// Wait removed from a queue for each vehicle that clears the stop line.
pub const WAIT_RELIEF_PER_VEHICLE: f64 = 2.0;

pub const LEARNING_RATE: f64 = 0.1;
pub const DISCOUNT_FACTOR: f64 = 0.9;
pub const EXPLORATION_RATE: f64 = 0.1;

/// Number of history entries surfaced to observers.
pub const VISIBLE_HISTORY: usize = 10;

/// Runtime signal timing. Only the green duration can be changed while the
/// simulation runs, and only through [`SignalConfig::set_green_duration`];
/// yellow stays at [`YELLOW_DURATION`].
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalConfig {
    green_duration: f64,
    yellow_duration: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            green_duration: DEFAULT_GREEN_DURATION,
            yellow_duration: YELLOW_DURATION,
        }
    }
}

impl SignalConfig {
    pub fn green_duration(&self) -> f64 {
        self.green_duration
    }

    pub fn yellow_duration(&self) -> f64 {
        self.yellow_duration
    }

    /// Set the green duration, clamped to the supported range.
    /// Returns the value actually applied.
    pub fn set_green_duration(&mut self, seconds: f64) -> f64 {
        let applied = if seconds.is_finite() {
            seconds.clamp(MIN_GREEN_DURATION, MAX_GREEN_DURATION)
        } else {
            DEFAULT_GREEN_DURATION
        };
        if applied != seconds {
            warn!(
                "SignalConfig: green duration {} out of range, using {}",
                seconds, applied
            );
        }
        self.green_duration = applied;
        applied
    }
}
