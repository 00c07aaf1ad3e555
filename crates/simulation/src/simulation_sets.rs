//! Deterministic per-tick ordering via the `SignalTick` schedule.
//!
//! One simulation step is exactly one run of [`SignalTick`]. Running a
//! schedule is synchronous, so a step always completes before the next can
//! start, and no system in the schedule touches shared state outside it.
//!
//! # Phases (`SignalSet`)
//!
//! ```text
//! Observe  →  Sequence  →  Traffic  →  Learn  →  Report
//! ```
//!
//! * **Observe** – Advance the clock and phase timer. The agent snapshots the
//!   pre-tick world state, scores it, and picks an action.
//! * **Sequence** – The phase sequencer decides whether a transition is due
//!   and fires it on the Petri net.
//! * **Traffic** – Queues read the (possibly new) light states and move
//!   vehicles.
//! * **Learn** – The agent updates its table using the pre-tick state and
//!   reward and the post-tick state.
//! * **Report** – Aggregate metrics for observers. Read-only with respect to
//!   the net, the queues and the agent.

use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;

/// Schedule that advances the intersection by one tick.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignalTick;

/// Ordered phases inside [`SignalTick`], configured as a chain.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignalSet {
    Observe,
    Sequence,
    Traffic,
    Learn,
    Report,
}

/// Registers the [`SignalTick`] schedule and chains its phases.
pub struct SignalSetsPlugin;

impl Plugin for SignalSetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_schedule(SignalTick);
        app.configure_sets(
            SignalTick,
            (
                SignalSet::Observe,
                SignalSet::Sequence,
                SignalSet::Traffic,
                SignalSet::Learn,
                SignalSet::Report,
            )
                .chain(),
        );
    }
}
