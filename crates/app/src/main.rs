//! Headless intersection driver.
//!
//! Ticks the signal simulation once per wall-clock second and prints one JSON
//! snapshot per tick on stdout. Logs go to stderr.
//!
//! ## Environment
//!
//! - `CROSSROADS_SEED`: RNG seed for arrivals, departures and exploration.
//! - `CROSSROADS_TICKS`: exit after this many ticks (default: run forever).
//! - `CROSSROADS_MODE`: `auto`, `manual` or `adaptive`.
//! - `CROSSROADS_GREEN_SECS`: green duration in seconds, clamped to 5..=60.

use std::str::FromStr;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::config::SignalConfig;
use simulation::phase_sequencer::ControlMode;
use simulation::realtime::RealtimeDriverPlugin;
use simulation::sim_rng::{SimRng, DEFAULT_SEED};
use simulation::{IntersectionSnapshot, SignalSet, SignalTick, TickCounter};

/// How often the outer loop wakes to check whether a tick is due.
const LOOP_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Resource, Debug, Clone, Copy)]
struct TickLimit(Option<u64>);

fn main() {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(LOOP_INTERVAL)),
        LogPlugin::default(),
    ));

    let seed = env_or("CROSSROADS_SEED", DEFAULT_SEED);
    app.insert_resource(SimRng::from_seed_u64(seed))
        .add_plugins((simulation::SimulationPlugin, RealtimeDriverPlugin::default()));

    let mode = match std::env::var("CROSSROADS_MODE") {
        Ok(name) => ControlMode::parse(&name).unwrap_or_else(|| {
            warn!("Unknown CROSSROADS_MODE '{}', using auto", name);
            ControlMode::Auto
        }),
        Err(_) => ControlMode::Auto,
    };
    if mode == ControlMode::Manual {
        warn!("Manual mode: the driver issues no ticks until the mode changes");
    }
    app.insert_resource(mode);

    if let Ok(raw) = std::env::var("CROSSROADS_GREEN_SECS") {
        match raw.parse::<f64>() {
            Ok(seconds) => {
                app.world_mut()
                    .resource_mut::<SignalConfig>()
                    .set_green_duration(seconds);
            }
            Err(_) => warn!("Ignoring CROSSROADS_GREEN_SECS '{}'", raw),
        }
    }

    let limit = std::env::var("CROSSROADS_TICKS")
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok());
    app.insert_resource(TickLimit(limit))
        .add_systems(SignalTick, emit_snapshot.after(SignalSet::Report))
        .add_systems(Update, stop_after_limit);

    info!(
        "Crossroads starting: seed {}, mode {}, green {}s, ticks {}",
        seed,
        mode.name(),
        app.world().resource::<SignalConfig>().green_duration(),
        limit.map_or_else(|| "unbounded".to_string(), |n| n.to_string())
    );

    app.run();
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring {} '{}'", key, raw);
            default
        }),
        Err(_) => default,
    }
}

fn emit_snapshot(world: &World) {
    let Some(snapshot) = IntersectionSnapshot::collect(world) else {
        return;
    };
    match serde_json::to_string(&snapshot) {
        Ok(line) => println!("{}", line),
        Err(e) => warn!("Failed to serialize tick {}: {}", snapshot.tick, e),
    }
}

fn stop_after_limit(
    limit: Res<TickLimit>,
    tick: Res<TickCounter>,
    mut exit: EventWriter<AppExit>,
) {
    if let Some(limit) = limit.0 {
        if tick.0 >= limit {
            info!("Reached {} ticks, exiting", limit);
            exit.send(AppExit::Success);
        }
    }
}
