use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::provider::LightStateProvider;
use crate::config::{
    ARRIVAL_PROBABILITY, INITIAL_QUEUE_MAX, MAX_ARRIVALS_PER_TICK, MAX_DEPARTURES_PER_TICK,
    MAX_QUEUE, MIN_DEPARTURES_PER_TICK, WAIT_RELIEF_PER_VEHICLE, WAIT_UNIT,
};
use crate::petri_net::{Direction, LightState};

/// Queue state for one approach.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficRecord {
    /// Vehicles waiting, `0..=MAX_QUEUE`.
    pub vehicles: u32,
    /// Accumulated wait in seconds, never negative.
    pub wait_time: f64,
    /// Simulation time of the last update.
    pub last_update: f64,
}

/// Per-direction record as handed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub direction: Direction,
    pub light: LightState,
    pub vehicles: u32,
    pub wait_time: f64,
    pub last_update: f64,
}

/// Demand and discharge parameters shared by every approach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficProfile {
    /// Chance per tick that a platoon arrives on an approach.
    pub arrival_probability: f64,
    pub max_arrivals: u32,
    pub min_departures: u32,
    pub max_departures: u32,
}

impl Default for TrafficProfile {
    fn default() -> Self {
        Self {
            arrival_probability: ARRIVAL_PROBABILITY,
            max_arrivals: MAX_ARRIVALS_PER_TICK,
            min_departures: MIN_DEPARTURES_PER_TICK,
            max_departures: MAX_DEPARTURES_PER_TICK,
        }
    }
}

/// Vehicle queues on the four approaches, indexed in `Direction::ALL` order.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct TrafficQueues {
    records: [TrafficRecord; 4],
    profile: TrafficProfile,
}

impl TrafficQueues {
    /// Fresh queues with random starting counts and no accumulated wait.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, now: f64) -> Self {
        let mut queues = Self::default();
        queues.reset(rng, now);
        queues
    }

    /// Queues from explicit records. Vehicle counts are capped at
    /// [`MAX_QUEUE`] and negative or non-finite waits read as zero.
    pub fn from_records(records: [TrafficRecord; 4]) -> Self {
        Self {
            records: records.map(|record| TrafficRecord {
                vehicles: record.vehicles.min(MAX_QUEUE),
                wait_time: if record.wait_time.is_finite() {
                    record.wait_time.max(0.0)
                } else {
                    0.0
                },
                last_update: record.last_update,
            }),
            profile: TrafficProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: TrafficProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn profile(&self) -> &TrafficProfile {
        &self.profile
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, now: f64) {
        for record in &mut self.records {
            *record = TrafficRecord {
                vehicles: rng.gen_range(0..=INITIAL_QUEUE_MAX),
                wait_time: 0.0,
                last_update: now,
            };
        }
    }

    pub fn record(&self, direction: Direction) -> &TrafficRecord {
        &self.records[direction.index()]
    }

    pub fn records(&self) -> &[TrafficRecord; 4] {
        &self.records
    }

    /// Advance every approach by one tick.
    ///
    /// Per direction, departures or waiting are decided on the queue as it
    /// stood at the start of the tick; arrivals join afterwards. A green
    /// light with vehicles waiting discharges a batch of
    /// `min_departures..=max_departures` (never more than are queued) and
    /// relieves wait time. Any other light adds [`WAIT_UNIT`] to a
    /// non-empty queue.
    pub fn update<L, R>(&mut self, lights: &L, rng: &mut R, now: f64)
    where
        L: LightStateProvider + ?Sized,
        R: Rng + ?Sized,
    {
        let profile = self.profile;
        let min_departures = profile.min_departures.max(1);
        let max_departures = profile.max_departures.max(min_departures);
        let max_arrivals = profile.max_arrivals.max(1);
        let arrival_probability = if profile.arrival_probability.is_finite() {
            profile.arrival_probability.clamp(0.0, 1.0)
        } else {
            ARRIVAL_PROBABILITY
        };

        for direction in Direction::ALL {
            let light = lights.light_state(direction);
            let record = &mut self.records[direction.index()];

            if record.vehicles > 0 {
                if light == LightState::Green {
                    let batch = rng
                        .gen_range(min_departures..=max_departures)
                        .min(record.vehicles);
                    record.vehicles -= batch;
                    record.wait_time =
                        (record.wait_time - f64::from(batch) * WAIT_RELIEF_PER_VEHICLE).max(0.0);
                } else {
                    record.wait_time += WAIT_UNIT;
                }
            }

            if rng.gen_bool(arrival_probability) {
                let arrivals = rng.gen_range(1..=max_arrivals);
                record.vehicles = record.vehicles.saturating_add(arrivals).min(MAX_QUEUE);
            }

            record.last_update = now;
        }
    }

    pub fn queue_lengths(&self) -> [u32; 4] {
        self.records.map(|r| r.vehicles)
    }

    pub fn total_vehicles(&self) -> u32 {
        self.records.iter().map(|r| r.vehicles).sum()
    }

    pub fn total_wait(&self) -> f64 {
        self.records.iter().map(|r| r.wait_time).sum()
    }

    /// Mean wait per queued vehicle; zero when the intersection is empty.
    pub fn average_wait(&self) -> f64 {
        let vehicles = self.total_vehicles();
        if vehicles == 0 {
            0.0
        } else {
            self.total_wait() / f64::from(vehicles)
        }
    }

    pub fn snapshot<L: LightStateProvider + ?Sized>(&self, lights: &L) -> Vec<QueueSnapshot> {
        Direction::ALL
            .into_iter()
            .map(|direction| {
                let record = self.record(direction);
                QueueSnapshot {
                    direction,
                    light: lights.light_state(direction),
                    vehicles: record.vehicles,
                    wait_time: record.wait_time,
                    last_update: record.last_update,
                }
            })
            .collect()
    }
}
