//! Deterministic simulation RNG resource.
//!
//! Wraps `ChaCha8Rng` so that identical seeds replay identical arrivals,
//! departures and exploration choices. Systems take `ResMut<SimRng>` and pass
//! `&mut rng.0` to the functions that need randomness; those functions accept
//! any `rand::Rng`, so tests can hand them their own sources.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default seed used when no explicit seed is provided.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
