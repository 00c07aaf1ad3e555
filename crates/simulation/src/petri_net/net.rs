use std::collections::{BTreeMap, BTreeSet};

use bevy::prelude::*;

use super::types::{FireError, HistoryEntry, Place, Transition};
use crate::config::VISIBLE_HISTORY;

/// A place/transition net with bounded places.
///
/// The net exclusively owns its places, transitions and firing history.
/// Topology is fixed once built; only token counts and history change.
/// Maps are ordered so that snapshots and enabled sets iterate
/// deterministically.
#[derive(Resource, Debug, Clone, Default)]
pub struct PetriNet {
    places: BTreeMap<String, Place>,
    transitions: BTreeMap<String, Transition>,
    initial_marking: BTreeMap<String, u32>,
    history: Vec<HistoryEntry>,
}

impl PetriNet {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Add a place. Its token count at this point, capped at the place's
    /// capacity, becomes part of the marking restored by [`PetriNet::reset`].
    pub fn add_place(&mut self, mut place: Place) -> &mut Self {
        place.tokens = place.tokens.min(place.capacity);
        self.initial_marking.insert(place.id.clone(), place.tokens);
        self.places.insert(place.id.clone(), place);
        self
    }

    /// Add a transition. Arcs naming places that do not exist are kept; a
    /// transition with an unresolved input is simply never enabled.
    pub fn add_transition(&mut self, transition: Transition) -> &mut Self {
        self.transitions.insert(transition.id.clone(), transition);
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn place(&self, id: &str) -> Option<&Place> {
        self.places.get(id)
    }

    pub fn transition(&self, id: &str) -> Option<&Transition> {
        self.transitions.get(id)
    }

    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.places.values()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.values()
    }

    /// Token count of a place; unknown places hold zero tokens.
    pub fn tokens(&self, id: &str) -> u32 {
        self.places.get(id).map_or(0, |p| p.tokens)
    }

    /// Current token count of every place, keyed by place id.
    pub fn marking(&self) -> BTreeMap<String, u32> {
        self.places
            .iter()
            .map(|(id, place)| (id.clone(), place.tokens))
            .collect()
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.transitions
            .get(id)
            .is_some_and(|t| inputs_satisfied(&self.places, t))
    }

    pub fn enabled_transitions(&self) -> BTreeSet<String> {
        self.transitions
            .values()
            .filter(|t| inputs_satisfied(&self.places, t))
            .map(|t| t.id.clone())
            .collect()
    }

    /// Full firing log, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The most recent entries of the firing log, oldest first.
    pub fn recent_history(&self) -> &[HistoryEntry] {
        let start = self.history.len().saturating_sub(VISIBLE_HISTORY);
        &self.history[start..]
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Fire a transition atomically.
    ///
    /// A disabled transition leaves the marking untouched and is logged as a
    /// failed attempt. An unknown id changes nothing at all. On success every
    /// input place loses its arc weight and every output place gains its arc
    /// weight, saturating at the place's capacity.
    pub fn try_fire(&mut self, id: &str, timestamp: f64) -> Result<(), FireError> {
        let Some(transition) = self.transitions.get(id) else {
            return Err(FireError::UnknownTransition(id.to_string()));
        };

        if !inputs_satisfied(&self.places, transition) {
            self.history.push(HistoryEntry {
                transition: id.to_string(),
                timestamp,
                success: false,
            });
            return Err(FireError::NotEnabled {
                transition: id.to_string(),
            });
        }

        for arc in &transition.inputs {
            if let Some(place) = self.places.get_mut(&arc.place) {
                place.tokens = place.tokens.saturating_sub(arc.weight);
            }
        }
        for arc in &transition.outputs {
            match self.places.get_mut(&arc.place) {
                Some(place) => {
                    place.tokens = place.tokens.saturating_add(arc.weight).min(place.capacity);
                }
                None => warn!(
                    "PetriNet: transition '{}' outputs to unknown place '{}'",
                    id, arc.place
                ),
            }
        }

        self.history.push(HistoryEntry {
            transition: id.to_string(),
            timestamp,
            success: true,
        });
        debug!("PetriNet: fired '{}' at t={:.1}s", id, timestamp);
        Ok(())
    }

    /// Boolean form of [`PetriNet::try_fire`].
    pub fn fire(&mut self, id: &str, timestamp: f64) -> bool {
        self.try_fire(id, timestamp).is_ok()
    }

    /// Restore the initial marking and drop the firing log.
    pub fn reset(&mut self) {
        for (id, place) in &mut self.places {
            place.tokens = self.initial_marking.get(id).copied().unwrap_or(0);
        }
        self.history.clear();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

/// Arcs on the same place add up: two weight-1 inputs from one place need
/// two tokens there.
fn inputs_satisfied(places: &BTreeMap<String, Place>, transition: &Transition) -> bool {
    let mut demand: BTreeMap<&str, u32> = BTreeMap::new();
    for arc in &transition.inputs {
        let needed = demand.entry(arc.place.as_str()).or_insert(0);
        *needed = needed.saturating_add(arc.weight);
    }
    demand.into_iter().all(|(id, needed)| {
        places
            .get(id)
            .is_some_and(|place| place.tokens >= needed)
    })
}
