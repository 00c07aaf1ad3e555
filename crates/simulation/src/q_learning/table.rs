use std::collections::HashMap;

use super::action::AgentAction;
use super::state::StateKey;

/// Action values per state. Rows are created on first write and never
/// evicted; reads of missing rows see zero.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    rows: HashMap<StateKey, [f64; AgentAction::COUNT]>,
}

impl QTable {
    pub fn value(&self, key: &StateKey, action: AgentAction) -> f64 {
        self.rows.get(key).map_or(0.0, |row| row[action.index()])
    }

    pub fn set(&mut self, key: StateKey, action: AgentAction, value: f64) {
        let row = self.rows.entry(key).or_insert([0.0; AgentAction::COUNT]);
        row[action.index()] = value;
    }

    /// Highest value over every defined action.
    pub fn max_value(&self, key: &StateKey) -> f64 {
        AgentAction::ALL
            .into_iter()
            .map(|action| self.value(key, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Number of states with at least one stored value.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
