use serde::{Deserialize, Serialize};

/// A place in the net. Tokens never exceed `capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub label: String,
    pub tokens: u32,
    pub capacity: u32,
}

impl Place {
    pub fn new(id: impl Into<String>, label: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            tokens: 0,
            capacity,
        }
    }

    /// Initial marking, saturated at the place's capacity.
    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.tokens = tokens.min(self.capacity);
        self
    }

    pub fn is_marked(&self) -> bool {
        self.tokens > 0
    }
}

/// One weighted arc between a transition and a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceArc {
    pub place: String,
    pub weight: u32,
}

impl PlaceArc {
    pub fn new(place: impl Into<String>, weight: u32) -> Self {
        Self {
            place: place.into(),
            weight,
        }
    }
}

/// A transition with ordered input and output arcs. Whether it is enabled is
/// derived from the current marking, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub label: String,
    pub inputs: Vec<PlaceArc>,
    pub outputs: Vec<PlaceArc>,
}

impl Transition {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn input(mut self, place: impl Into<String>, weight: u32) -> Self {
        self.inputs.push(PlaceArc::new(place, weight));
        self
    }

    pub fn output(mut self, place: impl Into<String>, weight: u32) -> Self {
        self.outputs.push(PlaceArc::new(place, weight));
        self
    }
}

/// A record of one firing attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub transition: String,
    /// Simulation time of the attempt, in seconds.
    pub timestamp: f64,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FireError {
    UnknownTransition(String),
    NotEnabled { transition: String },
}

impl std::fmt::Display for FireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FireError::UnknownTransition(id) => write!(f, "unknown transition '{}'", id),
            FireError::NotEnabled { transition } => {
                write!(f, "transition '{}' is not enabled", transition)
            }
        }
    }
}

impl std::error::Error for FireError {}
