//! The four-way intersection net.
//!
//! Each direction owns a red, a yellow and a green place. Two control places
//! (`phase_ns`, `phase_ew`) record which axis holds the right of way. Four
//! transitions drive the only legal cycle:
//!
//! ```text
//! NS green -> NS yellow -> [NS red, EW green] -> EW yellow -> [EW red, NS green]
//! ```
//!
//! There is no green -> red shortcut and no way to skip a phase.

use serde::{Deserialize, Serialize};

use super::net::PetriNet;
use super::types::{Place, Transition};

pub const PHASE_NS: &str = "phase_ns";
pub const PHASE_EW: &str = "phase_ew";

pub const NS_TO_YELLOW: &str = "ns_to_yellow";
pub const NS_TO_RED_EW_GREEN: &str = "ns_to_red_ew_green";
pub const EW_TO_YELLOW: &str = "ew_to_yellow";
pub const EW_TO_RED_NS_GREEN: &str = "ew_to_red_ns_green";

/// Every place holds at most one token.
pub const SIGNAL_CAPACITY: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    pub fn parse(name: &str) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.name() == name)
    }

    /// Index into per-direction arrays, in [`Direction::ALL`] order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The axis this direction travels on.
    pub fn phase(self) -> Phase {
        match self {
            Direction::North | Direction::South => Phase::NorthSouth,
            Direction::East | Direction::West => Phase::EastWest,
        }
    }

    /// Id of this direction's place for the given light colour.
    pub fn place_id(self, light: LightState) -> String {
        format!("{}_{}", self.name(), light.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightState {
    Green,
    Yellow,
    Red,
}

impl LightState {
    pub fn name(self) -> &'static str {
        match self {
            LightState::Green => "green",
            LightState::Yellow => "yellow",
            LightState::Red => "red",
        }
    }
}

/// Which axis currently holds the right of way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "NS")]
    NorthSouth,
    #[serde(rename = "EW")]
    EastWest,
}

impl Phase {
    pub fn directions(self) -> [Direction; 2] {
        match self {
            Phase::NorthSouth => [Direction::North, Direction::South],
            Phase::EastWest => [Direction::East, Direction::West],
        }
    }

    pub fn opposite(self) -> Phase {
        match self {
            Phase::NorthSouth => Phase::EastWest,
            Phase::EastWest => Phase::NorthSouth,
        }
    }

    pub fn control_place(self) -> &'static str {
        match self {
            Phase::NorthSouth => PHASE_NS,
            Phase::EastWest => PHASE_EW,
        }
    }

    /// Transition that ends this phase's green.
    pub fn to_yellow(self) -> &'static str {
        match self {
            Phase::NorthSouth => NS_TO_YELLOW,
            Phase::EastWest => EW_TO_YELLOW,
        }
    }

    /// Transition that ends this phase's yellow and hands over the right of way.
    pub fn hand_over(self) -> &'static str {
        match self {
            Phase::NorthSouth => NS_TO_RED_EW_GREEN,
            Phase::EastWest => EW_TO_RED_NS_GREEN,
        }
    }
}

impl PetriNet {
    /// Build the intersection net in its initial marking: north/south green,
    /// east/west red, `phase_ns` marked.
    pub fn intersection() -> Self {
        let mut net = PetriNet::new();

        for direction in Direction::ALL {
            for light in [LightState::Red, LightState::Yellow, LightState::Green] {
                let initially_on = match direction.phase() {
                    Phase::NorthSouth => light == LightState::Green,
                    Phase::EastWest => light == LightState::Red,
                };
                let label = format!("{} {}", direction.name(), light.name());
                net.add_place(
                    Place::new(direction.place_id(light), label, SIGNAL_CAPACITY)
                        .with_tokens(u32::from(initially_on)),
                );
            }
        }
        net.add_place(Place::new(PHASE_NS, "NS phase", SIGNAL_CAPACITY).with_tokens(1));
        net.add_place(Place::new(PHASE_EW, "EW phase", SIGNAL_CAPACITY));

        for phase in [Phase::NorthSouth, Phase::EastWest] {
            net.add_transition(green_to_yellow(phase));
            net.add_transition(yellow_to_red(phase));
        }
        net
    }

    /// Green if the direction's green place is marked, else yellow if the
    /// yellow place is, else red.
    pub fn light_state(&self, direction: Direction) -> LightState {
        if self.tokens(&direction.place_id(LightState::Green)) > 0 {
            LightState::Green
        } else if self.tokens(&direction.place_id(LightState::Yellow)) > 0 {
            LightState::Yellow
        } else {
            LightState::Red
        }
    }

    /// Light state by direction name; unknown names read as red.
    pub fn light_state_named(&self, name: &str) -> LightState {
        Direction::parse(name).map_or(LightState::Red, |d| self.light_state(d))
    }

    pub fn current_phase(&self) -> Phase {
        if self.tokens(PHASE_NS) > 0 {
            Phase::NorthSouth
        } else {
            Phase::EastWest
        }
    }
}

fn green_to_yellow(phase: Phase) -> Transition {
    let [a, b] = phase.directions();
    Transition::new(phase.to_yellow(), format!("{:?} green to yellow", phase))
        .input(a.place_id(LightState::Green), 1)
        .input(b.place_id(LightState::Green), 1)
        .input(phase.control_place(), 1)
        .output(a.place_id(LightState::Yellow), 1)
        .output(b.place_id(LightState::Yellow), 1)
        .output(phase.control_place(), 1)
}

fn yellow_to_red(phase: Phase) -> Transition {
    let [a, b] = phase.directions();
    let [c, d] = phase.opposite().directions();
    Transition::new(
        phase.hand_over(),
        format!("{:?} yellow to red, {:?} green", phase, phase.opposite()),
    )
    .input(a.place_id(LightState::Yellow), 1)
    .input(b.place_id(LightState::Yellow), 1)
    .input(c.place_id(LightState::Red), 1)
    .input(d.place_id(LightState::Red), 1)
    .input(phase.control_place(), 1)
    .output(a.place_id(LightState::Red), 1)
    .output(b.place_id(LightState::Red), 1)
    .output(c.place_id(LightState::Green), 1)
    .output(d.place_id(LightState::Green), 1)
    .output(phase.opposite().control_place(), 1)
}
