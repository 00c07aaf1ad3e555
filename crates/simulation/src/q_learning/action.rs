use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentAction {
    ExtendCurrent,
    SwitchPhase,
}

impl AgentAction {
    pub const COUNT: usize = 2;
    pub const ALL: [AgentAction; Self::COUNT] =
        [AgentAction::ExtendCurrent, AgentAction::SwitchPhase];

    pub fn name(self) -> &'static str {
        match self {
            AgentAction::ExtendCurrent => "extend_current",
            AgentAction::SwitchPhase => "switch_phase",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
