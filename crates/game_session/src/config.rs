//! Session configuration, read once at session start.

use crate::clock::TimeControl;
use crate::types::Side;
use serde::{Deserialize, Serialize};

/// Engine strength bounds, matching the skill range the suggestion engine
/// understands.
pub const MIN_STRENGTH: u8 = 1;
pub const MAX_STRENGTH: u8 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    HumanVsHuman,
    HumanVsEngine,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::HumanVsHuman => write!(f, "Human vs Human"),
            Mode::HumanVsEngine => write!(f, "Human vs Engine"),
        }
    }
}

/// Immutable per-session settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: Mode,
    /// Which side the local human plays (in human-vs-human mode this only
    /// selects board orientation for the presentation layer).
    pub human_side: Side,
    /// Suggestion engine strength, `1..=20`.
    pub strength: u8,
    pub time: TimeControl,
}

impl SessionConfig {
    pub fn new(mode: Mode, human_side: Side) -> Self {
        Self {
            mode,
            human_side,
            ..Self::default()
        }
    }

    /// Strength clamped into the range the engine accepts.
    pub fn clamped_strength(&self) -> u8 {
        self.strength.clamp(MIN_STRENGTH, MAX_STRENGTH)
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::HumanVsEngine,
            human_side: Side::White,
            strength: 10,
            time: TimeControl::default(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
