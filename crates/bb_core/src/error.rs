use thiserror::Error;

use crate::models::PlayerId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Invalid statistic {name}: {value}")]
    InvalidStatistic { name: &'static str, value: f64 },

    #[error("Inconsistent base state: {0}")]
    InconsistentBaseState(String),

    #[error("Roster exhausted: {team} has no pitcher left in the bullpen")]
    RosterExhausted { team: String },

    #[error("Invalid lineup for {team}: {reason}")]
    InvalidLineup { team: String, reason: String },

    #[error("Unknown player id {0}")]
    UnknownPlayer(PlayerId),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    UnsupportedSchema { found: u8, expected: u8 },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl GameError {
    /// Errors that only invalidate the current game. The day coordinator logs
    /// and skips these instead of stopping the season.
    pub fn is_game_local(&self) -> bool {
        match self {
            GameError::InvalidStatistic { .. } => true,
            GameError::RosterExhausted { .. } => true,
            GameError::InvalidLineup { .. } => true,
            GameError::UnknownPlayer(_) => true,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            GameError::Deserialization(err.to_string())
        } else {
            GameError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
