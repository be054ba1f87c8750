//! Error types surfaced to callers.
//!
//! Only configuration mistakes are errors. Commands issued in the wrong
//! phase are absorbed as `CommandOutcome::Ignored`, and malformed persisted
//! state is repaired field by field, so neither appears here.

use thiserror::Error;

use super::PlayerId;

/// A game could not be configured or started as requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("a board needs at least 2 tiles, got {requested}")]
    TooFewTiles { requested: usize },

    #[error("cannot start a game without players")]
    EmptyRoster,

    #[error("player name must not be empty")]
    EmptyPlayerName,

    #[error("{player} is not on the start tile")]
    PlayerNotAtStart { player: PlayerId },

    #[error("the roster can only change before the game starts")]
    GameInProgress,
}
