//! Core types: players and roster, randomness, configuration, errors.
//!
//! Everything here is independent of the board and event rules.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{AvatarId, Player, PlayerId, Roster};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRng, DIE_FACES};
pub use config::{GameConfig, DEFAULT_TOTAL_TILES, MIN_TOTAL_TILES, SUPPORTED_TILE_COUNTS};
pub use error::ConfigError;
