//! Game configuration.
//!
//! The only rule knob is the board length. The seed only matters for the
//! default `GameRng`; callers injecting their own `RandomSource` ignore it.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Smallest board with meaningful movement.
pub const MIN_TOTAL_TILES: usize = 2;

/// Board length used when nothing else is known (also the snapshot default).
pub const DEFAULT_TOTAL_TILES: usize = 50;

/// Board lengths offered by the setup screen.
///
/// The engine accepts any length of at least `MIN_TOTAL_TILES`.
pub const SUPPORTED_TILE_COUNTS: [usize; 5] = [25, 30, 50, 60, 90];

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Number of tiles on the circuit, including the finish.
    pub total_tiles: usize,

    /// Seed for the default RNG. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_tiles: DEFAULT_TOTAL_TILES,
            seed: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board length.
    #[must_use]
    pub fn with_total_tiles(mut self, total_tiles: usize) -> Self {
        self.total_tiles = total_tiles;
        self
    }

    /// Fix the RNG seed for reproducible games.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the board length is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_tiles < MIN_TOTAL_TILES {
            return Err(ConfigError::TooFewTiles {
                requested: self.total_tiles,
            });
        }
        Ok(())
    }

    /// Whether the board length is one the setup screen offers.
    #[must_use]
    pub fn is_standard_length(&self) -> bool {
        SUPPORTED_TILE_COUNTS.contains(&self.total_tiles)
    }
}
