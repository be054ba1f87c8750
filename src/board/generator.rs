//! Board generation.
//!
//! `generate_board` is a pure function of the tile count: categories cycle
//! through `CATEGORY_CYCLE` and the last tile is always FINISH.

use serde::{Deserialize, Serialize};

use super::tile::{TileCategory, TileDescriptor};
use crate::core::{ConfigError, MIN_TOTAL_TILES};

/// Build the tile sequence for a board of `total_tiles` tiles.
///
/// Fails with `ConfigError::TooFewTiles` below `MIN_TOTAL_TILES`.
pub fn generate_board(total_tiles: usize) -> Result<Vec<TileDescriptor>, ConfigError> {
    if total_tiles < MIN_TOTAL_TILES {
        return Err(ConfigError::TooFewTiles {
            requested: total_tiles,
        });
    }
    Ok(build_tiles(total_tiles))
}

/// Caller guarantees `total_tiles >= MIN_TOTAL_TILES`.
fn build_tiles(total_tiles: usize) -> Vec<TileDescriptor> {
    let last = total_tiles - 1;
    (0..total_tiles)
        .map(|index| TileDescriptor {
            index,
            category: if index == last {
                TileCategory::Finish
            } else {
                TileCategory::for_cycle_index(index)
            },
        })
        .collect()
}

/// A generated board.
///
/// Wraps the tile sequence so the FINISH-at-the-end invariant can't be
/// broken after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<TileDescriptor>,
}

impl Board {
    pub fn new(total_tiles: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            tiles: generate_board(total_tiles)?,
        })
    }

    /// Board of at least `MIN_TOTAL_TILES`, for inputs already repaired.
    pub(crate) fn at_least_min(total_tiles: usize) -> Self {
        Self {
            tiles: build_tiles(total_tiles.max(MIN_TOTAL_TILES)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false: a board has at least `MIN_TOTAL_TILES` tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Index of the FINISH tile.
    #[must_use]
    pub fn finish_index(&self) -> usize {
        self.tiles.len() - 1
    }

    #[must_use]
    pub fn tile(&self, index: usize) -> Option<&TileDescriptor> {
        self.tiles.get(index)
    }

    /// Category at `index`, or `None` off the board.
    #[must_use]
    pub fn category_at(&self, index: usize) -> Option<TileCategory> {
        self.tiles.get(index).map(|t| t.category)
    }

    #[must_use]
    pub fn tiles(&self) -> &[TileDescriptor] {
        &self.tiles
    }

    /// Clamp a signed position into `[0, finish_index]`.
    #[must_use]
    pub fn clamp_position(&self, position: i64) -> usize {
        position.clamp(0, self.finish_index() as i64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CATEGORY_CYCLE;

    #[test]
    fn test_board_shape() {
        for n in [2, 5, 10, 25, 30, 50, 60, 90] {
            let tiles = generate_board(n).unwrap();
            assert_eq!(tiles.len(), n);
            assert_eq!(tiles[n - 1].category, TileCategory::Finish);

            for (i, tile) in tiles.iter().enumerate().take(n - 1) {
                assert_eq!(tile.index, i);
                assert_eq!(tile.category, CATEGORY_CYCLE[i % 5]);
            }
        }
    }

    #[test]
    fn test_exactly_one_finish() {
        let tiles = generate_board(60).unwrap();
        let finishes = tiles.iter().filter(|t| t.category.is_finish()).count();
        assert_eq!(finishes, 1);
    }

    #[test]
    fn test_generation_is_pure() {
        assert_eq!(generate_board(37).unwrap(), generate_board(37).unwrap());
    }

    #[test]
    fn test_finish_overrides_cycle() {
        // Index 5 would be DANGER in the cycle.
        let tiles = generate_board(6).unwrap();
        assert_eq!(tiles[5].category, TileCategory::Finish);
    }

    #[test]
    fn test_rejects_tiny_boards() {
        assert_eq!(
            generate_board(1),
            Err(ConfigError::TooFewTiles { requested: 1 })
        );
        assert!(Board::new(0).is_err());
        assert_eq!(Board::at_least_min(0).len(), MIN_TOTAL_TILES);
    }

    #[test]
    fn test_board_accessors() {
        let board = Board::new(10).unwrap();
        assert_eq!(board.len(), 10);
        assert_eq!(board.finish_index(), 9);
        assert_eq!(board.category_at(4), Some(TileCategory::Duel));
        assert_eq!(board.category_at(10), None);
        assert_eq!(board.clamp_position(-3), 0);
        assert_eq!(board.clamp_position(42), 9);
        assert_eq!(board.clamp_position(6), 6);
    }
}
