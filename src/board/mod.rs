//! Board topology: tile categories and circuit generation.
//!
//! The circuit is a straight sequence of tiles from index 0 to the FINISH
//! tile at `total_tiles - 1`. Tile coordinates are a rendering concern and
//! are not modelled here.

mod tile;
mod generator;

pub use tile::{TileCategory, TileDescriptor, CATEGORY_CYCLE};
pub use generator::{generate_board, Board};
