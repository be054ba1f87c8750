//! Saving and restoring games.
//!
//! - `GameStateSnapshot`: the JSON shape written to storage
//! - `PersistenceAdapter`: where snapshots live
//! - `MemoryStore` / `JsonFileStore`: the two bundled adapters
//!
//! Loading never fails on bad content. Each snapshot field falls back to
//! its default on its own, so one corrupt field doesn't discard the rest
//! of a saved game.

mod snapshot;
mod store;

pub use snapshot::{GameStateSnapshot, PlayerSnapshot, SnapshotPhase};
pub use store::{JsonFileStore, MemoryStore, PersistenceAdapter, StoreError};
