//! Snapshot storage adapters.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::snapshot::GameStateSnapshot;
use crate::core::RandomSource;
use crate::engine::TurnEngine;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not encode snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where saved games live.
///
/// `load` returns `None` when nothing is stored. Stored content that is
/// partly malformed still loads, repaired field by field.
pub trait PersistenceAdapter {
    fn save(&mut self, snapshot: &GameStateSnapshot) -> Result<(), StoreError>;

    fn load(&self) -> Option<GameStateSnapshot>;

    /// Forget the saved game.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Keeps the encoded snapshot in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `raw`, as if written by another version.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    /// The stored JSON text, if any.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl PersistenceAdapter for MemoryStore {
    fn save(&mut self, snapshot: &GameStateSnapshot) -> Result<(), StoreError> {
        self.raw = Some(snapshot.to_json_string()?);
        Ok(())
    }

    fn load(&self) -> Option<GameStateSnapshot> {
        self.raw.as_deref().map(GameStateSnapshot::from_json_str)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.raw = None;
        Ok(())
    }
}

/// One JSON file on disk.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceAdapter for JsonFileStore {
    fn save(&mut self, snapshot: &GameStateSnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> Option<GameStateSnapshot> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Some(GameStateSnapshot::from_json_str(&raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("unable to read saved game {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

impl<R: RandomSource> TurnEngine<R> {
    /// Save the game, or clear the store when no players are registered.
    pub fn persist<S: PersistenceAdapter + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        if self.players().is_empty() {
            store.clear()
        } else {
            store.save(&self.snapshot())
        }
    }

    /// Restore from the store. Returns whether a saved game was found.
    pub fn resume<S: PersistenceAdapter + ?Sized>(&mut self, store: &S) -> bool {
        match store.load() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{PlayerSnapshot, SnapshotPhase};
    use tempfile::TempDir;

    fn sample() -> GameStateSnapshot {
        GameStateSnapshot {
            players: vec![PlayerSnapshot {
                id: 5,
                name: "Dani".into(),
                position_index: 12,
                avatar_id: "alien".into(),
            }],
            turn_index: 0,
            total_tiles: 60,
            phase: SnapshotPhase::Playing,
            last_log: "Dani moved +6".into(),
        }
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().is_none());

        store.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));

        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_memory_store_tolerates_corruption() {
        let store = MemoryStore::with_raw(r#"{"players": [], "totalTiles": -4}"#);
        let loaded = store.load().unwrap();
        assert_eq!(loaded.total_tiles, 50);
        assert_eq!(loaded.phase, SnapshotPhase::Setup);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested").join("save.json");
        let mut store = JsonFileStore::new(&path);
        assert!(store.load().is_none());

        store.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));

        store.clear().unwrap();
        assert!(!path.exists());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("save.json");
        fs::write(&path, "{ this is not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.load(), Some(GameStateSnapshot::default()));
    }
}
