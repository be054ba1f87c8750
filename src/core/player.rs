//! Player identification and the ordered roster.
//!
//! ## PlayerId
//!
//! Opaque unique identifier. Ids survive persistence unchanged, so they
//! are plain `u64` values rather than roster indices.
//!
//! ## Roster
//!
//! Turn order is registration order. Only `positionIndex` changes once
//! the game is running, and only the turn engine changes it.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::rng::RandomSource;

/// Opaque player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Key into the presentation layer's avatar/character registry.
///
/// The engine stores and restores it without interpreting it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvatarId(pub String);

impl AvatarId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AvatarId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A registered player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Tile index, always within `[0, total_tiles - 1]` once a game runs.
    pub position: usize,
    pub avatar: AvatarId,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, avatar: AvatarId) -> Self {
        Self {
            id,
            name: name.into(),
            position: 0,
            avatar,
        }
    }

    /// Builder-style starting position, used when restoring saved games.
    #[must_use]
    pub fn at(mut self, position: usize) -> Self {
        self.position = position;
        self
    }
}

/// Ordered list of players. Index order is turn order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from already-identified players (e.g. a restored save).
    #[must_use]
    pub fn from_players(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Register a new player at the start tile.
    ///
    /// The name is trimmed and must not be empty. The new id is one past
    /// the largest id in the roster, so ids stay unique after removals and
    /// restores. If that would overflow, the lowest unused id is taken.
    pub fn register(
        &mut self,
        name: &str,
        avatar: AvatarId,
    ) -> Result<PlayerId, ConfigError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyPlayerName);
        }

        let id = self.next_id();
        self.players.push(Player::new(id, name, avatar));
        Ok(id)
    }

    /// Remove a player. Returns the removed player, if present.
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        let idx = self.index_of(id)?;
        Some(self.players.remove(idx))
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    /// Pick an avatar for the next registration.
    ///
    /// Chooses uniformly among registry entries no player uses yet. When
    /// every avatar is taken, chooses uniformly from the whole registry.
    /// Returns `None` only for an empty registry.
    pub fn pick_avatar<R: RandomSource>(
        &self,
        registry: &[AvatarId],
        rng: &mut R,
    ) -> Option<AvatarId> {
        if registry.is_empty() {
            return None;
        }

        let free: Vec<&AvatarId> = registry
            .iter()
            .filter(|a| !self.players.iter().any(|p| &p.avatar == *a))
            .collect();

        if free.is_empty() {
            Some(registry[rng.gen_index(registry.len())].clone())
        } else {
            Some(free[rng.gen_index(free.len())].clone())
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.players.get_mut(index)
    }

    #[must_use]
    pub fn find(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Player] {
        &self.players
    }

    fn next_id(&self) -> PlayerId {
        let max = self.players.iter().map(|p| p.id.0).max();
        match max {
            None => PlayerId(1),
            Some(m) => match m.checked_add(1) {
                Some(next) => PlayerId(next),
                None => {
                    let used: FxHashSet<u64> = self.players.iter().map(|p| p.id.0).collect();
                    // A roster can never hold u64::MAX players, so a gap exists.
                    PlayerId((1..).find(|id| !used.contains(id)).unwrap_or(0))
                }
            },
        }
    }
}
