//! Tile categories and descriptors.

use serde::{Deserialize, Serialize};

/// What happens when a player lands on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TileCategory {
    /// Physical dare.
    Danger,
    /// Quiz question.
    Trivia,
    /// Social dare.
    Social,
    /// Random swing forwards or backwards.
    Luck,
    /// Head-to-head minigame.
    Duel,
    /// Terminal tile. Landing here wins.
    Finish,
}

/// Order in which non-FINISH categories repeat along the circuit.
pub const CATEGORY_CYCLE: [TileCategory; 5] = [
    TileCategory::Danger,
    TileCategory::Trivia,
    TileCategory::Social,
    TileCategory::Luck,
    TileCategory::Duel,
];

impl TileCategory {
    /// Category of tile `index` before the FINISH override.
    #[must_use]
    pub fn for_cycle_index(index: usize) -> Self {
        CATEGORY_CYCLE[index % CATEGORY_CYCLE.len()]
    }

    #[must_use]
    pub fn is_finish(self) -> bool {
        self == TileCategory::Finish
    }

    /// Short label for logs and debugging.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TileCategory::Danger => "DANGER",
            TileCategory::Trivia => "TRIVIA",
            TileCategory::Social => "SOCIAL",
            TileCategory::Luck => "LUCK",
            TileCategory::Duel => "DUEL",
            TileCategory::Finish => "FINISH",
        }
    }
}

impl std::fmt::Display for TileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One tile of a generated board. Immutable once generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileDescriptor {
    pub index: usize,
    pub category: TileCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(TileCategory::for_cycle_index(0), TileCategory::Danger);
        assert_eq!(TileCategory::for_cycle_index(4), TileCategory::Duel);
        assert_eq!(TileCategory::for_cycle_index(5), TileCategory::Danger);
        assert_eq!(TileCategory::for_cycle_index(13), TileCategory::Luck);
    }

    #[test]
    fn test_cycle_excludes_finish() {
        assert!(CATEGORY_CYCLE.iter().all(|c| !c.is_finish()));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&TileCategory::Duel).unwrap();
        assert_eq!(json, "\"DUEL\"");
        let back: TileCategory = serde_json::from_str("\"FINISH\"").unwrap();
        assert_eq!(back, TileCategory::Finish);
    }
}
