//! Event catalog and the draw rule.
//!
//! Each non-FINISH category maps to a non-empty, ordered pool of
//! templates. A draw picks uniformly from the landed category's pool and
//! falls back to the LUCK pool when the category has none.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::template::EventTemplate;
use crate::board::TileCategory;
use crate::core::RandomSource;

/// Category used when a landed category has no pool.
const FALLBACK_CATEGORY: TileCategory = TileCategory::Luck;

/// Mapping from tile category to its event pool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCatalog {
    pools: FxHashMap<TileCategory, Vec<EventTemplate>>,
}

impl EventCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in party catalog covering all five playable categories.
    #[must_use]
    pub fn standard() -> Self {
        super::content::standard_catalog()
    }

    /// Load a catalog from JSON keyed by category name.
    ///
    /// Empty pools and a FINISH pool are discarded, since neither can ever
    /// be drawn from.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let mut catalog: Self = serde_json::from_str(json)?;
        catalog
            .pools
            .retain(|category, pool| !category.is_finish() && !pool.is_empty());
        Ok(catalog)
    }

    /// Register (or replace) the pool for a category.
    ///
    /// Empty pools and FINISH are ignored.
    #[must_use]
    pub fn with_pool(mut self, category: TileCategory, templates: Vec<EventTemplate>) -> Self {
        if category.is_finish() || templates.is_empty() {
            log::debug!("ignoring unusable {} pool", category);
            return self;
        }
        self.pools.insert(category, templates);
        self
    }

    /// The pool registered for a category, if any.
    #[must_use]
    pub fn pool(&self, category: TileCategory) -> Option<&[EventTemplate]> {
        self.pools.get(&category).map(Vec::as_slice)
    }

    /// Draw an event for a landed tile.
    ///
    /// Returns `None` for FINISH (callers should not draw there) and when
    /// neither the category nor the LUCK fallback has a pool.
    pub fn draw<R: RandomSource>(
        &self,
        category: TileCategory,
        rng: &mut R,
    ) -> Option<&EventTemplate> {
        if category.is_finish() {
            return None;
        }

        let pool = match self.pools.get(&category) {
            Some(pool) => pool,
            None => {
                log::debug!("no {} pool, drawing from {}", category, FALLBACK_CATEGORY);
                self.pools.get(&FALLBACK_CATEGORY)?
            }
        };

        pool.get(rng.gen_index(pool.len()))
    }

    /// Total number of templates across all pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CATEGORY_CYCLE;
    use crate::core::{GameRng, ScriptedRng};
    use crate::events::MovementEffect;

    fn small_catalog() -> EventCatalog {
        EventCatalog::new()
            .with_pool(
                TileCategory::Luck,
                vec![
                    EventTemplate::new("luck 0").bonus(1),
                    EventTemplate::new("luck 1").penalty(2),
                ],
            )
            .with_pool(
                TileCategory::Trivia,
                vec![EventTemplate::new("trivia 0").answer("42")],
            )
    }

    #[test]
    fn test_standard_covers_every_playable_category() {
        let catalog = EventCatalog::standard();
        for category in CATEGORY_CYCLE {
            let pool = catalog.pool(category).unwrap();
            assert!(!pool.is_empty(), "{} pool is empty", category);
        }
        assert!(catalog.pool(TileCategory::Finish).is_none());
    }

    #[test]
    fn test_draw_uses_rng_index() {
        let catalog = small_catalog();
        let mut rng = ScriptedRng::new([1, 0]);

        let first = catalog.draw(TileCategory::Luck, &mut rng).unwrap();
        assert_eq!(first.text, "luck 1");
        let second = catalog.draw(TileCategory::Luck, &mut rng).unwrap();
        assert_eq!(second.text, "luck 0");
    }

    #[test]
    fn test_missing_pool_falls_back_to_luck() {
        let catalog = small_catalog();
        let mut rng = ScriptedRng::new([0]);

        let drawn = catalog.draw(TileCategory::Duel, &mut rng).unwrap();
        assert_eq!(drawn.text, "luck 0");
    }

    #[test]
    fn test_finish_never_draws() {
        let catalog = EventCatalog::standard();
        let mut rng = ScriptedRng::new([0]);
        assert!(catalog.draw(TileCategory::Finish, &mut rng).is_none());
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_no_pool_and_no_fallback() {
        let catalog = EventCatalog::new()
            .with_pool(TileCategory::Trivia, vec![EventTemplate::new("q")]);
        let mut rng = GameRng::new(1);
        assert!(catalog.draw(TileCategory::Danger, &mut rng).is_none());
    }

    #[test]
    fn test_empty_and_finish_pools_ignored() {
        let catalog = EventCatalog::new()
            .with_pool(TileCategory::Danger, vec![])
            .with_pool(TileCategory::Finish, vec![EventTemplate::new("x")]);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_draw_covers_whole_pool() {
        let catalog = EventCatalog::standard();
        let pool_len = catalog.pool(TileCategory::Social).unwrap().len();
        let mut rng = GameRng::new(99);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..500 {
            let drawn = catalog.draw(TileCategory::Social, &mut rng).unwrap();
            seen.insert(drawn.text.clone());
        }
        assert_eq!(seen.len(), pool_len);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "LUCK": [{"text": "Taxi ride", "bonus": 3}],
            "DUEL": [],
            "FINISH": [{"text": "never"}]
        }"#;
        let catalog = EventCatalog::from_json_str(json).unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.pool(TileCategory::Duel).is_none());
        assert!(catalog.pool(TileCategory::Finish).is_none());
        assert_eq!(
            catalog.pool(TileCategory::Luck).unwrap()[0].effect,
            MovementEffect::Bonus(3)
        );
    }

    #[test]
    fn test_from_json_positive_penalty_adds() {
        let json = r#"{"DANGER": [{"text": "Lucky slip", "bonus": 1, "penalty": 3}]}"#;
        let catalog = EventCatalog::from_json_str(json).unwrap();

        let effect = catalog.pool(TileCategory::Danger).unwrap()[0].effect;
        assert_eq!(effect, MovementEffect::Bonus(4));
        assert_eq!(effect.delta(), 4);
    }

    #[test]
    fn test_from_json_rejects_unknown_category() {
        assert!(EventCatalog::from_json_str(r#"{"PARTY": []}"#).is_err());
    }
}
