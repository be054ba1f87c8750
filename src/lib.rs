//! # party-circuit
//!
//! Turn engine for a dice-driven party board game played around one
//! table. Players race along a circuit of dare, quiz, social, luck and
//! duel tiles; each landing draws an event whose consequence the table
//! accepts or waves off. First to the last tile wins.
//!
//! ## Design Principles
//!
//! 1. **One state, one writer**: `GameState` changes only through
//!    `TurnEngine` commands.
//!
//! 2. **Harmless double-taps**: a command in the wrong phase is ignored,
//!    never an error. Only configuration mistakes are errors.
//!
//! 3. **Injected randomness**: dice and event draws come from a
//!    `RandomSource`, so games replay exactly from a seed or a script.
//!
//! Rendering, sound, camera capture and animation timing belong to the
//! presentation layer; this crate only exposes state and commands.
//!
//! ## Modules
//!
//! - `core`: players and roster, RNG, configuration, errors
//! - `board`: tile categories and circuit generation
//! - `events`: event templates, the catalog, response timers
//! - `engine`: turn phases, game state, the turn engine
//! - `persistence`: snapshots and storage adapters
//!
//! ## Example
//!
//! ```
//! use party_circuit::{AvatarId, GameConfig, ScriptedRng, EventCatalog, TurnEngine, TurnPhase};
//!
//! let config = GameConfig::new().with_total_tiles(10);
//! let mut engine = TurnEngine::with_rng(config, EventCatalog::standard(), ScriptedRng::dice([4])).unwrap();
//! engine.add_player("Ana", AvatarId::from("robot")).unwrap();
//! engine.start_game(10).unwrap();
//!
//! engine.roll();
//! engine.finish_movement();
//! assert_eq!(engine.players()[0].position, 4);
//! assert!(matches!(engine.phase(), TurnPhase::ResolvingEvent(_)));
//!
//! engine.resolve_event(false);
//! assert_eq!(engine.phase(), &TurnPhase::AwaitingRoll);
//! ```

pub mod core;
pub mod board;
pub mod events;
pub mod engine;
pub mod persistence;

// Re-export commonly used types
pub use crate::core::{
    AvatarId, ConfigError, GameConfig, GameRng, GameRngState, Player, PlayerId, RandomSource,
    Roster, ScriptedRng, DEFAULT_TOTAL_TILES, DIE_FACES, MIN_TOTAL_TILES, SUPPORTED_TILE_COUNTS,
};

pub use crate::board::{generate_board, Board, TileCategory, TileDescriptor, CATEGORY_CYCLE};

pub use crate::events::{EventCatalog, EventTemplate, MovementEffect, ResponseTimer, TimerStatus};

pub use crate::engine::{
    Command, CommandOutcome, GameState, IgnoreReason, MoveCause, PendingEvent, TurnEngine,
    TurnPhase, TurnRecord,
};

pub use crate::persistence::{
    GameStateSnapshot, JsonFileStore, MemoryStore, PersistenceAdapter, PlayerSnapshot,
    SnapshotPhase, StoreError,
};
