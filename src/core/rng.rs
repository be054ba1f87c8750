//! Injectable randomness for dice rolls and event draws.
//!
//! ## Key Features
//!
//! - **Injectable**: the engine only sees the `RandomSource` trait
//! - **Deterministic**: `GameRng` with the same seed produces the same game
//! - **Scriptable**: `ScriptedRng` replays a fixed sequence for tests
//! - **Serializable**: `GameRngState` captures a `GameRng` mid-game
//!
//! ```
//! use party_circuit::core::{GameRng, RandomSource};
//!
//! let mut rng = GameRng::new(42);
//! let roll = rng.roll_die();
//! assert!((1..=6).contains(&roll));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on the game die.
pub const DIE_FACES: u8 = 6;

/// Source of uniform randomness consumed by the turn engine.
///
/// Implementors only need `gen_index`; `roll_die` is derived from it so
/// that a scripted source controls both dice and event draws.
pub trait RandomSource {
    /// Uniform integer in `[0, upper)`. `upper` is always at least 1.
    fn gen_index(&mut self, upper: usize) -> usize;

    /// Uniform die face in `[1, DIE_FACES]`.
    fn roll_die(&mut self) -> u8 {
        self.gen_index(DIE_FACES as usize) as u8 + 1
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn gen_index(&mut self, upper: usize) -> usize {
        (**self).gen_index(upper)
    }

    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn gen_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper.max(1))
    }
}

/// Serializable RNG state for checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed sequence of raw values.
///
/// Each call consumes the next value. A value already inside `[0, upper)`
/// is returned verbatim, anything else is wrapped into range. The script
/// cycles once exhausted; an empty script always yields 0.
///
/// Note that `roll_die` is `gen_index(6) + 1`, so scripting a roll of 4
/// means scripting the value 3.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: Vec<usize>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Script a sequence of die faces (1-6) directly.
    pub fn dice(faces: impl IntoIterator<Item = u8>) -> Self {
        Self::new(faces.into_iter().map(|f| f.saturating_sub(1) as usize))
    }

    /// Append more values to the end of the script.
    pub fn push(&mut self, value: usize) {
        self.values.push(value);
    }

    /// Number of values consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn gen_index(&mut self, upper: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let raw = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        raw % upper.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_index(1000), rng2.gen_index(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_die_faces_in_range() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; DIE_FACES as usize];

        for _ in 0..600 {
            let face = rng.roll_die();
            assert!((1..=DIE_FACES).contains(&face));
            seen[(face - 1) as usize] = true;
        }

        assert!(seen.iter().all(|&s| s), "every face should appear in 600 rolls");
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.gen_index(1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_index(1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_index(1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_scripted_verbatim_and_wrapping() {
        let mut rng = ScriptedRng::new([2, 9, 5]);

        assert_eq!(rng.gen_index(6), 2);
        assert_eq!(rng.gen_index(6), 3); // 9 wraps into [0, 6)
        assert_eq!(rng.gen_index(6), 5);
        // Cycles
        assert_eq!(rng.gen_index(6), 2);
        assert_eq!(rng.consumed(), 4);
    }

    #[test]
    fn test_scripted_dice() {
        let mut rng = ScriptedRng::dice([4, 6, 1]);
        assert_eq!(rng.roll_die(), 4);
        assert_eq!(rng.roll_die(), 6);
        assert_eq!(rng.roll_die(), 1);
    }

    #[test]
    fn test_empty_script_yields_zero() {
        let mut rng = ScriptedRng::default();
        assert_eq!(rng.gen_index(10), 0);
        assert_eq!(rng.roll_die(), 1);
    }
}
