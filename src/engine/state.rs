//! Game state owned by the turn engine.

use im::Vector;

use super::phase::{PendingEvent, TurnPhase};
use crate::board::{Board, TileCategory};
use crate::core::{ConfigError, Player, PlayerId, Roster};

/// Why a player moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveCause {
    /// Die roll with the face shown.
    Roll(u8),
    /// Accepted consequence of an event drawn on a tile of this category.
    Event(TileCategory),
}

/// One applied movement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnRecord {
    pub player: PlayerId,
    pub from: usize,
    pub to: usize,
    pub cause: MoveCause,
}

impl TurnRecord {
    /// Signed tile change.
    #[must_use]
    pub fn delta(&self) -> i64 {
        self.to as i64 - self.from as i64
    }
}

/// Complete state of one game.
///
/// Invariants while a game runs:
/// - every position is within `[0, board.finish_index()]`
/// - `turn_index < roster.len()` and the roster is non-empty
/// - an event is pending exactly when the phase is `ResolvingEvent`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) roster: Roster,
    pub(crate) board: Board,
    pub(crate) turn_index: usize,
    pub(crate) phase: TurnPhase,
    pub(crate) last_log: String,
    pub(crate) last_roll: u8,
    pub(crate) history: Vector<TurnRecord>,
    pub(crate) event_serial: u64,
}

impl GameState {
    /// Fresh setup-phase state for a board of `total_tiles`.
    pub fn new(total_tiles: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            roster: Roster::new(),
            board: Board::new(total_tiles)?,
            turn_index: 0,
            phase: TurnPhase::Setup,
            last_log: String::new(),
            last_roll: 1,
            history: Vector::new(),
            event_serial: 0,
        })
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.roster.as_slice()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn total_tiles(&self) -> usize {
        self.board.len()
    }

    #[must_use]
    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    #[must_use]
    pub fn pending_event(&self) -> Option<&PendingEvent> {
        self.phase.pending_event()
    }

    /// Description of the last movement, empty before any.
    #[must_use]
    pub fn last_log(&self) -> &str {
        &self.last_log
    }

    /// Face of the most recent roll (1 before the first roll).
    #[must_use]
    pub fn last_roll(&self) -> u8 {
        self.last_roll
    }

    /// Every movement applied this game, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.roster.get(self.turn_index)
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.phase.winner().and_then(|id| self.roster.find(id))
    }

    /// Furthest-ahead player; the earliest in turn order wins ties.
    #[must_use]
    pub fn leader(&self) -> Option<&Player> {
        self.roster
            .iter()
            .fold(None, |best: Option<&Player>, p| match best {
                Some(b) if b.position >= p.position => Some(b),
                _ => Some(p),
            })
    }

    /// How far the leader is along the circuit, in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let max = self.roster.iter().map(|p| p.position).max().unwrap_or(0);
        (max as f64 / self.total_tiles() as f64).min(1.0)
    }

    /// Move the active player to `to` (already clamped) and record it.
    ///
    /// `last_log` only changes when the position actually changes.
    pub(crate) fn move_active(&mut self, to: usize, from: usize, cause: MoveCause) {
        let Some(player) = self.roster.get_mut(self.turn_index) else {
            return;
        };
        player.position = to;

        let record = TurnRecord {
            player: player.id,
            from,
            to,
            cause,
        };
        let delta = record.delta();
        if delta != 0 {
            self.last_log = format!("{} moved {:+}", player.name, delta);
        }
        log::debug!("{} {} -> {} ({:?})", player.id, from, to, cause);
        self.history.push_back(record);
    }
}
