//! Commands accepted by the turn engine and their outcomes.

use serde::{Deserialize, Serialize};

/// A request from the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Start with the registered roster on a board of `total_tiles`.
    StartGame { total_tiles: usize },
    Roll,
    AdvanceStep,
    /// All remaining movement steps at once.
    FinishMovement,
    ResolveEvent { accept: bool },
    Reset,
}

/// Why a command had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Issued outside the phase it applies to.
    WrongPhase { phase: &'static str },
    /// Timer belongs to an event that is no longer pending.
    StaleTimer,
    /// Timer has not run out (or was cancelled or already used).
    TimerNotExpired,
}

/// Result of a command that passed configuration checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl CommandOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == CommandOutcome::Applied
    }

    pub(crate) fn wrong_phase(phase: &'static str) -> Self {
        CommandOutcome::Ignored(IgnoreReason::WrongPhase { phase })
    }
}
