//! Turn phases.

use serde::{Deserialize, Serialize};

use crate::board::TileCategory;
use crate::core::PlayerId;
use crate::events::EventTemplate;

/// An event waiting for the active player's decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEvent {
    pub template: EventTemplate,
    /// Category of the tile that triggered the event.
    pub category: TileCategory,
    /// Increments with every drawn event. Binds timers to one event.
    pub serial: u64,
}

/// Where the game is in its turn cycle.
///
/// The pending event lives inside `ResolvingEvent`, so an event can only
/// be pending while the engine is waiting for its resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// Players are being registered; no game is running.
    Setup,
    AwaitingRoll,
    /// The die is being drawn. Transient.
    Rolling,
    Moving {
        /// Face shown by the die.
        rolled: u8,
        steps_remaining: u8,
        /// Position the mover started from.
        from: usize,
    },
    ResolvingEvent(PendingEvent),
    /// Passing the turn to the next player. Transient.
    AdvancingTurn,
    /// Terminal until reset.
    Won(PlayerId),
}

impl TurnPhase {
    /// Stable name for logs and ignored-command reports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TurnPhase::Setup => "setup",
            TurnPhase::AwaitingRoll => "awaiting-roll",
            TurnPhase::Rolling => "rolling",
            TurnPhase::Moving { .. } => "moving",
            TurnPhase::ResolvingEvent(_) => "resolving-event",
            TurnPhase::AdvancingTurn => "advancing-turn",
            TurnPhase::Won(_) => "won",
        }
    }

    /// Whether a game is running (not in setup, not finished).
    #[must_use]
    pub fn is_playing(&self) -> bool {
        !matches!(self, TurnPhase::Setup | TurnPhase::Won(_))
    }

    #[must_use]
    pub fn pending_event(&self) -> Option<&PendingEvent> {
        match self {
            TurnPhase::ResolvingEvent(pending) => Some(pending),
            _ => None,
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            TurnPhase::Won(id) => Some(*id),
            _ => None,
        }
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_event_only_while_resolving() {
        let pending = PendingEvent {
            template: EventTemplate::new("dare"),
            category: TileCategory::Danger,
            serial: 1,
        };

        assert!(TurnPhase::ResolvingEvent(pending.clone()).pending_event().is_some());
        assert!(TurnPhase::AwaitingRoll.pending_event().is_none());
        assert!(TurnPhase::Won(PlayerId::new(1)).pending_event().is_none());
    }

    #[test]
    fn test_is_playing() {
        assert!(!TurnPhase::Setup.is_playing());
        assert!(TurnPhase::AwaitingRoll.is_playing());
        assert!(TurnPhase::Moving { rolled: 3, steps_remaining: 1, from: 0 }.is_playing());
        assert!(!TurnPhase::Won(PlayerId::new(2)).is_playing());
        assert_eq!(TurnPhase::Won(PlayerId::new(2)).winner(), Some(PlayerId::new(2)));
    }
}
