//! Turn engine: the game's state machine.
//!
//! ```text
//! Setup -> AwaitingRoll -> Rolling -> Moving -> ResolvingEvent -> AdvancingTurn -> AwaitingRoll
//!                                        \-> Won(player)
//! ```
//!
//! `GameState` is only ever changed through `TurnEngine` commands.
//! Commands issued in the wrong phase return `CommandOutcome::Ignored`
//! and leave the state untouched, so a double-tap in the UI is harmless.

mod phase;
mod state;
mod command;
mod turn;

pub use phase::{PendingEvent, TurnPhase};
pub use state::{GameState, MoveCause, TurnRecord};
pub use command::{Command, CommandOutcome, IgnoreReason};
pub use turn::TurnEngine;
