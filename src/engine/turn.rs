//! The turn engine.
//!
//! ## Turn cycle
//!
//! 1. `roll` draws a die face and starts movement.
//! 2. `advance_step` moves one tile at a time (or `finish_movement` all at
//!    once). Reaching the last tile wins; any other landing draws an event.
//! 3. `resolve_event` applies or declines the event's movement and passes
//!    the turn to the next player.
//!
//! Winning is only checked when movement from a roll ends. An accepted
//! event that carries a player onto the last tile does not win; that
//! player wins on their next roll, since any roll from the last tile
//! lands there again.

use super::command::{Command, CommandOutcome, IgnoreReason};
use super::phase::{PendingEvent, TurnPhase};
use super::state::{GameState, MoveCause};
use crate::board::Board;
use crate::core::{
    AvatarId, ConfigError, GameConfig, GameRng, Player, PlayerId, RandomSource, Roster,
};
use crate::events::{EventCatalog, ResponseTimer};

/// Drives one game. Owns the state, the event catalog and the RNG.
#[derive(Clone, Debug)]
pub struct TurnEngine<R: RandomSource = GameRng> {
    state: GameState,
    catalog: EventCatalog,
    rng: R,
}

impl TurnEngine<GameRng> {
    /// Engine with the standard catalog and a ChaCha RNG seeded from
    /// `config.seed` (or the OS when unset).
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self::with_rng(config, EventCatalog::standard(), rng)
    }
}

impl<R: RandomSource> TurnEngine<R> {
    /// Engine with an injected catalog and random source.
    pub fn with_rng(config: GameConfig, catalog: EventCatalog, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: GameState::new(config.total_tiles)?,
            catalog,
            rng,
        })
    }

    // === Observation ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.state.players()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.state.active_player()
    }

    #[must_use]
    pub fn pending_event(&self) -> Option<&PendingEvent> {
        self.state.pending_event()
    }

    #[must_use]
    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    /// The injected random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    // === Roster (setup only) ===

    /// Register a player before the game starts.
    pub fn add_player(&mut self, name: &str, avatar: AvatarId) -> Result<PlayerId, ConfigError> {
        self.require_setup()?;
        let id = self.state.roster.register(name, avatar)?;
        log::debug!("registered {} as {}", name.trim(), id);
        Ok(id)
    }

    /// Register a player with a random avatar not yet in use.
    pub fn add_player_with_random_avatar(
        &mut self,
        name: &str,
        registry: &[AvatarId],
    ) -> Result<PlayerId, ConfigError> {
        self.require_setup()?;
        let avatar = self
            .state
            .roster
            .pick_avatar(registry, &mut self.rng)
            .unwrap_or_default();
        self.add_player(name, avatar)
    }

    pub fn remove_player(&mut self, id: PlayerId) -> Result<Option<Player>, ConfigError> {
        self.require_setup()?;
        Ok(self.state.roster.remove(id))
    }

    fn require_setup(&self) -> Result<(), ConfigError> {
        if self.state.phase == TurnPhase::Setup {
            Ok(())
        } else {
            Err(ConfigError::GameInProgress)
        }
    }

    // === Commands ===

    /// Apply a command. Only `StartGame` can fail.
    pub fn dispatch(&mut self, command: Command) -> Result<CommandOutcome, ConfigError> {
        log::trace!("dispatch {:?} in {}", command, self.state.phase);
        let outcome = match command {
            Command::StartGame { total_tiles } => return self.start_game(total_tiles),
            Command::Roll => self.roll(),
            Command::AdvanceStep => self.advance_step(),
            Command::FinishMovement => self.finish_movement(),
            Command::ResolveEvent { accept } => self.resolve_event(accept),
            Command::Reset => self.reset(),
        };
        Ok(outcome)
    }

    /// Start a game with the registered roster.
    ///
    /// Validates before touching any state: the board needs at least two
    /// tiles, the roster at least one player, and everyone must be on the
    /// start tile. Ignored outside setup.
    pub fn start_game(&mut self, total_tiles: usize) -> Result<CommandOutcome, ConfigError> {
        if self.state.phase != TurnPhase::Setup {
            return Ok(CommandOutcome::wrong_phase(self.state.phase.name()));
        }

        let board = Board::new(total_tiles)?;
        if self.state.roster.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        if let Some(p) = self.state.roster.iter().find(|p| p.position != 0) {
            return Err(ConfigError::PlayerNotAtStart { player: p.id });
        }

        self.state.board = board;
        self.state.turn_index = 0;
        self.state.history.clear();
        self.state.last_log.clear();
        self.set_phase(TurnPhase::AwaitingRoll);
        log::info!(
            "game started: {} players, {} tiles",
            self.state.roster.len(),
            total_tiles
        );
        Ok(CommandOutcome::Applied)
    }

    /// Replace the roster, then start.
    pub fn start_with(&mut self, roster: Roster, total_tiles: usize) -> Result<CommandOutcome, ConfigError> {
        self.require_setup()?;
        let previous = std::mem::replace(&mut self.state.roster, roster);
        let result = self.start_game(total_tiles);
        if result.is_err() {
            self.state.roster = previous;
        }
        result
    }

    /// Roll the die for the active player.
    pub fn roll(&mut self) -> CommandOutcome {
        if self.state.phase != TurnPhase::AwaitingRoll {
            return CommandOutcome::wrong_phase(self.state.phase.name());
        }

        self.set_phase(TurnPhase::Rolling);
        let rolled = self.rng.roll_die();
        self.state.last_roll = rolled;

        let from = self.active_position();
        log::debug!("turn {}: rolled {}", self.state.turn_index, rolled);
        self.set_phase(TurnPhase::Moving {
            rolled,
            steps_remaining: rolled,
            from,
        });
        CommandOutcome::Applied
    }

    /// Move the active player one tile.
    ///
    /// Movement stops at the last tile; steps left over are dropped. When
    /// no steps remain the landing is resolved.
    pub fn advance_step(&mut self) -> CommandOutcome {
        let TurnPhase::Moving {
            rolled,
            mut steps_remaining,
            from,
        } = self.state.phase
        else {
            return CommandOutcome::wrong_phase(self.state.phase.name());
        };

        let finish = self.state.board.finish_index();
        if steps_remaining > 0 {
            let idx = self.state.turn_index;
            if let Some(player) = self.state.roster.get_mut(idx) {
                player.position = (player.position + 1).min(finish);
                steps_remaining -= 1;
                if player.position == finish {
                    steps_remaining = 0;
                }
                log::trace!("{} stepped to {}", player.id, player.position);
            } else {
                steps_remaining = 0;
            }
        }

        if steps_remaining > 0 {
            self.state.phase = TurnPhase::Moving {
                rolled,
                steps_remaining,
                from,
            };
        } else {
            self.land(rolled, from);
        }
        CommandOutcome::Applied
    }

    /// Run all remaining movement steps.
    pub fn finish_movement(&mut self) -> CommandOutcome {
        if !matches!(self.state.phase, TurnPhase::Moving { .. }) {
            return CommandOutcome::wrong_phase(self.state.phase.name());
        }
        while matches!(self.state.phase, TurnPhase::Moving { .. }) {
            self.advance_step();
        }
        CommandOutcome::Applied
    }

    /// Accept or decline the pending event, then pass the turn.
    ///
    /// Accepting applies the template's net movement, clamped to the
    /// board. Declining, or an event without a consequence, leaves the
    /// player in place.
    pub fn resolve_event(&mut self, accept: bool) -> CommandOutcome {
        let TurnPhase::ResolvingEvent(pending) = &self.state.phase else {
            return CommandOutcome::wrong_phase(self.state.phase.name());
        };

        let effect = pending.template.effect;
        let category = pending.category;

        if accept && effect.has_consequence() {
            let from = self.active_position();
            let to = self.state.board.clamp_position(from as i64 + effect.delta());
            self.state.move_active(to, from, MoveCause::Event(category));
        }
        log::debug!(
            "event on {} {}",
            category,
            if accept { "accepted" } else { "declined" }
        );

        self.advance_turn();
        CommandOutcome::Applied
    }

    /// Decline the pending event because its timer ran out.
    ///
    /// Fires at most once per timer, and only for the event the timer was
    /// created for.
    pub fn expire_timer(&mut self, timer: &mut ResponseTimer) -> CommandOutcome {
        let Some(pending) = self.state.pending_event() else {
            return CommandOutcome::wrong_phase(self.state.phase.name());
        };
        if pending.serial != timer.event_serial() {
            return CommandOutcome::Ignored(IgnoreReason::StaleTimer);
        }
        if !timer.take_expiry() {
            return CommandOutcome::Ignored(IgnoreReason::TimerNotExpired);
        }
        log::debug!("response timer expired for event {}", timer.event_serial());
        self.resolve_event(false)
    }

    /// Clear the roster and return to setup. The board length is kept.
    pub fn reset(&mut self) -> CommandOutcome {
        self.state.roster.clear();
        self.state.turn_index = 0;
        self.state.last_log.clear();
        self.state.last_roll = 1;
        self.state.history.clear();
        self.set_phase(TurnPhase::Setup);
        log::info!("game reset");
        CommandOutcome::Applied
    }

    /// Replace the whole state, e.g. after restoring a save.
    pub fn replace_state(&mut self, state: GameState) {
        self.state = state;
        log::debug!("state replaced, now {}", self.state.phase);
    }

    // === Internals ===

    fn active_position(&self) -> usize {
        self.state.active_player().map_or(0, |p| p.position)
    }

    fn set_phase(&mut self, phase: TurnPhase) {
        log::debug!("phase {} -> {}", self.state.phase, phase);
        self.state.phase = phase;
    }

    /// Movement from a roll has ended: win, draw an event, or pass.
    fn land(&mut self, rolled: u8, from: usize) {
        let to = self.active_position();
        self.state.move_active(to, from, MoveCause::Roll(rolled));

        if to == self.state.board.finish_index() {
            if let Some(player) = self.state.active_player() {
                let id = player.id;
                log::info!("{} ({}) reached the finish", player.name, id);
                self.set_phase(TurnPhase::Won(id));
            }
            return;
        }

        let Some(category) = self.state.board.category_at(to) else {
            self.advance_turn();
            return;
        };

        match self.catalog.draw(category, &mut self.rng) {
            Some(template) => {
                self.state.event_serial += 1;
                let pending = PendingEvent {
                    template: template.clone(),
                    category,
                    serial: self.state.event_serial,
                };
                self.set_phase(TurnPhase::ResolvingEvent(pending));
            }
            None => {
                log::warn!("no event pool for {}, passing the turn", category);
                self.advance_turn();
            }
        }
    }

    fn advance_turn(&mut self) {
        self.set_phase(TurnPhase::AdvancingTurn);
        let count = self.state.roster.len().max(1);
        self.state.turn_index = (self.state.turn_index + 1) % count;
        self.set_phase(TurnPhase::AwaitingRoll);
    }
}
