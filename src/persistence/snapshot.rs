//! Serializable projection of `GameState`.
//!
//! ```json
//! {
//!   "players": [{"id": 1, "name": "Ana", "positionIndex": 4, "avatarId": "robot"}],
//!   "turnIndex": 0,
//!   "totalTiles": 50,
//!   "phase": "playing",
//!   "lastLog": "Ana moved +4"
//! }
//! ```
//!
//! Only turn-level state is persisted: a game saved mid-movement or with
//! an event pending resumes with the same player about to roll.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::board::Board;
use crate::core::{
    AvatarId, Player, PlayerId, RandomSource, Roster, DEFAULT_TOTAL_TILES, MIN_TOTAL_TILES,
};
use crate::engine::{GameState, TurnEngine, TurnPhase};

/// Coarse game phase as persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotPhase {
    #[default]
    Setup,
    Playing,
    Won,
}

impl SnapshotPhase {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "setup" => Some(SnapshotPhase::Setup),
            "playing" => Some(SnapshotPhase::Playing),
            "won" => Some(SnapshotPhase::Won),
            _ => None,
        }
    }
}

/// One persisted player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub id: u64,
    pub name: String,
    pub position_index: usize,
    pub avatar_id: String,
}

/// Persisted game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameStateSnapshot {
    pub players: Vec<PlayerSnapshot>,
    pub turn_index: usize,
    pub total_tiles: usize,
    pub phase: SnapshotPhase,
    pub last_log: String,
}

impl Default for GameStateSnapshot {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            turn_index: 0,
            total_tiles: DEFAULT_TOTAL_TILES,
            phase: SnapshotPhase::Setup,
            last_log: String::new(),
        }
    }
}

impl GameStateSnapshot {
    /// Project a game state.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        let phase = match state.phase() {
            TurnPhase::Setup => SnapshotPhase::Setup,
            TurnPhase::Won(_) => SnapshotPhase::Won,
            _ => SnapshotPhase::Playing,
        };

        Self {
            players: state
                .players()
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id.raw(),
                    name: p.name.clone(),
                    position_index: p.position,
                    avatar_id: p.avatar.as_str().to_string(),
                })
                .collect(),
            turn_index: state.turn_index(),
            total_tiles: state.total_tiles(),
            phase,
            last_log: state.last_log().to_string(),
        }
    }

    /// Parse stored JSON, repairing whatever is malformed.
    ///
    /// Input that is not JSON at all yields the default snapshot.
    #[must_use]
    pub fn from_json_str(json: &str) -> Self {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                log::warn!("saved game is not valid JSON, starting fresh: {}", e);
                Self::default()
            }
        }
    }

    /// Read a snapshot field by field, defaulting each one independently.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            log::warn!("saved game is not a JSON object, starting fresh");
            return Self::default();
        };
        let defaults = Self::default();

        let total_tiles = match field(obj, "totalTiles", as_index) {
            Some(n) if n >= MIN_TOTAL_TILES => n,
            Some(n) => {
                log::warn!("saved totalTiles {} too small, using {}", n, DEFAULT_TOTAL_TILES);
                defaults.total_tiles
            }
            None => defaults.total_tiles,
        };

        let phase = field(obj, "phase", |v| v.as_str().and_then(SnapshotPhase::parse))
            .unwrap_or(defaults.phase);

        let mut players: Vec<PlayerSnapshot> = Vec::new();
        match obj.get("players") {
            Some(Value::Array(entries)) => {
                for entry in entries {
                    match player_from_value(entry) {
                        Some(p) if players.iter().any(|q| q.id == p.id) => {
                            log::warn!("dropping saved player with duplicate id {}", p.id);
                        }
                        Some(p) => players.push(p),
                        None => log::warn!("dropping malformed saved player: {}", entry),
                    }
                }
            }
            Some(Value::Null) | None => {}
            Some(other) => log::warn!("saved players is not a list: {}", other),
        }

        let finish = total_tiles - 1;
        for p in &mut players {
            if p.position_index > finish {
                log::warn!("clamping saved position of {} to {}", p.name, finish);
                p.position_index = finish;
            }
            if phase == SnapshotPhase::Setup && p.position_index != 0 {
                log::warn!("{} was off the start tile during setup", p.name);
                p.position_index = 0;
            }
        }

        let mut turn_index = field(obj, "turnIndex", as_index).unwrap_or(defaults.turn_index);
        if turn_index >= players.len().max(1) {
            log::warn!("saved turnIndex {} out of range, using 0", turn_index);
            turn_index = 0;
        }

        let last_log = field(obj, "lastLog", |v| v.as_str().map(str::to_string))
            .unwrap_or(defaults.last_log);

        Self {
            players,
            turn_index,
            total_tiles,
            phase,
            last_log,
        }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Rebuild a game state.
    ///
    /// A `playing` snapshot resumes with the saved player about to roll;
    /// `won` names that player the winner. Either one without players
    /// falls back to setup.
    #[must_use]
    pub fn into_state(self) -> GameState {
        let players = self
            .players
            .into_iter()
            .map(|p| {
                Player::new(PlayerId::new(p.id), p.name, AvatarId::new(p.avatar_id))
                    .at(p.position_index)
            })
            .collect();
        let roster = Roster::from_players(players);
        let board = Board::at_least_min(self.total_tiles);
        let finish = board.finish_index();
        let turn_index = if self.turn_index < roster.len() { self.turn_index } else { 0 };

        let phase = match (self.phase, roster.get(turn_index)) {
            (SnapshotPhase::Playing, Some(_)) => TurnPhase::AwaitingRoll,
            (SnapshotPhase::Won, Some(p)) => TurnPhase::Won(p.id),
            _ => TurnPhase::Setup,
        };

        let mut state = GameState {
            roster,
            board,
            turn_index,
            phase,
            last_log: self.last_log,
            last_roll: 1,
            history: im::Vector::new(),
            event_serial: 0,
        };
        for p in state.roster.iter_mut() {
            p.position = p.position.min(finish);
        }
        state
    }
}

impl<R: RandomSource> TurnEngine<R> {
    /// Snapshot of the current game for saving.
    #[must_use]
    pub fn snapshot(&self) -> GameStateSnapshot {
        GameStateSnapshot::capture(self.state())
    }

    /// Replace the current game with a restored one.
    ///
    /// Event serials keep counting from the current game, so timers armed
    /// before the restore can never match an event drawn after it.
    pub fn restore(&mut self, snapshot: GameStateSnapshot) {
        let mut state = snapshot.into_state();
        state.event_serial = self.state().event_serial;
        log::info!(
            "restored game: {} players, {} tiles, {}",
            state.roster.len(),
            state.total_tiles(),
            state.phase
        );
        self.replace_state(state);
    }
}

fn field<T>(obj: &Map<String, Value>, key: &str, read: impl Fn(&Value) -> Option<T>) -> Option<T> {
    let value = obj.get(key)?;
    if value.is_null() {
        return None;
    }
    let parsed = read(value);
    if parsed.is_none() {
        log::warn!("ignoring malformed saved {}: {}", key, value);
    }
    parsed
}

/// Non-negative integer, accepting integral floats like `3.0`.
fn as_index(value: &Value) -> Option<usize> {
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64 {
        Some(f as usize)
    } else {
        None
    }
}

fn player_from_value(value: &Value) -> Option<PlayerSnapshot> {
    let obj = value.as_object()?;
    let id = obj.get("id").and_then(|v| v.as_u64())?;
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.trim().is_empty())?;

    Some(PlayerSnapshot {
        id,
        name: name.to_string(),
        position_index: obj.get("positionIndex").and_then(as_index).unwrap_or(0),
        avatar_id: obj
            .get("avatarId")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> GameStateSnapshot {
        GameStateSnapshot {
            players: vec![
                PlayerSnapshot {
                    id: 1,
                    name: "Ana".into(),
                    position_index: 4,
                    avatar_id: "robot".into(),
                },
                PlayerSnapshot {
                    id: 2,
                    name: "Beto".into(),
                    position_index: 0,
                    avatar_id: "ghost".into(),
                },
            ],
            turn_index: 1,
            total_tiles: 30,
            phase: SnapshotPhase::Playing,
            last_log: "Ana moved +4".into(),
        }
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["turnIndex"], 1);
        assert_eq!(value["totalTiles"], 30);
        assert_eq!(value["phase"], "playing");
        assert_eq!(value["lastLog"], "Ana moved +4");
        assert_eq!(value["players"][0]["positionIndex"], 4);
        assert_eq!(value["players"][0]["avatarId"], "robot");
    }

    #[test]
    fn test_round_trip() {
        let snapshot = sample();
        let json = snapshot.to_json_string().unwrap();
        assert_eq!(GameStateSnapshot::from_json_str(&json), snapshot);
    }

    #[test]
    fn test_names_kept_as_written() {
        let mut snapshot = sample();
        snapshot.players[0].name = "Ana ".into();
        snapshot.players[1].name = "  Beto".into();

        let json = snapshot.to_json_string().unwrap();
        let back = GameStateSnapshot::from_json_str(&json);
        assert_eq!(back.players[0].name, "Ana ");
        assert_eq!(back, snapshot);

        let blank = GameStateSnapshot::from_value(&json!({
            "players": [{"id": 1, "name": "   ", "positionIndex": 0, "avatarId": "x"}],
        }));
        assert!(blank.players.is_empty());
    }

    #[test]
    fn test_only_players_present() {
        let snapshot = GameStateSnapshot::from_value(&json!({"players": []}));
        assert_eq!(snapshot.turn_index, 0);
        assert_eq!(snapshot.total_tiles, 50);
        assert_eq!(snapshot.phase, SnapshotPhase::Setup);
        assert_eq!(snapshot.last_log, "");
    }

    #[test]
    fn test_garbage_input() {
        assert_eq!(GameStateSnapshot::from_json_str("not json"), GameStateSnapshot::default());
        assert_eq!(GameStateSnapshot::from_json_str("[1, 2]"), GameStateSnapshot::default());
    }

    #[test]
    fn test_fields_repaired_independently() {
        let snapshot = GameStateSnapshot::from_value(&json!({
            "players": [
                {"id": 1, "name": "Ana", "positionIndex": 99, "avatarId": "robot"},
                {"id": "two", "name": "Bad id"},
                {"id": 3, "name": "   "},
                {"id": 1, "name": "Duplicate"},
                {"id": 4, "name": "Cami"}
            ],
            "turnIndex": 7,
            "totalTiles": "many",
            "phase": "paused",
            "lastLog": 12
        }));

        assert_eq!(snapshot.total_tiles, 50);
        assert_eq!(snapshot.phase, SnapshotPhase::Setup);
        assert_eq!(snapshot.last_log, "");
        assert_eq!(snapshot.turn_index, 0);

        let names: Vec<_> = snapshot.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Ana", "Cami"]);
        // Clamped to the board, then zeroed for setup.
        assert_eq!(snapshot.players[0].position_index, 0);
        assert_eq!(snapshot.players[1].avatar_id, "");
    }

    #[test]
    fn test_position_clamped_while_playing() {
        let snapshot = GameStateSnapshot::from_value(&json!({
            "players": [{"id": 1, "name": "Ana", "positionIndex": 40}],
            "totalTiles": 25,
            "phase": "playing"
        }));
        assert_eq!(snapshot.players[0].position_index, 24);
    }

    #[test]
    fn test_tiny_board_replaced() {
        let snapshot = GameStateSnapshot::from_value(&json!({"totalTiles": 1}));
        assert_eq!(snapshot.total_tiles, DEFAULT_TOTAL_TILES);
        let snapshot = GameStateSnapshot::from_value(&json!({"totalTiles": 60.0}));
        assert_eq!(snapshot.total_tiles, 60);
    }

    #[test]
    fn test_into_state_phases() {
        let state = sample().into_state();
        assert_eq!(state.phase(), &TurnPhase::AwaitingRoll);
        assert_eq!(state.active_player().unwrap().name, "Beto");
        assert_eq!(state.players()[0].position, 4);

        let mut won = sample();
        won.phase = SnapshotPhase::Won;
        assert_eq!(won.into_state().phase(), &TurnPhase::Won(PlayerId::new(2)));

        let empty = GameStateSnapshot {
            phase: SnapshotPhase::Playing,
            ..GameStateSnapshot::default()
        };
        assert_eq!(empty.into_state().phase(), &TurnPhase::Setup);
    }

    #[test]
    fn test_capture_inverts_into_state() {
        for phase in [SnapshotPhase::Setup, SnapshotPhase::Playing, SnapshotPhase::Won] {
            let mut snapshot = sample();
            snapshot.phase = phase;
            if phase == SnapshotPhase::Setup {
                snapshot.players[0].position_index = 0;
            }
            let state = snapshot.clone().into_state();
            assert_eq!(GameStateSnapshot::capture(&state), snapshot);
        }
    }
}
