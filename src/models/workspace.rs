//! Workspace: one owner's roster and games.

use crate::models::game::{Game, GameId, GameRecord};
use crate::models::pair::Pair;
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum roster size for generating a round-robin schedule.
pub const MIN_SCHEDULE_PLAYERS: usize = 4;

/// Default number of total points between switch-sides reminders.
pub const DEFAULT_SWITCH_SIDES_EVERY: u32 = 5;

/// Errors that can occur during workspace operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScoreError {
    /// Not enough players to generate a schedule (need at least 4).
    InsufficientPlayers { found: usize },
    /// Player not found on the roster.
    PlayerNotFound(PlayerId),
    /// Game not found in the workspace.
    GameNotFound(GameId),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Player name is empty after trimming.
    EmptyName,
    /// Player still appears in a stored game.
    PlayerInGame(PlayerId),
    /// Teams must be four distinct players.
    InvalidTeams,
    /// Game is not in a state that allows this action.
    InvalidState,
    /// Roster import could not be read.
    Import(String),
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::InsufficientPlayers { found } => write!(
                f,
                "Need at least {} players to generate games (have {})",
                MIN_SCHEDULE_PLAYERS, found
            ),
            ScoreError::PlayerNotFound(_) => write!(f, "Player not found"),
            ScoreError::GameNotFound(_) => write!(f, "Game not found"),
            ScoreError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            ScoreError::EmptyName => write!(f, "Player name must not be empty"),
            ScoreError::PlayerInGame(_) => write!(f, "Player is part of a game and cannot be removed"),
            ScoreError::InvalidTeams => write!(f, "A game needs four different players"),
            ScoreError::InvalidState => write!(f, "Game is already finished"),
            ScoreError::Import(msg) => write!(f, "Could not import roster: {}", msg),
        }
    }
}

impl std::error::Error for ScoreError {}

/// Unique identifier for a workspace.
pub type WorkspaceId = Uuid;

/// One owner's data: the roster (in display order) and all stored games.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub players: Vec<Player>,
    pub games: Vec<GameRecord>,
    /// Reminder interval given to newly created games.
    pub switch_sides_every: u32,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            players: Vec::new(),
            games: Vec::new(),
            switch_sides_every: DEFAULT_SWITCH_SIDES_EVERY,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn game_mut(&mut self, id: GameId) -> Result<&mut GameRecord, ScoreError> {
        self.games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(ScoreError::GameNotFound(id))
    }

    /// Add a player. Names are trimmed and must be unique (case-insensitive).
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<&Player, ScoreError> {
        let name = self.validate_name(&name.into(), None)?;
        self.players.push(Player::new(name));
        Ok(&self.players[self.players.len() - 1])
    }

    /// Rename a player, with the same validation as [`Workspace::add_player`].
    pub fn rename_player(&mut self, player_id: PlayerId, name: &str) -> Result<(), ScoreError> {
        let name = self.validate_name(name, Some(player_id))?;
        let p = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(ScoreError::PlayerNotFound(player_id))?;
        p.name = name;
        Ok(())
    }

    /// Remove a player by id. Players referenced by a stored game stay.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), ScoreError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(ScoreError::PlayerNotFound(player_id))?;
        if self.games.iter().any(|g| g.involves(player_id)) {
            return Err(ScoreError::PlayerInGame(player_id));
        }
        self.players.remove(idx);
        Ok(())
    }

    /// Store a game between two teams of roster players. Status starts as active.
    pub fn create_game(&mut self, game: Game) -> Result<&GameRecord, ScoreError> {
        let ids = [
            game.team_1.first,
            game.team_1.second,
            game.team_2.first,
            game.team_2.second,
        ];
        for (i, id) in ids.iter().enumerate() {
            if ids[..i].contains(id) {
                return Err(ScoreError::InvalidTeams);
            }
            if self.player(*id).is_none() {
                return Err(ScoreError::PlayerNotFound(*id));
            }
        }
        self.games.push(GameRecord::new(game, self.switch_sides_every));
        Ok(&self.games[self.games.len() - 1])
    }

    /// Convenience for callers holding raw ids.
    pub fn create_game_from_ids(
        &mut self,
        team_1: [PlayerId; 2],
        team_2: [PlayerId; 2],
    ) -> Result<&GameRecord, ScoreError> {
        self.create_game(Game::new(
            Pair::new(team_1[0], team_1[1]),
            Pair::new(team_2[0], team_2[1]),
        ))
    }

    pub fn delete_game(&mut self, game_id: GameId) -> Result<(), ScoreError> {
        let idx = self
            .games
            .iter()
            .position(|g| g.id == game_id)
            .ok_or(ScoreError::GameNotFound(game_id))?;
        self.games.remove(idx);
        Ok(())
    }

    /// Set the reminder interval for games created from now on.
    pub fn set_switch_sides_every(&mut self, every: u32) {
        self.switch_sides_every = every;
    }

    /// Trimmed name if it is non-empty and no other player (besides `except`) has it.
    pub(crate) fn validate_name(
        &self,
        name: &str,
        except: Option<PlayerId>,
    ) -> Result<String, ScoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ScoreError::EmptyName);
        }
        let key = name_key(trimmed);
        let is_duplicate = self
            .players
            .iter()
            .filter(|p| Some(p.id) != except)
            .any(|p| name_key(&p.name) == key);
        if is_duplicate {
            return Err(ScoreError::DuplicatePlayerName);
        }
        Ok(trimmed.to_string())
    }
}

/// Case-folded form used for name uniqueness.
pub(crate) fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
