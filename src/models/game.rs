//! Games: the abstract 2v2 game produced by scheduling, and the stored record with scores.

use crate::models::pair::Pair;
use crate::models::player::PlayerId;
use crate::models::timer::MatchTimer;
use crate::models::workspace::ScoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a stored game.
pub type GameId = Uuid;

/// One of the two sides of a game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    One,
    Two,
}

/// A 2v2 game before it is stored: two disjoint teammate pairs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub team_1: Pair,
    pub team_2: Pair,
}

impl Game {
    pub fn new(team_1: Pair, team_2: Pair) -> Self {
        Self { team_1, team_2 }
    }
}

/// Lifecycle of a stored game.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Active,
    Finished,
}

/// A stored game: teams, live score, timer and switch-sides reminder.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    pub team_1: Pair,
    pub team_2: Pair,
    pub score_1: u32,
    pub score_2: u32,
    pub status: GameStatus,
    pub timer: MatchTimer,
    /// Remind to switch sides every this many points in total (0 = never).
    pub switch_sides_every: u32,
    /// Set when the total score reaches a multiple of `switch_sides_every`.
    pub switch_sides_due: bool,
    pub created_at: DateTime<Utc>,
}

impl GameRecord {
    /// New active game with zero scores and a paused timer.
    pub fn new(game: Game, switch_sides_every: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_1: game.team_1,
            team_2: game.team_2,
            score_1: 0,
            score_2: 0,
            status: GameStatus::Active,
            timer: MatchTimer::default(),
            switch_sides_every,
            switch_sides_due: false,
            created_at: Utc::now(),
        }
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.team_1.contains(player) || self.team_2.contains(player)
    }

    /// Add a point for a team (score stops at `u32::MAX`).
    pub fn add_point(&mut self, team: Team) -> Result<(), ScoreError> {
        self.ensure_active()?;
        match team {
            Team::One => self.score_1 = self.score_1.saturating_add(1),
            Team::Two => self.score_2 = self.score_2.saturating_add(1),
        }
        self.refresh_switch_sides();
        Ok(())
    }

    /// Take back a point (score never goes below zero).
    pub fn remove_point(&mut self, team: Team) -> Result<(), ScoreError> {
        self.ensure_active()?;
        match team {
            Team::One => self.score_1 = self.score_1.saturating_sub(1),
            Team::Two => self.score_2 = self.score_2.saturating_sub(1),
        }
        self.refresh_switch_sides();
        Ok(())
    }

    pub fn set_score(&mut self, score_1: u32, score_2: u32) -> Result<(), ScoreError> {
        self.ensure_active()?;
        self.score_1 = score_1;
        self.score_2 = score_2;
        self.refresh_switch_sides();
        Ok(())
    }

    /// Players have switched sides; clear the reminder until the next threshold.
    pub fn acknowledge_switch(&mut self) {
        self.switch_sides_due = false;
    }

    pub fn start_timer(&mut self, now: DateTime<Utc>) -> Result<(), ScoreError> {
        self.ensure_active()?;
        self.timer.start(now);
        Ok(())
    }

    pub fn pause_timer(&mut self, now: DateTime<Utc>) -> Result<(), ScoreError> {
        self.ensure_active()?;
        self.timer.pause(now);
        Ok(())
    }

    pub fn reset_timer(&mut self) -> Result<(), ScoreError> {
        self.ensure_active()?;
        self.timer.reset();
        Ok(())
    }

    /// Mark finished and stop the clock. Scores are frozen afterwards.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<(), ScoreError> {
        self.ensure_active()?;
        self.timer.pause(now);
        self.switch_sides_due = false;
        self.status = GameStatus::Finished;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), ScoreError> {
        if self.status != GameStatus::Active {
            return Err(ScoreError::InvalidState);
        }
        Ok(())
    }

    fn refresh_switch_sides(&mut self) {
        let total = u64::from(self.score_1) + u64::from(self.score_2);
        self.switch_sides_due = switch_sides_due(total, self.switch_sides_every);
    }
}

/// Whether players should switch sides at this total score.
///
/// Due when the total is positive and a multiple of `every`; `every == 0` disables it.
pub fn switch_sides_due(total: u64, every: u32) -> bool {
    every > 0 && total > 0 && total % u64::from(every) == 0
}
