//! Persistence of generated schedules: roster source, game sink, and partial-failure reporting.

use crate::logic::schedule::generate_schedule;
use crate::models::{Game, GameId, GameRecord, Player, ScoreError, Workspace};
use log::{info, warn};
use serde::Serialize;

/// Where the roster for a generation run comes from.
pub trait RosterSource {
    /// Full player list of the owning workspace, in display order.
    fn roster(&self) -> Result<Vec<Player>, ScoreError>;
}

/// Where generated games are written. Each call stores one game as an active record.
pub trait GameSink {
    fn create_game(&mut self, game: &Game) -> Result<GameId, ScoreError>;
}

impl RosterSource for Workspace {
    fn roster(&self) -> Result<Vec<Player>, ScoreError> {
        Ok(self.players.clone())
    }
}

impl RosterSource for Vec<Player> {
    fn roster(&self) -> Result<Vec<Player>, ScoreError> {
        Ok(self.clone())
    }
}

impl GameSink for Workspace {
    fn create_game(&mut self, game: &Game) -> Result<GameId, ScoreError> {
        Workspace::create_game(self, *game).map(|record: &GameRecord| record.id)
    }
}

/// One game that the sink refused.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PersistFailure {
    pub game: Game,
    pub error: String,
}

/// Outcome of writing a schedule: how many of the attempted games were stored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct PersistSummary {
    pub attempted: usize,
    pub persisted: Vec<GameId>,
    pub failures: Vec<PersistFailure>,
}

impl PersistSummary {
    pub fn persisted_count(&self) -> usize {
        self.persisted.len()
    }

    /// At least one write failed. Successful writes are kept regardless.
    pub fn is_partial_failure(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Soft conditions worth showing to the user; not errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleWarning {
    /// The roster was large enough but no game could be formed.
    EmptySchedule,
}

/// Result of a full generate-and-store run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GenerationReport {
    pub games: Vec<Game>,
    pub summary: PersistSummary,
    pub warning: Option<ScheduleWarning>,
}

/// Write every game independently, in order. A failed write does not stop or undo the others.
pub fn persist_schedule<S: GameSink + ?Sized>(sink: &mut S, games: &[Game]) -> PersistSummary {
    let mut summary = PersistSummary {
        attempted: games.len(),
        ..PersistSummary::default()
    };
    for game in games {
        match sink.create_game(game) {
            Ok(id) => summary.persisted.push(id),
            Err(e) => {
                warn!("Failed to store generated game: {}", e);
                summary.failures.push(PersistFailure {
                    game: *game,
                    error: e.to_string(),
                });
            }
        }
    }
    if summary.is_partial_failure() {
        warn!(
            "Stored {} of {} generated game(s)",
            summary.persisted_count(),
            summary.attempted
        );
    } else {
        info!("Stored {} generated game(s)", summary.attempted);
    }
    summary
}

/// Load the roster, build the round-robin schedule, and store every game.
///
/// Fails only on roster loading or when the roster is too small; sink failures are
/// reported in the summary.
pub fn generate_and_persist<R, S>(source: &R, sink: &mut S) -> Result<GenerationReport, ScoreError>
where
    R: RosterSource + ?Sized,
    S: GameSink + ?Sized,
{
    let roster = source.roster()?;
    let games = generate_schedule(&roster)?;
    let warning = if games.is_empty() {
        warn!("No games could be formed from {} players", roster.len());
        Some(ScheduleWarning::EmptySchedule)
    } else {
        None
    };
    let summary = persist_schedule(sink, &games);
    Ok(GenerationReport {
        games,
        summary,
        warning,
    })
}

/// Same as [`generate_and_persist`] with a workspace as both roster source and sink.
pub fn generate_round_robin(workspace: &mut Workspace) -> Result<GenerationReport, ScoreError> {
    let roster = workspace.roster()?;
    generate_and_persist(&roster, workspace)
}
