//! Data structures for the score tracker: players, pairs, games, workspaces.

mod game;
mod pair;
mod player;
mod timer;
mod workspace;

pub use game::{switch_sides_due, Game, GameId, GameRecord, GameStatus, Team};
pub use pair::{Pair, PairKey};
pub use player::{Player, PlayerId};
pub use timer::MatchTimer;
pub(crate) use workspace::name_key;
pub use workspace::{
    ScoreError, Workspace, WorkspaceId, DEFAULT_SWITCH_SIDES_EVERY, MIN_SCHEDULE_PLAYERS,
};
