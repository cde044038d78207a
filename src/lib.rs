//! 2v2 score tracker web app: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    build_schedule, enumerate_pairs, generate_and_persist, generate_round_robin,
    generate_schedule, import_roster_csv, persist_schedule, read_roster_csv, GameSink,
    GenerationReport, PersistFailure, PersistSummary, RosterSource, ScheduleWarning,
};
pub use models::{
    switch_sides_due, Game, GameId, GameRecord, GameStatus, MatchTimer, Pair, PairKey, Player,
    PlayerId, ScoreError, Team, Workspace, WorkspaceId, DEFAULT_SWITCH_SIDES_EVERY,
    MIN_SCHEDULE_PLAYERS,
};
