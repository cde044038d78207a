//! Score tracker business logic: pairing, scheduling, persistence, roster import.

mod import;
mod pairs;
mod persist;
mod schedule;

pub use import::{import_roster_csv, read_roster_csv};
pub use pairs::enumerate_pairs;
pub use persist::{
    generate_and_persist, generate_round_robin, persist_schedule, GameSink, GenerationReport,
    PersistFailure, PersistSummary, RosterSource, ScheduleWarning,
};
pub use schedule::{build_schedule, generate_schedule};
