//! Round-robin schedule building: greedy first-fit over the enumerated pairs.

use crate::logic::pairs::enumerate_pairs;
use crate::models::{Game, Pair, PairKey, Player, PlayerId, ScoreError, MIN_SCHEDULE_PLAYERS};
use log::{debug, info};
use std::collections::HashSet;

/// Check the roster size, then build the schedule.
///
/// Rosters with fewer than 4 players are rejected before any pairing is attempted.
pub fn generate_schedule(roster: &[Player]) -> Result<Vec<Game>, ScoreError> {
    if roster.len() < MIN_SCHEDULE_PLAYERS {
        return Err(ScoreError::InsufficientPlayers {
            found: roster.len(),
        });
    }
    let games = build_schedule(roster);
    info!(
        "Built schedule of {} game(s) for {} players",
        games.len(),
        roster.len()
    );
    Ok(games)
}

/// Assemble 2v2 games so that no teammate pair is used twice.
///
/// For each candidate `team_1` in enumeration order:
/// 1. Skip it if its key is already used.
/// 2. Take the first pair of the remaining players (same order) whose key is unused as `team_2`.
/// 3. If there is one, emit the game and mark both keys used; otherwise skip.
///
/// This is first-fit, not a maximum cover: coverage per player can be uneven.
/// Callers must check the roster size first (see [`generate_schedule`]).
pub fn build_schedule(roster: &[Player]) -> Vec<Game> {
    let ids: Vec<PlayerId> = roster.iter().map(|p| p.id).collect();
    let mut used_pairs: HashSet<PairKey> = HashSet::new();
    let mut games = Vec::new();

    for team_1 in enumerate_pairs(roster) {
        if used_pairs.contains(&team_1.key()) {
            continue;
        }
        let remaining: Vec<PlayerId> = ids
            .iter()
            .copied()
            .filter(|id| !team_1.contains(*id))
            .collect();
        if remaining.len() < 2 {
            continue;
        }
        let Some(team_2) = first_unused_pair(&remaining, &used_pairs) else {
            debug!("No unused opponent pair left for {}", team_1.key());
            continue;
        };
        used_pairs.insert(team_1.key());
        used_pairs.insert(team_2.key());
        games.push(Game::new(team_1, team_2));
    }

    games
}

/// First pair `(ids[i], ids[j])`, `i < j`, whose key is not in `used`.
fn first_unused_pair(ids: &[PlayerId], used: &HashSet<PairKey>) -> Option<Pair> {
    ids.iter().enumerate().find_map(|(i, &a)| {
        ids[i + 1..]
            .iter()
            .map(|&b| Pair::new(a, b))
            .find(|p| !used.contains(&p.key()))
    })
}
