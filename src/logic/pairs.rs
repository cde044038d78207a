//! Pair enumeration: every unordered two-player combination of a roster.

use crate::models::{Pair, Player};

/// All pairs `(roster[i], roster[j])` with `i < j`, `i` ascending then `j` ascending.
///
/// The order matters: schedule building is first-fit and consumes pairs in this order.
/// Rosters with fewer than two players yield nothing.
pub fn enumerate_pairs(roster: &[Player]) -> Vec<Pair> {
    let n = roster.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for (i, a) in roster.iter().enumerate() {
        for b in &roster[i + 1..] {
            pairs.push(Pair::new(a.id, b.id));
        }
    }
    pairs
}
