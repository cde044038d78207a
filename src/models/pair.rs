//! Teammate pairs and their order-independent key.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical, order-independent key for an unordered pair of players.
///
/// The two ids are stored sorted, so `(a, b)` and `(b, a)` produce the same key.
/// Displayed as the two sorted ids concatenated.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct PairKey(PlayerId, PlayerId);

impl PairKey {
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

/// Two players forming one team. Players are kept in roster order for display;
/// identity comparisons go through [`Pair::key`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub first: PlayerId,
    pub second: PlayerId,
}

impl Pair {
    pub fn new(first: PlayerId, second: PlayerId) -> Self {
        Self { first, second }
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(self.first, self.second)
    }

    pub fn players(&self) -> [PlayerId; 2] {
        [self.first, self.second]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.first == id || self.second == id
    }

    /// True if the two pairs have at least one player in common.
    pub fn overlaps(&self, other: &Pair) -> bool {
        self.contains(other.first) || self.contains(other.second)
    }
}
