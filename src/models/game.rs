//! Match data structures: group matches (fixed 2-game split) and playoff matches (best-of-3).

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Playoff bracket slot this match occupies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "semifinal1")]
    Semifinal1,
    #[serde(rename = "semifinal2")]
    Semifinal2,
    #[serde(rename = "final")]
    Final,
}

/// A group-stage meeting: two players, always decided as a 2-game split.
///
/// While `done` is false both win counts are 0. Once done, `wins_a + wins_b == 2`
/// (2-0, 1-1, or 0-2).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMatch {
    pub id: MatchId,
    #[serde(rename = "a")]
    pub player_a: PlayerId,
    #[serde(rename = "b")]
    pub player_b: PlayerId,
    pub wins_a: u8,
    pub wins_b: u8,
    pub done: bool,
}

impl GroupMatch {
    /// A fresh, unplayed meeting between two players.
    pub fn new(player_a: PlayerId, player_b: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_a,
            player_b,
            wins_a: 0,
            wins_b: 0,
            done: false,
        }
    }

    /// True if this match is between the same unordered pair as `(x, y)`.
    pub fn same_pair(&self, x: PlayerId, y: PlayerId) -> bool {
        (self.player_a == x && self.player_b == y) || (self.player_a == y && self.player_b == x)
    }
}

/// A playoff match (best-of-3): done iff one side has 2 wins; 2-2 is unreachable.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayoffMatch {
    pub id: MatchId,
    pub phase: Phase,
    #[serde(rename = "a")]
    pub player_a: PlayerId,
    #[serde(rename = "b")]
    pub player_b: PlayerId,
    pub wins_a: u8,
    pub wins_b: u8,
    pub done: bool,
}

impl PlayoffMatch {
    pub fn new(phase: Phase, player_a: PlayerId, player_b: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase,
            player_a,
            player_b,
            wins_a: 0,
            wins_b: 0,
            done: false,
        }
    }

    /// The side with 2 game wins, if any. A match without a winner is not done.
    pub fn winner(&self) -> Option<PlayerId> {
        if self.wins_a == 2 {
            Some(self.player_a)
        } else if self.wins_b == 2 {
            Some(self.player_b)
        } else {
            None
        }
    }

    /// The losing side of a decided match.
    pub fn loser(&self) -> Option<PlayerId> {
        if self.wins_a == 2 {
            Some(self.player_b)
        } else if self.wins_b == 2 {
            Some(self.player_a)
        } else {
            None
        }
    }

    /// True if this match is between the same unordered pair as `(x, y)`.
    pub fn same_pair(&self, x: PlayerId, y: PlayerId) -> bool {
        (self.player_a == x && self.player_b == y) || (self.player_a == y && self.player_b == x)
    }
}

/// Whether the final's participants are settled yet.
///
/// The stored final match carries a provisional pair until both semifinals are
/// decided; engine code goes through this tagged view instead of trusting the
/// stored pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FinalPairing {
    /// At least one semifinal has no winner yet.
    Unresolved,
    /// Both semifinal winners, in bracket order (sf1 winner first).
    Resolved(PlayerId, PlayerId),
}
