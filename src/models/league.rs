//! The aggregate root: full roster plus all tournaments.
//!
//! Every engine operation takes the current aggregate and returns a new one;
//! nothing else holds league state. Import re-validates the model invariants
//! and refuses the whole document on any violation, so a corrupt file can
//! never replace a good in-memory state.

use crate::models::game::Phase;
use crate::models::player::{Player, PlayerId};
use crate::models::tournament::{LeagueError, Stage, Tournament, TournamentId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Persisted/exchanged document and in-memory root of truth.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub players: Vec<Player>,
    pub tournaments: Vec<Tournament>,
}

impl League {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn tournament(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.iter().find(|t| t.id == id)
    }

    pub fn tournament_mut(&mut self, id: TournamentId) -> Option<&mut Tournament> {
        self.tournaments.iter_mut().find(|t| t.id == id)
    }

    /// Serialize the full document (export contract).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode and validate a persisted document. Any decode failure or
    /// invariant violation refuses the document; the caller keeps its state.
    pub fn from_json(data: &str) -> Result<League, LeagueError> {
        let league: League = serde_json::from_str(data)
            .map_err(|e| LeagueError::InvalidDocument(e.to_string()))?;
        league.validate()?;
        Ok(league)
    }

    /// Check every model invariant. Used on import; cheap enough to also run
    /// in tests after any sequence of operations.
    pub fn validate(&self) -> Result<(), LeagueError> {
        let mut player_ids = HashSet::new();
        for p in &self.players {
            if p.name.trim().is_empty() {
                return Err(LeagueError::InvalidDocument(format!(
                    "player {} has an empty name",
                    p.id
                )));
            }
            if !player_ids.insert(p.id) {
                return Err(LeagueError::InvalidDocument(format!(
                    "duplicate player id {}",
                    p.id
                )));
            }
        }

        let mut tournament_ids = HashSet::new();
        for t in &self.tournaments {
            if !tournament_ids.insert(t.id) {
                return Err(LeagueError::InvalidDocument(format!(
                    "duplicate tournament id {}",
                    t.id
                )));
            }
            self.validate_tournament(t, &player_ids)?;
        }
        Ok(())
    }

    fn validate_tournament(
        &self,
        t: &Tournament,
        player_ids: &HashSet<PlayerId>,
    ) -> Result<(), LeagueError> {
        let bad = |msg: String| Err(LeagueError::InvalidDocument(msg));

        if t.name.trim().is_empty() {
            return bad(format!("tournament {} has an empty name", t.id));
        }
        let n = t.participant_ids.len();
        if n < 4 {
            return bad(format!("tournament {} has fewer than 4 participants", t.id));
        }
        let participants: HashSet<PlayerId> = t.participant_ids.iter().copied().collect();
        if participants.len() != n {
            return bad(format!("tournament {} has duplicate participants", t.id));
        }
        if let Some(unknown) = t.participant_ids.iter().find(|id| !player_ids.contains(id)) {
            return bad(format!(
                "tournament {} references unknown player {}",
                t.id, unknown
            ));
        }

        // Group stage: exactly one match per unordered pair, valid 2-game splits.
        if t.group_matches.len() != n * (n - 1) / 2 {
            return bad(format!(
                "tournament {} has {} group matches, expected {}",
                t.id,
                t.group_matches.len(),
                n * (n - 1) / 2
            ));
        }
        let mut pairs = HashSet::new();
        for m in &t.group_matches {
            if m.player_a == m.player_b {
                return bad(format!("group match {} pairs a player with itself", m.id));
            }
            if !participants.contains(&m.player_a) || !participants.contains(&m.player_b) {
                return bad(format!("group match {} has a non-participant", m.id));
            }
            let key = if m.player_a < m.player_b {
                (m.player_a, m.player_b)
            } else {
                (m.player_b, m.player_a)
            };
            if !pairs.insert(key) {
                return bad(format!("duplicate group pairing in tournament {}", t.id));
            }
            if m.done {
                if m.wins_a > 2 || m.wins_b > 2 || m.wins_a + m.wins_b != 2 {
                    return bad(format!("group match {} has an invalid split", m.id));
                }
            } else if m.wins_a != 0 || m.wins_b != 0 {
                return bad(format!("unfinished group match {} has a score", m.id));
            }
        }

        // Playoffs: absent, or a full 3-match bracket with best-of-3 scores.
        if !t.playoff_matches.is_empty() {
            if t.playoff_matches.len() != 3 {
                return bad(format!("tournament {} has a partial bracket", t.id));
            }
            for phase in [Phase::Semifinal1, Phase::Semifinal2, Phase::Final] {
                if t.playoff_matches.iter().filter(|m| m.phase == phase).count() != 1 {
                    return bad(format!("tournament {} is missing a bracket slot", t.id));
                }
            }
            for m in &t.playoff_matches {
                if m.player_a == m.player_b {
                    return bad(format!("playoff match {} pairs a player with itself", m.id));
                }
                if !participants.contains(&m.player_a) || !participants.contains(&m.player_b) {
                    return bad(format!("playoff match {} has a non-participant", m.id));
                }
                if m.wins_a > 2 || m.wins_b > 2 || (m.wins_a == 2 && m.wins_b == 2) {
                    return bad(format!("playoff match {} has an invalid score", m.id));
                }
                if m.done != (m.wins_a == 2 || m.wins_b == 2) {
                    return bad(format!(
                        "playoff match {} done flag disagrees with its score",
                        m.id
                    ));
                }
            }
            // A resolved final must hold exactly the two semifinal winners.
            if let crate::models::game::FinalPairing::Resolved(w1, w2) = t.final_pairing() {
                let fin = t
                    .playoff(Phase::Final)
                    .ok_or_else(|| LeagueError::InvalidDocument("bracket without a final".into()))?;
                if !fin.same_pair(w1, w2) {
                    return bad(format!(
                        "tournament {} final does not pair the semifinal winners",
                        t.id
                    ));
                }
            }
        }

        if let Some(ovr) = &t.seed_override {
            let distinct: HashSet<PlayerId> = ovr.iter().copied().collect();
            if distinct.len() != 4 || ovr.iter().any(|id| !participants.contains(id)) {
                return bad(format!("tournament {} has an invalid seed override", t.id));
            }
        }

        // Stage and winner must agree with what the matches say.
        let mut derived = t.clone();
        derived.refresh_stage();
        if derived.stage != t.stage || derived.winner_id != t.winner_id {
            return bad(format!(
                "tournament {} stage/winner disagree with its matches",
                t.id
            ));
        }
        if (t.stage == Stage::Finished) != t.winner_id.is_some() {
            return bad(format!("tournament {} winner/stage mismatch", t.id));
        }
        Ok(())
    }
}
