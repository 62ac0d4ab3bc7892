//! Tournament, its stage, and the engine error type.

use crate::models::game::{FinalPairing, GroupMatch, MatchId, Phase, PlayoffMatch};
use crate::models::player::PlayerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during league operations. An error always means the
/// prior aggregate state is unchanged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// A name was empty after trimming.
    EmptyName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Player id not found in the roster (or not a participant of the tournament).
    PlayerNotFound(PlayerId),
    /// Tournament id not found.
    TournamentNotFound(TournamentId),
    /// Match id not found within the tournament.
    MatchNotFound(MatchId),
    /// Fewer than 4 participants, or a duplicate participant id.
    InvalidParticipants,
    /// Win counts outside 0-2, group total != 2, or a playoff 2-2.
    InvalidScore,
    /// The tournament's stage does not allow this action.
    InvalidStage,
    /// Group stage cannot be closed while matches remain unfinished.
    GroupStageUnfinished,
    /// Seed slot index outside 0..4.
    InvalidSeedSlot,
    /// A persisted document failed to decode or violated a model invariant.
    InvalidDocument(String),
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::EmptyName => write!(f, "Name must not be empty"),
            LeagueError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            LeagueError::PlayerNotFound(_) => write!(f, "Player not found"),
            LeagueError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            LeagueError::MatchNotFound(_) => write!(f, "Match not found"),
            LeagueError::InvalidParticipants => {
                write!(f, "Need at least 4 distinct participants")
            }
            LeagueError::InvalidScore => write!(f, "Invalid score for this match"),
            LeagueError::InvalidStage => write!(f, "Invalid stage for this action"),
            LeagueError::GroupStageUnfinished => {
                write!(f, "All group matches must be finished first")
            }
            LeagueError::InvalidSeedSlot => write!(f, "Seed slot must be 1-4"),
            LeagueError::InvalidDocument(msg) => write!(f, "Invalid document: {}", msg),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Limited format played in the group stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Format {
    #[serde(rename = "group-draft")]
    GroupDraft,
    #[serde(rename = "group-sealed")]
    GroupSealed,
}

/// Current phase of a tournament. Strictly forward: group, then playoffs,
/// then finished. The stored value is derived from match completion (see
/// [`Tournament::refresh_stage`]), never set independently.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Group,
    Playoffs,
    Finished,
}

/// A single tournament: round-robin group stage, then a 4-player bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Day the tournament is played (YYYY-MM-DD on the wire).
    pub date: NaiveDate,
    pub format: Format,
    /// Fixed at creation: ordered, no duplicates, length >= 4.
    pub participant_ids: Vec<PlayerId>,
    pub stage: Stage,
    pub group_matches: Vec<GroupMatch>,
    /// Empty during the group stage; exactly 3 matches once the bracket exists.
    pub playoff_matches: Vec<PlayoffMatch>,
    /// Manual Top-4, seed 1 first. Always 4 distinct participant ids when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_override: Option<[PlayerId; 4]>,
    /// Set iff `stage == Finished`; derived from the final match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<PlayerId>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Tournament {
    pub fn is_participant(&self, id: PlayerId) -> bool {
        self.participant_ids.contains(&id)
    }

    pub fn group_match(&self, id: MatchId) -> Option<&GroupMatch> {
        self.group_matches.iter().find(|m| m.id == id)
    }

    pub fn group_match_mut(&mut self, id: MatchId) -> Option<&mut GroupMatch> {
        self.group_matches.iter_mut().find(|m| m.id == id)
    }

    pub fn playoff_match_mut(&mut self, id: MatchId) -> Option<&mut PlayoffMatch> {
        self.playoff_matches.iter_mut().find(|m| m.id == id)
    }

    /// The bracket match in the given slot, if the bracket exists.
    pub fn playoff(&self, phase: Phase) -> Option<&PlayoffMatch> {
        self.playoff_matches.iter().find(|m| m.phase == phase)
    }

    fn playoff_mut(&mut self, phase: Phase) -> Option<&mut PlayoffMatch> {
        self.playoff_matches.iter_mut().find(|m| m.phase == phase)
    }

    /// Tagged view of the final's participants: resolved only once both
    /// semifinals have a winner. The stored final pair is provisional until then.
    pub fn final_pairing(&self) -> FinalPairing {
        let w1 = self.playoff(Phase::Semifinal1).and_then(|m| m.winner());
        let w2 = self.playoff(Phase::Semifinal2).and_then(|m| m.winner());
        match (w1, w2) {
            (Some(a), Some(b)) => FinalPairing::Resolved(a, b),
            _ => FinalPairing::Unresolved,
        }
    }

    /// Rewrite the final's pair to the semifinal winners once both are known.
    /// An unchanged pair keeps any score already entered; a changed pair resets
    /// the final to 0-0 undone (its old score belonged to an invalidated pairing).
    pub fn propagate_final(&mut self) {
        let pairing = self.final_pairing();
        if let FinalPairing::Resolved(w1, w2) = pairing {
            if let Some(fin) = self.playoff_mut(Phase::Final) {
                if !fin.same_pair(w1, w2) {
                    fin.player_a = w1;
                    fin.player_b = w2;
                    fin.wins_a = 0;
                    fin.wins_b = 0;
                    fin.done = false;
                }
            }
        }
    }

    /// Recompute `stage` and `winner_id` from match completion.
    ///
    /// No bracket means group stage; a bracket with an undecided final means
    /// playoffs; a decided final means finished with its winner. Undoing the
    /// final's result therefore reverts the tournament to playoffs.
    pub fn refresh_stage(&mut self) {
        let final_state = self.playoff(Phase::Final).map(|m| (m.done, m.winner()));
        match final_state {
            None => {
                self.stage = Stage::Group;
                self.winner_id = None;
            }
            Some((true, Some(w))) => {
                self.stage = Stage::Finished;
                self.winner_id = Some(w);
            }
            Some(_) => {
                self.stage = Stage::Playoffs;
                self.winner_id = None;
            }
        }
    }
}
