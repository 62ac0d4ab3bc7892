//! Tournament creation: participant validation and round-robin schedule generation.

use crate::models::{Format, GroupMatch, League, LeagueError, PlayerId, Stage, Tournament};
use chrono::{NaiveDate, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// All unordered pairings `{i, j}` with `i < j` in input order, double-loop
/// order: (0,1), (0,2), ..., (0,n-1), (1,2), ... Exactly n(n-1)/2 pairs.
pub fn round_robin_pairs(ids: &[PlayerId]) -> Vec<(PlayerId, PlayerId)> {
    let mut pairs = Vec::with_capacity(ids.len() * ids.len().saturating_sub(1) / 2);
    for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            pairs.push((ids[i], ids[j]));
        }
    }
    pairs
}

/// Create a tournament in the group stage with its full round-robin schedule.
///
/// Requires a non-empty name and at least 4 distinct roster players. The
/// participant list is fixed for the tournament's lifetime.
pub fn create_tournament(
    league: &League,
    name: &str,
    date: NaiveDate,
    format: Format,
    participant_ids: &[PlayerId],
) -> Result<League, LeagueError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LeagueError::EmptyName);
    }
    if participant_ids.len() < 4 {
        return Err(LeagueError::InvalidParticipants);
    }
    let distinct: HashSet<PlayerId> = participant_ids.iter().copied().collect();
    if distinct.len() != participant_ids.len() {
        return Err(LeagueError::InvalidParticipants);
    }
    if let Some(&unknown) = participant_ids.iter().find(|id| league.player(**id).is_none()) {
        return Err(LeagueError::PlayerNotFound(unknown));
    }

    let group_matches = round_robin_pairs(participant_ids)
        .into_iter()
        .map(|(a, b)| GroupMatch::new(a, b))
        .collect();

    let tournament = Tournament {
        id: Uuid::new_v4(),
        name: name.to_string(),
        date,
        format,
        participant_ids: participant_ids.to_vec(),
        stage: Stage::Group,
        group_matches,
        playoff_matches: Vec::new(),
        seed_override: None,
        winner_id: None,
        created_at: Utc::now().timestamp_millis(),
    };

    let mut next = league.clone();
    next.tournaments.push(tournament);
    Ok(next)
}
