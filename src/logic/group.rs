//! Group stage: recording 2-game splits and closing the stage into playoffs.

use crate::logic::bracket::build_bracket;
use crate::logic::seeding::resolve_seeds;
use crate::logic::standings::compute_standings;
use crate::models::{League, LeagueError, MatchId, Stage, Tournament, TournamentId};

/// Record a group match result. Only 2-0, 1-1, and 0-2 splits are valid;
/// anything else is refused with the prior score untouched.
pub fn record_group_result(
    league: &League,
    tournament_id: TournamentId,
    match_id: MatchId,
    wins_a: u8,
    wins_b: u8,
) -> Result<League, LeagueError> {
    let t = league
        .tournament(tournament_id)
        .ok_or(LeagueError::TournamentNotFound(tournament_id))?;
    if t.stage != Stage::Group {
        return Err(LeagueError::InvalidStage);
    }
    if t.group_match(match_id).is_none() {
        return Err(LeagueError::MatchNotFound(match_id));
    }
    if wins_a > 2 || wins_b > 2 || wins_a + wins_b != 2 {
        return Err(LeagueError::InvalidScore);
    }
    let mut next = league.clone();
    if let Some(m) = next
        .tournament_mut(tournament_id)
        .and_then(|t| t.group_match_mut(match_id))
    {
        m.wins_a = wins_a;
        m.wins_b = wins_b;
        m.done = true;
    }
    Ok(next)
}

/// Reset a group match to unplayed (0-0, not done), so a mis-entered split
/// can be corrected. Only possible while the group stage is open.
pub fn clear_group_result(
    league: &League,
    tournament_id: TournamentId,
    match_id: MatchId,
) -> Result<League, LeagueError> {
    let t = league
        .tournament(tournament_id)
        .ok_or(LeagueError::TournamentNotFound(tournament_id))?;
    if t.stage != Stage::Group {
        return Err(LeagueError::InvalidStage);
    }
    if t.group_match(match_id).is_none() {
        return Err(LeagueError::MatchNotFound(match_id));
    }
    let mut next = league.clone();
    if let Some(m) = next
        .tournament_mut(tournament_id)
        .and_then(|t| t.group_match_mut(match_id))
    {
        m.wins_a = 0;
        m.wins_b = 0;
        m.done = false;
    }
    Ok(next)
}

/// True iff the tournament is in the group stage with every match decided.
pub fn can_close_group(tournament: &Tournament) -> bool {
    tournament.stage == Stage::Group && tournament.group_matches.iter().all(|m| m.done)
}

/// Close the group stage: resolve the Top-4 seeds and build the bracket.
///
/// Refused while any group match is unfinished, leaving stage and bracket
/// unchanged. On success the tournament enters the playoffs.
pub fn close_group(league: &League, tournament_id: TournamentId) -> Result<League, LeagueError> {
    let t = league
        .tournament(tournament_id)
        .ok_or(LeagueError::TournamentNotFound(tournament_id))?;
    if t.stage != Stage::Group {
        return Err(LeagueError::InvalidStage);
    }
    if !can_close_group(t) {
        return Err(LeagueError::GroupStageUnfinished);
    }
    let standings = compute_standings(&league.players, t);
    let seeds = resolve_seeds(&standings, t.seed_override.as_ref())
        .ok_or(LeagueError::InvalidParticipants)?;

    let mut next = league.clone();
    if let Some(t) = next.tournament_mut(tournament_id) {
        t.playoff_matches = build_bracket(&seeds);
        t.refresh_stage();
    }
    Ok(next)
}
