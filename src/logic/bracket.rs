//! Playoff bracket: construction from 4 seeds, best-of-3 score recording,
//! and propagation of semifinal winners into the final.

use crate::models::{
    League, LeagueError, MatchId, Phase, PlayerId, PlayoffMatch, Stage, TournamentId,
};

/// Build the 4-seed single-elimination bracket: semifinal 1 pairs seed 1
/// with seed 4, semifinal 2 pairs seed 2 with seed 3. The final starts with
/// a provisional (seed 1, seed 2) pair that the propagator rewrites once the
/// semifinals are decided; until then [`Tournament::final_pairing`] reports
/// it as unresolved.
///
/// [`Tournament::final_pairing`]: crate::models::Tournament::final_pairing
pub fn build_bracket(seeds: &[PlayerId; 4]) -> Vec<PlayoffMatch> {
    vec![
        PlayoffMatch::new(Phase::Semifinal1, seeds[0], seeds[3]),
        PlayoffMatch::new(Phase::Semifinal2, seeds[1], seeds[2]),
        PlayoffMatch::new(Phase::Final, seeds[0], seeds[1]),
    ]
}

/// Record a playoff score (best-of-3, so any of 0-0 up to 2-1; 2-2 is
/// unreachable and refused). The match is done exactly when a side reaches
/// 2 wins.
///
/// After the write, semifinal winners are propagated into the final and the
/// tournament's stage and winner are recomputed, so completing the final
/// finishes the tournament in the same update and undoing it (e.g. back to
/// 0-0 after a correction) reverts it to playoffs with no winner. Scores can
/// therefore still be corrected on a finished tournament.
pub fn record_playoff_result(
    league: &League,
    tournament_id: TournamentId,
    match_id: MatchId,
    wins_a: u8,
    wins_b: u8,
) -> Result<League, LeagueError> {
    let t = league
        .tournament(tournament_id)
        .ok_or(LeagueError::TournamentNotFound(tournament_id))?;
    if t.stage == Stage::Group {
        return Err(LeagueError::InvalidStage);
    }
    if !t.playoff_matches.iter().any(|m| m.id == match_id) {
        return Err(LeagueError::MatchNotFound(match_id));
    }
    if wins_a > 2 || wins_b > 2 || (wins_a == 2 && wins_b == 2) {
        return Err(LeagueError::InvalidScore);
    }
    let mut next = league.clone();
    if let Some(t) = next.tournament_mut(tournament_id) {
        if let Some(m) = t.playoff_match_mut(match_id) {
            m.wins_a = wins_a;
            m.wins_b = wins_b;
            m.done = wins_a == 2 || wins_b == 2;
        }
        t.propagate_final();
        t.refresh_stage();
    }
    Ok(next)
}
