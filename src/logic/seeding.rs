//! Top-4 seeding: standings-derived by default, manual override with
//! collision-free slot editing.

use crate::logic::standings::{compute_standings, StandingsRow};
use crate::models::{League, LeagueError, PlayerId, Stage, TournamentId};

/// The 4 bracket seeds, best first.
///
/// A present override is used verbatim when its 4 entries are distinct;
/// otherwise the top 4 standings rows decide. Returns `None` only if fewer
/// than 4 candidates exist, which the >= 4 participant rule rules out for
/// well-formed tournaments.
pub fn resolve_seeds(
    standings: &[StandingsRow],
    seed_override: Option<&[PlayerId; 4]>,
) -> Option<[PlayerId; 4]> {
    if let Some(ovr) = seed_override {
        let distinct = (0..4).all(|i| (i + 1..4).all(|j| ovr[i] != ovr[j]));
        if distinct {
            return Some(*ovr);
        }
    }
    if standings.len() < 4 {
        return None;
    }
    Some([standings[0].id, standings[1].id, standings[2].id, standings[3].id])
}

/// Resolved seeds for a tournament as it stands right now.
pub fn current_seeds(league: &League, tournament_id: TournamentId) -> Option<[PlayerId; 4]> {
    let t = league.tournament(tournament_id)?;
    let standings = compute_standings(&league.players, t);
    resolve_seeds(&standings, t.seed_override.as_ref())
}

/// Manually place a participant into one seed slot (0-based), storing the
/// result as the tournament's override.
///
/// The edit starts from the current override, or from the standings-derived
/// Top-4 when none exists. If the chosen player already occupies another
/// slot, that slot is refilled with the first participant (in participant
/// order) not used by any seed, so the stored override always holds 4
/// distinct participants and the editor's other choices stay put.
pub fn set_seed_slot(
    league: &League,
    tournament_id: TournamentId,
    slot: usize,
    player_id: PlayerId,
) -> Result<League, LeagueError> {
    let t = league
        .tournament(tournament_id)
        .ok_or(LeagueError::TournamentNotFound(tournament_id))?;
    if t.stage != Stage::Group {
        return Err(LeagueError::InvalidStage);
    }
    if slot >= 4 {
        return Err(LeagueError::InvalidSeedSlot);
    }
    if !t.is_participant(player_id) {
        return Err(LeagueError::PlayerNotFound(player_id));
    }

    let standings = compute_standings(&league.players, t);
    let mut seeds = match resolve_seeds(&standings, t.seed_override.as_ref()) {
        Some(s) => s,
        None => return Err(LeagueError::InvalidParticipants),
    };

    let displaced = (0..4).find(|&i| i != slot && seeds[i] == player_id);
    seeds[slot] = player_id;
    if let Some(i) = displaced {
        let replacement = t
            .participant_ids
            .iter()
            .copied()
            .find(|id| !seeds.contains(id));
        match replacement {
            Some(id) => seeds[i] = id,
            // Three distinct ids are in use at this point, so a >= 4
            // participant list always has a replacement.
            None => return Err(LeagueError::InvalidParticipants),
        }
    }

    let mut next = league.clone();
    if let Some(t) = next.tournament_mut(tournament_id) {
        t.seed_override = Some(seeds);
    }
    Ok(next)
}

/// Drop the manual override, returning seeding to the standings-derived Top-4.
pub fn clear_seed_override(
    league: &League,
    tournament_id: TournamentId,
) -> Result<League, LeagueError> {
    let t = league
        .tournament(tournament_id)
        .ok_or(LeagueError::TournamentNotFound(tournament_id))?;
    if t.stage != Stage::Group {
        return Err(LeagueError::InvalidStage);
    }
    let mut next = league.clone();
    if let Some(t) = next.tournament_mut(tournament_id) {
        t.seed_override = None;
    }
    Ok(next)
}
