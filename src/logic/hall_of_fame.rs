//! Hall of fame: career leaderboard and the list of finished tournaments.
//! Pure read projections, recomputed from scratch on every call.

use crate::models::{Phase, Player, PlayerId, Stage, Tournament, TournamentId};
use chrono::NaiveDate;
use serde::Serialize;

/// Career totals for one player across all finished tournaments.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallOfFameRow {
    pub id: PlayerId,
    pub name: String,
    /// Tournaments won.
    pub titles: u32,
    /// Finals played, won or lost.
    pub finals_appearances: u32,
    /// Semifinal slots reached.
    pub top4_appearances: u32,
}

/// A finished tournament with its podium, for the history view.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishedTournament {
    pub id: TournamentId,
    pub name: String,
    pub date: NaiveDate,
    pub champion_id: PlayerId,
    pub champion: String,
    pub runner_up_id: PlayerId,
    pub runner_up: String,
}

/// Only tournaments that actually finished count; anything abandoned
/// mid-playoffs contributes nothing.
fn podium(t: &Tournament) -> Option<(PlayerId, PlayerId)> {
    if t.stage != Stage::Finished {
        return None;
    }
    let winner = t.winner_id?;
    let runner_up = t.playoff(Phase::Final)?.loser()?;
    Some((winner, runner_up))
}

/// Career leaderboard over all finished tournaments, one row per roster
/// player. Sorted by titles, then finals appearances, then top-4
/// appearances (all descending), then name ascending.
pub fn hall_of_fame(players: &[Player], tournaments: &[Tournament]) -> Vec<HallOfFameRow> {
    let mut rows: Vec<HallOfFameRow> = players
        .iter()
        .map(|p| HallOfFameRow {
            id: p.id,
            name: p.name.clone(),
            titles: 0,
            finals_appearances: 0,
            top4_appearances: 0,
        })
        .collect();

    fn bump(rows: &mut [HallOfFameRow], id: PlayerId, f: impl FnOnce(&mut HallOfFameRow)) {
        if let Some(row) = rows.iter_mut().find(|r| r.id == id) {
            f(row);
        }
    }

    for t in tournaments {
        let Some((champion, runner_up)) = podium(t) else {
            continue;
        };
        bump(&mut rows, champion, |r| r.titles += 1);
        for id in [champion, runner_up] {
            bump(&mut rows, id, |r| r.finals_appearances += 1);
        }
        for phase in [Phase::Semifinal1, Phase::Semifinal2] {
            if let Some(m) = t.playoff(phase) {
                for id in [m.player_a, m.player_b] {
                    bump(&mut rows, id, |r| r.top4_appearances += 1);
                }
            }
        }
    }

    rows.sort_by(|x, y| {
        y.titles
            .cmp(&x.titles)
            .then_with(|| y.finals_appearances.cmp(&x.finals_appearances))
            .then_with(|| y.top4_appearances.cmp(&x.top4_appearances))
            .then_with(|| x.name.to_lowercase().cmp(&y.name.to_lowercase()))
            .then_with(|| x.name.cmp(&y.name))
    });
    rows
}

/// Finished tournaments in chronological order (play date, then creation
/// time), with champion and runner-up names attached.
pub fn finished_tournaments(
    players: &[Player],
    tournaments: &[Tournament],
) -> Vec<FinishedTournament> {
    let name_of = |id: PlayerId| {
        players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    };
    let mut finished: Vec<(&Tournament, PlayerId, PlayerId)> = tournaments
        .iter()
        .filter_map(|t| podium(t).map(|(c, r)| (t, c, r)))
        .collect();
    finished.sort_by_key(|(t, _, _)| (t.date, t.created_at));
    finished
        .into_iter()
        .map(|(t, champion_id, runner_up_id)| FinishedTournament {
            id: t.id,
            name: t.name.clone(),
            date: t.date,
            champion_id,
            champion: name_of(champion_id),
            runner_up_id,
            runner_up: name_of(runner_up_id),
        })
        .collect()
}
