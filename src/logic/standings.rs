//! Group-stage standings: points are literal game wins, recomputed per call.

use crate::models::{Player, PlayerId, Tournament};
use serde::Serialize;

/// One row of the group table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub id: PlayerId,
    pub name: String,
    pub points: u32,
    pub games_for: u32,
    pub games_against: u32,
    pub diff: i32,
}

/// Compute the ranked group table for a tournament.
///
/// Every finished match awards each side its game wins as points, so a 1-1
/// draw gives one point to each. Unfinished matches contribute nothing;
/// partial tables are valid. Ordering is total: points desc, then game diff
/// desc, then name (case-insensitive) asc.
pub fn compute_standings(players: &[Player], tournament: &Tournament) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = tournament
        .participant_ids
        .iter()
        .map(|&id| StandingsRow {
            id,
            name: players
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            points: 0,
            games_for: 0,
            games_against: 0,
            diff: 0,
        })
        .collect();

    for m in tournament.group_matches.iter().filter(|m| m.done) {
        let (wins_a, wins_b) = (u32::from(m.wins_a), u32::from(m.wins_b));
        if let Some(row) = rows.iter_mut().find(|r| r.id == m.player_a) {
            row.points += wins_a;
            row.games_for += wins_a;
            row.games_against += wins_b;
        }
        if let Some(row) = rows.iter_mut().find(|r| r.id == m.player_b) {
            row.points += wins_b;
            row.games_for += wins_b;
            row.games_against += wins_a;
        }
    }
    for row in &mut rows {
        row.diff = row.games_for as i32 - row.games_against as i32;
    }

    rows.sort_by(|x, y| {
        y.points
            .cmp(&x.points)
            .then_with(|| y.diff.cmp(&x.diff))
            .then_with(|| x.name.to_lowercase().cmp(&y.name.to_lowercase()))
            .then_with(|| x.name.cmp(&y.name))
    });
    rows
}
