//! Integration tests for the group table: points, diff, and tie-breaks.

use chrono::NaiveDate;
use draft_league_web::{
    add_player, compute_standings, create_tournament, record_group_result, Format, League,
    PlayerId, TournamentId,
};

fn league_with_players(names: &[&str]) -> League {
    let mut league = League::default();
    for name in names {
        league = add_player(&league, name).unwrap();
    }
    league
}

fn player_ids(league: &League) -> Vec<PlayerId> {
    league.players.iter().map(|p| p.id).collect()
}

fn create(league: &League, participants: &[PlayerId]) -> (League, TournamentId) {
    let next = create_tournament(
        league,
        "League Night",
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        Format::GroupSealed,
        participants,
    )
    .unwrap();
    let id = next.tournaments.last().unwrap().id;
    (next, id)
}

/// Record a 2-0 for whichever side of each group match comes first in `order`.
fn sweep_by_order(mut league: League, tid: TournamentId, order: &[PlayerId]) -> League {
    let matches: Vec<_> = league.tournament(tid).unwrap().group_matches.clone();
    for m in matches {
        let rank = |id: PlayerId| order.iter().position(|&x| x == id).unwrap();
        let (wins_a, wins_b) = if rank(m.player_a) < rank(m.player_b) {
            (2, 0)
        } else {
            (0, 2)
        };
        league = record_group_result(&league, tid, m.id, wins_a, wins_b).unwrap();
    }
    league
}

#[test]
fn empty_table_ranks_by_name_alone() {
    let league = league_with_players(&["dee", "Ann", "cid", "Ben"]);
    let ids = player_ids(&league);
    let (league, tid) = create(&league, &ids);

    let rows = compute_standings(&league.players, league.tournament(tid).unwrap());
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Ann", "Ben", "cid", "dee"]);
    for row in &rows {
        assert_eq!(row.points, 0);
        assert_eq!(row.games_for, 0);
        assert_eq!(row.games_against, 0);
        assert_eq!(row.diff, 0);
    }
}

#[test]
fn standings_are_deterministic() {
    let league = league_with_players(&["Ann", "Ben", "Cid", "Dee"]);
    let ids = player_ids(&league);
    let (league, tid) = create(&league, &ids);
    let league = sweep_by_order(league, tid, &ids);

    let t = league.tournament(tid).unwrap();
    let first = compute_standings(&league.players, t);
    let second = compute_standings(&league.players, t);
    assert_eq!(first, second);
}

/// The literal fixture: Ann beats everyone 2-0, Ben beats Cid and Dee, Cid
/// beats Dee. Points are game wins, so the table is 6/4/2/0.
#[test]
fn alphabetical_sweep_produces_exact_table() {
    let league = league_with_players(&["Ann", "Ben", "Cid", "Dee"]);
    let ids = player_ids(&league);
    let (league, tid) = create(&league, &ids);
    let league = sweep_by_order(league, tid, &ids);

    let rows = compute_standings(&league.players, league.tournament(tid).unwrap());
    let table: Vec<(&str, u32, u32, u32, i32)> = rows
        .iter()
        .map(|r| (r.name.as_str(), r.points, r.games_for, r.games_against, r.diff))
        .collect();
    assert_eq!(
        table,
        vec![
            ("Ann", 6, 6, 0, 6),
            ("Ben", 4, 4, 2, 2),
            ("Cid", 2, 2, 4, -2),
            ("Dee", 0, 0, 6, -6),
        ]
    );
}

#[test]
fn a_draw_awards_one_point_to_each_side() {
    let league = league_with_players(&["Ann", "Ben", "Cid", "Dee"]);
    let ids = player_ids(&league);
    let (league, tid) = create(&league, &ids);
    let mid = league.tournament(tid).unwrap().group_matches[0].id; // Ann vs Ben
    let league = record_group_result(&league, tid, mid, 1, 1).unwrap();

    let rows = compute_standings(&league.players, league.tournament(tid).unwrap());
    let ann = rows.iter().find(|r| r.name == "Ann").unwrap();
    let ben = rows.iter().find(|r| r.name == "Ben").unwrap();
    assert_eq!((ann.points, ann.games_for, ann.games_against), (1, 1, 1));
    assert_eq!((ben.points, ben.games_for, ben.games_against), (1, 1, 1));
}

/// With unfinished matches in the mix, equal points can carry different
/// diffs; the better diff ranks higher.
#[test]
fn partial_table_breaks_point_ties_by_diff() {
    let league = league_with_players(&["Ann", "Ben", "Cid", "Dee"]);
    let ids = player_ids(&league);
    let (league, tid) = create(&league, &ids);

    // Only Ann's wins over Ben and Cid are recorded. Ben and Cid sit at
    // 0 points with diff -2; Dee has played nothing and sits at diff 0.
    let t = league.tournament(tid).unwrap();
    let ann_ben = t.group_matches.iter().find(|m| m.same_pair(ids[0], ids[1])).unwrap().id;
    let ann_cid = t.group_matches.iter().find(|m| m.same_pair(ids[0], ids[2])).unwrap().id;
    let league = record_group_result(&league, tid, ann_ben, 2, 0).unwrap();
    let league = record_group_result(&league, tid, ann_cid, 2, 0).unwrap();

    let rows = compute_standings(&league.players, league.tournament(tid).unwrap());
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Ann", "Dee", "Ben", "Cid"]);
    assert_eq!(rows[1].diff, 0);
    assert_eq!(rows[2].diff, -2);
}

#[test]
fn unfinished_matches_contribute_nothing() {
    let league = league_with_players(&["Ann", "Ben", "Cid", "Dee"]);
    let ids = player_ids(&league);
    let (league, tid) = create(&league, &ids);
    let mid = league.tournament(tid).unwrap().group_matches[0].id;

    let before = compute_standings(&league.players, league.tournament(tid).unwrap());
    // Record and immediately clear: the table must be unchanged.
    let league = record_group_result(&league, tid, mid, 2, 0).unwrap();
    let league = draft_league_web::clear_group_result(&league, tid, mid).unwrap();
    let after = compute_standings(&league.players, league.tournament(tid).unwrap());
    assert_eq!(before, after);
}
