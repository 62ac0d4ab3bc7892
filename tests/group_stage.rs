//! Integration tests for tournament creation, the round-robin schedule, and
//! group result recording.

use chrono::NaiveDate;
use draft_league_web::{
    add_player, can_close_group, clear_group_result, close_group, create_tournament,
    record_group_result, round_robin_pairs, Format, League, LeagueError, PlayerId, Stage,
    TournamentId,
};
use std::collections::HashSet;
use uuid::Uuid;

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

fn a_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
}

fn create(league: &League, participants: &[PlayerId]) -> (League, TournamentId) {
    let next = create_tournament(
        league,
        "Friday Night Draft",
        a_date(),
        Format::GroupDraft,
        participants,
    )
    .unwrap();
    let id = next.tournaments.last().unwrap().id;
    (next, id)
}

#[test]
fn creation_requires_at_least_4_participants() {
    let league = league_with_players(&["Ann", "Ben", "Cid"]);
    let ids = player_ids(&league);
    let result = create_tournament(&league, "Too small", a_date(), Format::GroupDraft, &ids);
    assert_eq!(result.unwrap_err(), LeagueError::InvalidParticipants);
}

#[test]
fn creation_rejects_duplicate_participants() {
    let league = league_with_players(&["Ann", "Ben", "Cid", "Dee"]);
    let mut ids = player_ids(&league);
    ids[3] = ids[0];
    let result = create_tournament(&league, "Dup", a_date(), Format::GroupDraft, &ids);
    assert_eq!(result.unwrap_err(), LeagueError::InvalidParticipants);
}

#[test]
fn creation_rejects_unknown_participant() {
    let league = league_with_players(&["Ann", "Ben", "Cid", "Dee"]);
    let mut ids = player_ids(&league);
    let stranger = Uuid::new_v4();
    ids[2] = stranger;
    let result = create_tournament(&league, "Stranger", a_date(), Format::GroupDraft, &ids);
    assert_eq!(result.unwrap_err(), LeagueError::PlayerNotFound(stranger));
}

#[test]
fn creation_rejects_empty_name() {
    let league = league_with_players(&["Ann", "Ben", "Cid", "Dee"]);
    let ids = player_ids(&league);
    let result = create_tournament(&league, "   ", a_date(), Format::GroupSealed, &ids);
    assert_eq!(result.unwrap_err(), LeagueError::EmptyName);
}

#[test]
fn roster_rejects_empty_and_duplicate_names() {
    let league = league_with_players(&["Ann"]);
    assert_eq!(add_player(&league, "  ").unwrap_err(), LeagueError::EmptyName);
    assert_eq!(
        add_player(&league, "ann").unwrap_err(),
        LeagueError::DuplicatePlayerName
    );
}

#[test]
fn schedule_has_every_pair_exactly_once() {
    for n in 4..=8 {
        let names: Vec<String> = (0..n).map(|i| format!("P{i}")).collect();
        let name_refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let league = league_with_players(&name_refs);
        let ids = player_ids(&league);
        let (league, tid) = create(&league, &ids);
        let t = league.tournament(tid).unwrap();

        assert_eq!(t.group_matches.len(), n * (n - 1) / 2);
        let mut pairs = HashSet::new();
        for m in &t.group_matches {
            assert_ne!(m.player_a, m.player_b);
            assert!(!m.done);
            assert_eq!((m.wins_a, m.wins_b), (0, 0));
            let key = if m.player_a < m.player_b {
                (m.player_a, m.player_b)
            } else {
                (m.player_b, m.player_a)
            };
            assert!(pairs.insert(key), "pair generated twice");
        }
        // Every unordered pair of participants is covered.
        assert_eq!(pairs.len(), n * (n - 1) / 2);
    }
}

#[test]
fn schedule_uses_double_loop_order() {
    let ids: Vec<PlayerId> = (0..4).map(|_| Uuid::new_v4()).collect();
    let pairs = round_robin_pairs(&ids);
    assert_eq!(
        pairs,
        vec![
            (ids[0], ids[1]),
            (ids[0], ids[2]),
            (ids[0], ids[3]),
            (ids[1], ids[2]),
            (ids[1], ids[3]),
            (ids[2], ids[3]),
        ]
    );
}

#[test]
fn recording_accepts_only_full_splits() {
    let league = league_with_players(&["Ann", "Ben", "Cid", "Dee"]);
    let ids = player_ids(&league);
    let (league, tid) = create(&league, &ids);
    let mid = league.tournament(tid).unwrap().group_matches[0].id;

    for (wins_a, wins_b) in [(2, 0), (1, 1), (0, 2)] {
        let next = record_group_result(&league, tid, mid, wins_a, wins_b).unwrap();
        let m = next.tournament(tid).unwrap().group_match(mid).unwrap();
        assert!(m.done);
        assert_eq!((m.wins_a, m.wins_b), (wins_a, wins_b));
    }

    for (wins_a, wins_b) in [(0, 0), (2, 1), (2, 2), (3, 0), (0, 3)] {
        let result = record_group_result(&league, tid, mid, wins_a, wins_b);
        assert_eq!(result.unwrap_err(), LeagueError::InvalidScore);
    }
}

#[test]
fn rejected_score_leaves_prior_result_in_place() {
    let league = league_with_players(&["Ann", "Ben", "Cid", "Dee"]);
    let ids = player_ids(&league);
    let (league, tid) = create(&league, &ids);
    let mid = league.tournament(tid).unwrap().group_matches[0].id;

    let league = record_group_result(&league, tid, mid, 2, 0).unwrap();
    assert!(record_group_result(&league, tid, mid, 2, 2).is_err());
    let m = league.tournament(tid).unwrap().group_match(mid).unwrap();
    assert_eq!((m.wins_a, m.wins_b, m.done), (2, 0, true));
}

#[test]
fn clearing_resets_a_match_to_unplayed() {
    let league = league_with_players(&["Ann", "Ben", "Cid", "Dee"]);
    let ids = player_ids(&league);
    let (league, tid) = create(&league, &ids);
    let mid = league.tournament(tid).unwrap().group_matches[0].id;

    let league = record_group_result(&league, tid, mid, 1, 1).unwrap();
    let league = clear_group_result(&league, tid, mid).unwrap();
    let m = league.tournament(tid).unwrap().group_match(mid).unwrap();
    assert_eq!((m.wins_a, m.wins_b, m.done), (0, 0, false));
}

#[test]
fn group_cannot_close_with_unfinished_matches() {
    let league = league_with_players(&["Ann", "Ben", "Cid", "Dee"]);
    let ids = player_ids(&league);
    let (mut league, tid) = create(&league, &ids);

    // Finish all but the last match.
    let match_ids: Vec<_> = league
        .tournament(tid)
        .unwrap()
        .group_matches
        .iter()
        .map(|m| m.id)
        .collect();
    for &mid in &match_ids[..match_ids.len() - 1] {
        league = record_group_result(&league, tid, mid, 2, 0).unwrap();
    }

    assert!(!can_close_group(league.tournament(tid).unwrap()));
    assert_eq!(
        close_group(&league, tid).unwrap_err(),
        LeagueError::GroupStageUnfinished
    );
    let t = league.tournament(tid).unwrap();
    assert_eq!(t.stage, Stage::Group);
    assert!(t.playoff_matches.is_empty());

    // Finishing the last match unlocks the transition.
    league = record_group_result(&league, tid, *match_ids.last().unwrap(), 0, 2).unwrap();
    assert!(can_close_group(league.tournament(tid).unwrap()));
    let league = close_group(&league, tid).unwrap();
    let t = league.tournament(tid).unwrap();
    assert_eq!(t.stage, Stage::Playoffs);
    assert_eq!(t.playoff_matches.len(), 3);
    league.validate().unwrap();
}

#[test]
fn group_results_are_frozen_after_close() {
    let league = league_with_players(&["Ann", "Ben", "Cid", "Dee"]);
    let ids = player_ids(&league);
    let (mut league, tid) = create(&league, &ids);
    let match_ids: Vec<_> = league
        .tournament(tid)
        .unwrap()
        .group_matches
        .iter()
        .map(|m| m.id)
        .collect();
    for &mid in &match_ids {
        league = record_group_result(&league, tid, mid, 2, 0).unwrap();
    }
    let league = close_group(&league, tid).unwrap();

    assert_eq!(
        record_group_result(&league, tid, match_ids[0], 0, 2).unwrap_err(),
        LeagueError::InvalidStage
    );
    assert_eq!(
        clear_group_result(&league, tid, match_ids[0]).unwrap_err(),
        LeagueError::InvalidStage
    );
    assert_eq!(close_group(&league, tid).unwrap_err(), LeagueError::InvalidStage);
}
