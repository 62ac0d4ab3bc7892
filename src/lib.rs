//! Draft league web app: library with models and the tournament engine.

pub mod logic;
pub mod models;

pub use logic::{
    add_player, can_close_group, clear_group_result, clear_seed_override, close_group,
    compute_standings, create_tournament, current_seeds, finished_tournaments, hall_of_fame,
    record_group_result, record_playoff_result, rename_player, resolve_seeds, round_robin_pairs,
    set_player_active, set_seed_slot, FinishedTournament, HallOfFameRow, StandingsRow,
};
pub use models::{
    FinalPairing, Format, GroupMatch, League, LeagueError, MatchId, Phase, Player, PlayerId,
    PlayoffMatch, Stage, Tournament, TournamentId,
};
