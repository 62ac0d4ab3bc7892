//! League engine: pure operations over the aggregate [`League`] value.
//!
//! Mutating operations take the current aggregate and return a new one
//! (`Err` means nothing changed); views borrow and never mutate.
//!
//! [`League`]: crate::models::League

mod bracket;
mod group;
mod hall_of_fame;
mod roster;
mod seeding;
mod setup;
mod standings;

pub use bracket::{build_bracket, record_playoff_result};
pub use group::{can_close_group, clear_group_result, close_group, record_group_result};
pub use hall_of_fame::{finished_tournaments, hall_of_fame, FinishedTournament, HallOfFameRow};
pub use roster::{add_player, rename_player, set_player_active};
pub use seeding::{clear_seed_override, current_seeds, resolve_seeds, set_seed_slot};
pub use setup::{create_tournament, round_robin_pairs};
pub use standings::{compute_standings, StandingsRow};
