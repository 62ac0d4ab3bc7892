//! Data structures for the draft league: players, matches, tournaments, aggregate state.

mod game;
mod league;
mod player;
mod tournament;

pub use game::{FinalPairing, GroupMatch, MatchId, Phase, PlayoffMatch};
pub use league::League;
pub use player::{Player, PlayerId};
pub use tournament::{Format, LeagueError, Stage, Tournament, TournamentId};
