//! Roster operations: add, rename, activate/deactivate players.

use crate::models::{League, LeagueError, Player, PlayerId};

/// Add a player to the roster. Names are trimmed, must be non-empty, and are
/// unique case-insensitively.
pub fn add_player(league: &League, name: &str) -> Result<League, LeagueError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LeagueError::EmptyName);
    }
    if league
        .players
        .iter()
        .any(|p| p.name.eq_ignore_ascii_case(name))
    {
        return Err(LeagueError::DuplicatePlayerName);
    }
    let mut next = league.clone();
    next.players.push(Player::new(name));
    Ok(next)
}

/// Rename a player. The same name rules as [`add_player`] apply; renaming a
/// player to their own current name (case changes included) is allowed.
pub fn rename_player(
    league: &League,
    player_id: PlayerId,
    name: &str,
) -> Result<League, LeagueError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LeagueError::EmptyName);
    }
    if league.player(player_id).is_none() {
        return Err(LeagueError::PlayerNotFound(player_id));
    }
    if league
        .players
        .iter()
        .any(|p| p.id != player_id && p.name.eq_ignore_ascii_case(name))
    {
        return Err(LeagueError::DuplicatePlayerName);
    }
    let mut next = league.clone();
    if let Some(p) = next.players.iter_mut().find(|p| p.id == player_id) {
        p.name = name.to_string();
    }
    Ok(next)
}

/// Set a player's active flag. Inactive players stay valid participants in
/// existing tournaments; the flag only affects new-tournament suggestions.
pub fn set_player_active(
    league: &League,
    player_id: PlayerId,
    active: bool,
) -> Result<League, LeagueError> {
    if league.player(player_id).is_none() {
        return Err(LeagueError::PlayerNotFound(player_id));
    }
    let mut next = league.clone();
    if let Some(p) = next.players.iter_mut().find(|p| p.id == player_id) {
        p.active = active;
    }
    Ok(next)
}
