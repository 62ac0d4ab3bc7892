//! Player data structure for the league roster.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// A player in the league roster. Players are never deleted, only deactivated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Inactive players are not suggested as defaults for new tournaments,
    /// but stay valid participants in existing ones.
    pub active: bool,
}

impl Player {
    /// Create a new active player with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            active: true,
        }
    }
}
