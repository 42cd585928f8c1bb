use crate::domain::role::PlayerRole;

/// Opaque, caller-supplied player identifier.
pub type PlayerId = String;

/// A member of one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Readied up for the current round.
    pub is_active: bool,
    pub role: Option<PlayerRole>,
    /// Current accusation, held as the accused player's id. Resolved against
    /// the session's player map at projection time; an id whose player has
    /// left simply no longer resolves.
    pub accused_player_id: Option<PlayerId>,
}

impl Player {
    /// Fresh member record: not ready, no role, no accusation.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_active: false,
            role: None,
            accused_player_id: None,
        }
    }
}
