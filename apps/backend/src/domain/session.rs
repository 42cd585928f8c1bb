use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::phase::Phase;
use crate::domain::player::{Player, PlayerId};
use crate::domain::role::PlayerRole;

/// Per-session configuration, fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    /// Players may claim the Leader role while readying up.
    pub can_claim_leader: bool,
    /// Players may claim the Insider role while readying up.
    pub can_claim_insider: bool,
    /// Players may claim the Common role while readying up.
    pub can_claim_common: bool,
    /// Guess time limit in seconds. A hint for clients; expiry is signaled
    /// by the leader via TIME_UP, never measured here.
    pub guess_time_limit: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            can_claim_leader: true,
            can_claim_insider: false,
            can_claim_common: false,
            guess_time_limit: 5,
        }
    }
}

/// One in-progress game, keyed by its short join code.
///
/// Owned by the registry: created on CREATE, destroyed when the player map
/// becomes empty.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub code: String,
    /// Members by player id. A `BTreeMap` so projections list players in a
    /// stable order.
    pub players: BTreeMap<PlayerId, Player>,
    pub phase: Phase,
    /// Present only after roles have been assigned since the last reset.
    pub secret_word: Option<String>,
    pub settings: GameSettings,
    pub last_activity: OffsetDateTime,
    /// Stamped when the session enters PLAYING.
    pub play_start: Option<OffsetDateTime>,
}

impl GameSession {
    /// New empty session in WAITING.
    pub fn new(code: String, settings: GameSettings, now: OffsetDateTime) -> Self {
        Self {
            code,
            players: BTreeMap::new(),
            phase: Phase::Waiting,
            secret_word: None,
            settings,
            last_activity: now,
            play_start: None,
        }
    }

    /// Refresh the last-activity stamp.
    pub fn touch(&mut self, now: OffsetDateTime) {
        self.last_activity = now;
    }

    /// The member currently holding `role`, if any.
    pub fn role_holder(&self, role: PlayerRole) -> Option<&Player> {
        self.players.values().find(|p| p.role == Some(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_allow_only_leader_claims() {
        let settings = GameSettings::default();
        assert!(settings.can_claim_leader);
        assert!(!settings.can_claim_insider);
        assert!(!settings.can_claim_common);
        assert_eq!(settings.guess_time_limit, 5);
    }

    #[test]
    fn settings_deserialize_with_partial_fields() {
        let settings: GameSettings =
            serde_json::from_str(r#"{"canClaimInsider":true}"#).unwrap();
        assert!(settings.can_claim_leader);
        assert!(settings.can_claim_insider);
        assert_eq!(settings.guess_time_limit, 5);
    }

    #[test]
    fn new_session_starts_waiting_and_empty() {
        let session = GameSession::new(
            "AB12C".to_string(),
            GameSettings::default(),
            OffsetDateTime::UNIX_EPOCH,
        );
        assert_eq!(session.phase, Phase::Waiting);
        assert!(session.players.is_empty());
        assert!(session.secret_word.is_none());
        assert!(session.play_start.is_none());
    }
}
