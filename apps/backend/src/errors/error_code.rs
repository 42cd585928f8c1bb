//! Error codes for the Insider backend API.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses. Add new codes here; never pass ad-hoc strings
//! as error codes.

use core::fmt;

/// Centralized error codes for the Insider backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Player display name is blank or missing
    InvalidPlayerName,
    /// No session registered under the given code
    GameNotFound,
    /// Caller is not a member of any session
    PlayerNotInGame,
    /// Accusation target is not a member of the session
    AccusedNotFound,
    /// Session settings forbid self-claiming this role
    RoleNotClaimable,
    /// Operation reserved for the session leader
    LeaderOnly,

    // State machine conflicts
    /// Action is not legal in the session's current phase
    PhaseMismatch,
    /// Leader or Insider is already held by another player
    RoleTaken,
    /// Too few active players to fill the required roles
    NotEnoughPlayers,
    /// Action exists in the protocol but is not implemented
    UnsupportedAction,

    // System errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// The canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request validation
            Self::InvalidPlayerName => "INVALID_PLAYER_NAME",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotInGame => "PLAYER_NOT_IN_GAME",
            Self::AccusedNotFound => "ACCUSED_NOT_FOUND",
            Self::RoleNotClaimable => "ROLE_NOT_CLAIMABLE",
            Self::LeaderOnly => "LEADER_ONLY",

            // State machine conflicts
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::RoleTaken => "ROLE_TAKEN",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::UnsupportedAction => "UNSUPPORTED_ACTION",

            // System errors
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::InvalidPlayerName.as_str(), "INVALID_PLAYER_NAME");
        assert_eq!(ErrorCode::GameNotFound.as_str(), "GAME_NOT_FOUND");
        assert_eq!(ErrorCode::PlayerNotInGame.as_str(), "PLAYER_NOT_IN_GAME");
        assert_eq!(ErrorCode::AccusedNotFound.as_str(), "ACCUSED_NOT_FOUND");
        assert_eq!(ErrorCode::RoleNotClaimable.as_str(), "ROLE_NOT_CLAIMABLE");
        assert_eq!(ErrorCode::LeaderOnly.as_str(), "LEADER_ONLY");
        assert_eq!(ErrorCode::PhaseMismatch.as_str(), "PHASE_MISMATCH");
        assert_eq!(ErrorCode::RoleTaken.as_str(), "ROLE_TAKEN");
        assert_eq!(ErrorCode::NotEnoughPlayers.as_str(), "NOT_ENOUGH_PLAYERS");
        assert_eq!(ErrorCode::UnsupportedAction.as_str(), "UNSUPPORTED_ACTION");
        assert_eq!(ErrorCode::Internal.as_str(), "INTERNAL");
        assert_eq!(ErrorCode::ConfigError.as_str(), "CONFIG_ERROR");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::GameNotFound), "GAME_NOT_FOUND");
        assert_eq!(format!("{}", ErrorCode::PhaseMismatch), "PHASE_MISMATCH");
    }
}
