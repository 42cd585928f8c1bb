use serde::{Deserialize, Serialize};

/// A player's role within one round.
///
/// At most one player per session holds `Leader` and at most one holds
/// `Insider` at any instant; any number may hold `Common`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerRole {
    /// Knows the word and moderates the round.
    Leader,
    /// Knows the word and must stay hidden.
    Insider,
    /// Guesses the word without knowing it.
    Common,
}
