use serde::{Deserialize, Serialize};

/// The closed set of caller-initiated operations that may mutate a session.
///
/// Values cross the wire under their SCREAMING_SNAKE_CASE names; `route`
/// gives the path segment the HTTP layer mounts each action under.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameAction {
    Create,
    Join,
    Ready,
    Reset,
    AssignRoles,
    ExchangeWord,
    Start,
    Guessed,
    TimeUp,
    VotePlayer,
    CompleteVoting,
    End,
}

impl GameAction {
    /// Route segment for this action.
    pub const fn route(self) -> &'static str {
        match self {
            GameAction::Create => "create",
            GameAction::Join => "join",
            GameAction::Ready => "ready",
            GameAction::Reset => "reset",
            GameAction::AssignRoles => "assignRoles",
            GameAction::ExchangeWord => "exchangeWord",
            GameAction::Start => "start",
            GameAction::Guessed => "guessed",
            GameAction::TimeUp => "timeUp",
            GameAction::VotePlayer => "votePlayer",
            GameAction::CompleteVoting => "complete",
            GameAction::End => "end",
        }
    }
}
