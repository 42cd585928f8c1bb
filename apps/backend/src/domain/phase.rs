use serde::{Deserialize, Serialize};

use crate::domain::action::GameAction;

/// Session progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Sentinel for "caller has no session"; never stored in the registry.
    NoGame,
    /// Session created, players readying up.
    Waiting,
    /// Roles assigned and word drawn; the leader may still exchange it.
    PreGame,
    /// Question round in progress.
    Playing,
    /// Word guessed in time; players vote for the suspected insider.
    FindInsider,
    /// Voting closed, results available.
    Summary,
    /// Time ran out before the word was guessed.
    Lost,
}

impl Phase {
    /// Actions that may be submitted while a session is in this phase.
    ///
    /// Clients consult this to decide which verbs to expose; the service
    /// re-checks it before applying any mutating action. Every phase has an
    /// entry, even if empty.
    pub const fn legal_actions(self) -> &'static [GameAction] {
        match self {
            Phase::NoGame => &[],
            Phase::Waiting => &[
                GameAction::Ready,
                GameAction::Reset,
                GameAction::AssignRoles,
                GameAction::End,
            ],
            Phase::PreGame => &[
                GameAction::Reset,
                GameAction::ExchangeWord,
                GameAction::Start,
                GameAction::End,
            ],
            Phase::Playing => &[
                GameAction::Reset,
                GameAction::Guessed,
                GameAction::TimeUp,
                GameAction::End,
            ],
            Phase::FindInsider => &[
                GameAction::Reset,
                GameAction::VotePlayer,
                GameAction::CompleteVoting,
                GameAction::End,
            ],
            Phase::Summary => &[GameAction::Reset, GameAction::End],
            Phase::Lost => &[GameAction::Reset, GameAction::End],
        }
    }

    /// Whether `action` is legal in this phase.
    pub fn allows(self, action: GameAction) -> bool {
        self.legal_actions().contains(&action)
    }
}
