//! Session lifecycle and game-flow service.
//!
//! One method per player-facing action. Every mutating method resolves the
//! caller through the registry, re-checks the action legality table for the
//! session's current phase, applies the transition under the session lock,
//! stamps last-activity, and returns the caller's view of the result.
//!
//! A rejected action leaves the session exactly as it was: validation runs
//! before the first write, including the role-assignment plan, which is
//! computed in full before any player record changes.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::domain::action::GameAction;
use crate::domain::assignment::plan_role_assignments;
use crate::domain::phase::Phase;
use crate::domain::player::Player;
use crate::domain::role::PlayerRole;
use crate::domain::session::{GameSession, GameSettings};
use crate::domain::snapshot::{self, GameSnapshot};
use crate::domain::words;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::infra::rng::GameRng;
use crate::repos::sessions::SessionRegistry;

/// Game domain service.
#[derive(Clone)]
pub struct GameService {
    registry: Arc<SessionRegistry>,
    rng: GameRng,
}

impl GameService {
    pub fn new(registry: Arc<SessionRegistry>, rng: GameRng) -> Self {
        Self { registry, rng }
    }

    /// Read-only view of the caller's session. A caller with no session gets
    /// a NO_GAME snapshot instead of an error. Never mutates.
    pub fn get_state(&self, player_id: &str) -> GameSnapshot {
        match self.registry.find_by_player(player_id) {
            Some(shared) => snapshot::project(&shared.lock(), player_id),
            None => snapshot::no_game(player_id, OffsetDateTime::now_utc()),
        }
    }

    /// Create a fresh session with the caller as its only member. A caller
    /// already in another session leaves it first.
    pub fn create(
        &self,
        player_id: &str,
        player_name: &str,
        settings: Option<GameSettings>,
    ) -> Result<GameSnapshot, DomainError> {
        require_player_name(player_name)?;
        let host = Player::new(player_id, player_name);
        let shared = self.registry.create(
            &self.rng,
            host,
            settings.unwrap_or_default(),
            OffsetDateTime::now_utc(),
        );
        Ok(snapshot::project(&shared.lock(), player_id))
    }

    /// Join the session registered under `code`. Joining a session the
    /// caller is already in is a no-op; otherwise any prior membership is
    /// dropped and the caller starts over as a fresh, un-readied member.
    pub fn join(
        &self,
        player_id: &str,
        player_name: &str,
        code: &str,
    ) -> Result<GameSnapshot, DomainError> {
        require_player_name(player_name)?;
        let player = Player::new(player_id, player_name);
        let (shared, _already_member) = self
            .registry
            .join(player, code, OffsetDateTime::now_utc())
            .ok_or_else(|| {
                DomainError::invalid_input(
                    ErrorCode::GameNotFound,
                    format!("No game found with code {code}."),
                )
            })?;
        Ok(snapshot::project(&shared.lock(), player_id))
    }

    /// Leave the current session, if any; an empty session is destroyed.
    /// Never fails — the returned snapshot reflects that the caller is no
    /// longer in a game.
    pub fn leave(&self, player_id: &str) -> GameSnapshot {
        self.registry.remove_player(player_id);
        self.get_state(player_id)
    }

    /// Ready up, optionally claiming a role. Claims are checked against the
    /// session settings; Leader and Insider additionally require that no
    /// other player already holds the role.
    pub fn set_ready(
        &self,
        player_id: &str,
        claimed_role: Option<PlayerRole>,
    ) -> Result<GameSnapshot, DomainError> {
        self.with_member(player_id, |session| {
            if session.phase != Phase::Waiting {
                return Err(DomainError::invalid_state(
                    ErrorCode::PhaseMismatch,
                    "The game is not waiting for players to ready-up.",
                ));
            }
            match claimed_role {
                Some(PlayerRole::Leader) => {
                    if !session.settings.can_claim_leader {
                        return Err(DomainError::invalid_input(
                            ErrorCode::RoleNotClaimable,
                            "Not allowed to claim Leader role.",
                        ));
                    }
                    if holder_other_than(session, PlayerRole::Leader, player_id) {
                        return Err(DomainError::invalid_state(
                            ErrorCode::RoleTaken,
                            "There is already a Leader.",
                        ));
                    }
                }
                Some(PlayerRole::Insider) => {
                    if !session.settings.can_claim_insider {
                        return Err(DomainError::invalid_input(
                            ErrorCode::RoleNotClaimable,
                            "Not allowed to claim Insider role.",
                        ));
                    }
                    if holder_other_than(session, PlayerRole::Insider, player_id) {
                        return Err(DomainError::invalid_state(
                            ErrorCode::RoleTaken,
                            "There is already an Insider.",
                        ));
                    }
                }
                Some(PlayerRole::Common) => {
                    if !session.settings.can_claim_common {
                        return Err(DomainError::invalid_input(
                            ErrorCode::RoleNotClaimable,
                            "Not allowed to claim Common role.",
                        ));
                    }
                }
                None => {}
            }
            if let Some(player) = session.players.get_mut(player_id) {
                player.role = claimed_role;
                player.is_active = true;
            }
            session.touch(OffsetDateTime::now_utc());
            Ok(snapshot::project(session, player_id))
        })
    }

    /// Withdraw readiness, dropping any claimed role. No phase gate:
    /// un-readying is accepted whatever the session is doing.
    pub fn set_not_ready(&self, player_id: &str) -> Result<GameSnapshot, DomainError> {
        self.with_member(player_id, |session| {
            if let Some(player) = session.players.get_mut(player_id) {
                player.role = None;
                player.is_active = false;
            }
            session.touch(OffsetDateTime::now_utc());
            Ok(snapshot::project(session, player_id))
        })
    }

    /// Put the session back into WAITING: clears every player's role,
    /// readiness, and accusation along with the secret word.
    pub fn reset(&self, player_id: &str) -> Result<GameSnapshot, DomainError> {
        self.with_member(player_id, |session| {
            require_action(
                session,
                GameAction::Reset,
                "Game cannot be cancelled in current status.",
            )?;
            for player in session.players.values_mut() {
                player.role = None;
                player.is_active = false;
                player.accused_player_id = None;
            }
            session.phase = Phase::Waiting;
            session.secret_word = None;
            session.touch(OffsetDateTime::now_utc());
            Ok(snapshot::project(session, player_id))
        })
    }

    /// Fill out the round's role set, draw the secret word, and move to
    /// PRE_GAME. The assignment plan is validated before anything is
    /// written; a failure leaves every player untouched.
    pub fn assign_roles(&self, player_id: &str) -> Result<GameSnapshot, DomainError> {
        self.with_member(player_id, |session| {
            require_action(
                session,
                GameAction::AssignRoles,
                "Roles cannot be assigned in current status.",
            )?;
            let plan = plan_role_assignments(&session.players, &self.rng)?;
            for (id, role) in plan {
                if let Some(player) = session.players.get_mut(&id) {
                    player.role = Some(role);
                }
            }
            session.secret_word = Some(words::pick_secret_word(&self.rng));
            session.phase = Phase::PreGame;
            session.touch(OffsetDateTime::now_utc());
            Ok(snapshot::project(session, player_id))
        })
    }

    /// Swap the secret word for a fresh draw. Leader only; phase unchanged.
    pub fn exchange_word(&self, player_id: &str) -> Result<GameSnapshot, DomainError> {
        self.with_member(player_id, |session| {
            if role_of(session, player_id) != Some(PlayerRole::Leader) {
                return Err(DomainError::invalid_input(
                    ErrorCode::LeaderOnly,
                    "Word can only be exchanged by the leader.",
                ));
            }
            require_action(
                session,
                GameAction::ExchangeWord,
                "Word cannot be exchanged in current status.",
            )?;
            session.secret_word = Some(words::pick_secret_word(&self.rng));
            session.touch(OffsetDateTime::now_utc());
            Ok(snapshot::project(session, player_id))
        })
    }

    /// Start the question round: PLAYING, with the play-start stamped.
    pub fn start(&self, player_id: &str) -> Result<GameSnapshot, DomainError> {
        self.with_member(player_id, |session| {
            require_action(
                session,
                GameAction::Start,
                "Game cannot be started in current status.",
            )?;
            let now = OffsetDateTime::now_utc();
            session.phase = Phase::Playing;
            session.play_start = Some(now);
            session.touch(now);
            Ok(snapshot::project(session, player_id))
        })
    }

    /// The leader confirms the word was guessed: on to FIND_INSIDER.
    pub fn word_guessed(&self, player_id: &str) -> Result<GameSnapshot, DomainError> {
        self.with_member(player_id, |session| {
            if role_of(session, player_id) != Some(PlayerRole::Leader) {
                return Err(DomainError::invalid_input(
                    ErrorCode::LeaderOnly,
                    "Only the leader can mark the word as guessed.",
                ));
            }
            require_action(
                session,
                GameAction::Guessed,
                "Word cannot be guessed in current status.",
            )?;
            session.phase = Phase::FindInsider;
            session.touch(OffsetDateTime::now_utc());
            Ok(snapshot::project(session, player_id))
        })
    }

    /// The leader declares the guess time expired: the round is LOST.
    pub fn time_up(&self, player_id: &str) -> Result<GameSnapshot, DomainError> {
        self.with_member(player_id, |session| {
            if role_of(session, player_id) != Some(PlayerRole::Leader) {
                return Err(DomainError::invalid_input(
                    ErrorCode::LeaderOnly,
                    "Only the leader can claim time is up.",
                ));
            }
            require_action(
                session,
                GameAction::TimeUp,
                "Time cannot be up in current status.",
            )?;
            session.phase = Phase::Lost;
            session.touch(OffsetDateTime::now_utc());
            Ok(snapshot::project(session, player_id))
        })
    }

    /// Accuse a fellow member of being the insider. Re-voting overwrites the
    /// previous accusation.
    pub fn vote_player(
        &self,
        player_id: &str,
        accused_player_id: &str,
    ) -> Result<GameSnapshot, DomainError> {
        self.with_member(player_id, |session| {
            require_action(
                session,
                GameAction::VotePlayer,
                "Accusations cannot be cast in current status.",
            )?;
            if !session.players.contains_key(accused_player_id) {
                return Err(DomainError::invalid_input(
                    ErrorCode::AccusedNotFound,
                    "The accused player does not exist.",
                ));
            }
            if let Some(player) = session.players.get_mut(player_id) {
                player.accused_player_id = Some(accused_player_id.to_string());
            }
            session.touch(OffsetDateTime::now_utc());
            Ok(snapshot::project(session, player_id))
        })
    }

    /// Close the voting window and move to SUMMARY. Shares the VOTE_PLAYER
    /// legality gate with casting a vote: both belong to the same window.
    pub fn complete_voting(&self, player_id: &str) -> Result<GameSnapshot, DomainError> {
        self.with_member(player_id, |session| {
            require_action(
                session,
                GameAction::VotePlayer,
                "Voting cannot be completed in current status.",
            )?;
            session.phase = Phase::Summary;
            session.touch(OffsetDateTime::now_utc());
            Ok(snapshot::project(session, player_id))
        })
    }

    /// END has never been implemented; it fails in every phase.
    pub fn end(&self, _player_id: &str) -> Result<GameSnapshot, DomainError> {
        Err(DomainError::invalid_state(
            ErrorCode::UnsupportedAction,
            "Ending a game doesn't work yet.",
        ))
    }

    /// Resolve the caller's session and run `f` with the session lock held.
    ///
    /// A registry binding that points at a session which no longer lists the
    /// caller is repaired (the binding is dropped) before the call fails.
    fn with_member<R>(
        &self,
        player_id: &str,
        f: impl FnOnce(&mut GameSession) -> Result<R, DomainError>,
    ) -> Result<R, DomainError> {
        let Some(shared) = self.registry.find_by_player(player_id) else {
            return Err(no_session_for_player());
        };
        let mut session = shared.lock();
        if !session.players.contains_key(player_id) {
            drop(session);
            self.registry.unbind_if_stale(player_id);
            return Err(no_session_for_player());
        }
        f(&mut *session)
    }
}

fn no_session_for_player() -> DomainError {
    DomainError::invalid_input(ErrorCode::PlayerNotInGame, "No game found for player.")
}

fn require_player_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::invalid_input(
            ErrorCode::InvalidPlayerName,
            "Player name cannot be blank.",
        ));
    }
    Ok(())
}

fn require_action(
    session: &GameSession,
    action: GameAction,
    detail: &str,
) -> Result<(), DomainError> {
    if session.phase.allows(action) {
        Ok(())
    } else {
        Err(DomainError::invalid_state(ErrorCode::PhaseMismatch, detail))
    }
}

fn role_of(session: &GameSession, player_id: &str) -> Option<PlayerRole> {
    session.players.get(player_id).and_then(|p| p.role)
}

/// Whether a player other than `player_id` already holds `role`.
fn holder_other_than(session: &GameSession, role: PlayerRole, player_id: &str) -> bool {
    session
        .players
        .values()
        .any(|p| p.role == Some(role) && p.id != player_id)
}
