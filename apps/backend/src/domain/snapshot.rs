//! Player-visible projection of session state.
//!
//! Everything a client learns about a session flows through [`project`]:
//! per-player public fields, the role-filtered secret word, the legal-action
//! hint for the current phase, and the end-of-round summary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::action::GameAction;
use crate::domain::phase::Phase;
use crate::domain::player::Player;
use crate::domain::role::PlayerRole;
use crate::domain::session::{GameSession, GameSettings};

/// Fallback shown in a summary when no secret word was ever drawn.
const MISSING_WORD: &str = "NO WORD";
/// Tally bucket for active players who cast no accusation.
const NO_VOTE: &str = "no vote";

/// Public info about a single session member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPublic {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    /// Display name of whoever this player has accused, if the accused is
    /// still a member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accused_player_name: Option<String>,
}

/// End-of-round results, present only in SUMMARY and LOST.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub secret_word: String,
    /// Name of the player holding INSIDER, if any.
    pub insider_name: Option<String>,
    /// Votes per accused name among active players; active players without
    /// an accusation count under the "no vote" bucket.
    pub votes: BTreeMap<String, u32>,
}

/// The caller-specific view of a session returned by every operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub player_id: String,
    pub code: String,
    pub players: Vec<PlayerPublic>,
    pub status: Phase,
    pub game_settings: GameSettings,
    /// Legal actions for the current phase; a hint only, re-checked
    /// server-side on every call.
    pub actions: Vec<GameAction>,
    #[serde(with = "time::serde::rfc3339")]
    pub last_activity: OffsetDateTime,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub play_start_time: Option<OffsetDateTime>,
    /// Visible only to the leader and the insider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_role: Option<PlayerRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_summary: Option<GameSummary>,
}

/// Project `session` as seen by `viewer_id`.
pub fn project(session: &GameSession, viewer_id: &str) -> GameSnapshot {
    let viewer_role = session.players.get(viewer_id).and_then(|p| p.role);
    GameSnapshot {
        player_id: viewer_id.to_string(),
        code: session.code.clone(),
        players: session
            .players
            .values()
            .map(|p| public_player(session, p))
            .collect(),
        status: session.phase,
        game_settings: session.settings.clone(),
        actions: session.phase.legal_actions().to_vec(),
        last_activity: session.last_activity,
        play_start_time: session.play_start,
        secret_word: secret_word_for(session, viewer_role),
        your_role: viewer_role,
        game_summary: summarize(session),
    }
}

/// Snapshot for a caller with no session: NO_GAME, empty code, no members.
pub fn no_game(viewer_id: &str, now: OffsetDateTime) -> GameSnapshot {
    GameSnapshot {
        player_id: viewer_id.to_string(),
        code: String::new(),
        players: Vec::new(),
        status: Phase::NoGame,
        game_settings: GameSettings::default(),
        actions: Vec::new(),
        last_activity: now,
        play_start_time: None,
        secret_word: None,
        your_role: None,
        game_summary: None,
    }
}

fn public_player(session: &GameSession, player: &Player) -> PlayerPublic {
    let accused_player_name = player
        .accused_player_id
        .as_deref()
        .and_then(|id| session.players.get(id))
        .map(|accused| accused.name.clone());
    PlayerPublic {
        id: player.id.clone(),
        name: player.name.clone(),
        is_active: player.is_active,
        accused_player_name,
    }
}

fn secret_word_for(session: &GameSession, viewer_role: Option<PlayerRole>) -> Option<String> {
    match viewer_role {
        Some(PlayerRole::Insider) | Some(PlayerRole::Leader) => session.secret_word.clone(),
        _ => None,
    }
}

/// Build the end-of-round summary, or `None` outside SUMMARY/LOST.
///
/// Only active players are tallied: an inactive player's accusation is
/// ignored entirely, and an accusation whose target has left the session
/// counts under "no vote".
fn summarize(session: &GameSession) -> Option<GameSummary> {
    if !matches!(session.phase, Phase::Summary | Phase::Lost) {
        return None;
    }

    let insider_name = session
        .role_holder(PlayerRole::Insider)
        .map(|p| p.name.clone());

    let mut votes: BTreeMap<String, u32> = BTreeMap::new();
    for voter in session.players.values().filter(|p| p.is_active) {
        let bucket = voter
            .accused_player_id
            .as_deref()
            .and_then(|id| session.players.get(id))
            .map(|accused| accused.name.clone())
            .unwrap_or_else(|| NO_VOTE.to_string());
        *votes.entry(bucket).or_default() += 1;
    }

    Some(GameSummary {
        secret_word: session
            .secret_word
            .clone()
            .unwrap_or_else(|| MISSING_WORD.to_string()),
        insider_name,
        votes,
    })
}
