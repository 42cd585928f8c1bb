#![cfg(test)]

use time::macros::datetime;

use crate::domain::phase::Phase;
use crate::domain::player::Player;
use crate::domain::role::PlayerRole;
use crate::domain::session::{GameSession, GameSettings};
use crate::domain::snapshot::{no_game, project};
use crate::domain::GameAction;

fn session_with(players: &[(&str, &str)]) -> GameSession {
    let mut session = GameSession::new(
        "AB12C".to_string(),
        GameSettings::default(),
        datetime!(2025-06-01 12:00 UTC),
    );
    for (id, name) in players {
        session
            .players
            .insert((*id).to_string(), Player::new(*id, *name));
    }
    session
}

fn set_role(session: &mut GameSession, id: &str, role: PlayerRole) {
    let player = session.players.get_mut(id).unwrap();
    player.role = Some(role);
    player.is_active = true;
}

fn set_vote(session: &mut GameSession, voter: &str, accused: &str) {
    let player = session.players.get_mut(voter).unwrap();
    player.is_active = true;
    player.accused_player_id = Some(accused.to_string());
}

#[test]
fn secret_word_is_visible_to_insider_and_leader_only() {
    let mut session = session_with(&[("p1", "jim"), ("p2", "bob"), ("p3", "ann")]);
    session.phase = Phase::PreGame;
    session.secret_word = Some("APPLE".to_string());
    set_role(&mut session, "p1", PlayerRole::Leader);
    set_role(&mut session, "p2", PlayerRole::Insider);
    set_role(&mut session, "p3", PlayerRole::Common);

    assert_eq!(project(&session, "p1").secret_word.as_deref(), Some("APPLE"));
    assert_eq!(project(&session, "p2").secret_word.as_deref(), Some("APPLE"));
    assert_eq!(project(&session, "p3").secret_word, None);
}

#[test]
fn viewer_without_role_sees_no_word_even_if_one_exists() {
    let mut session = session_with(&[("p1", "jim")]);
    session.secret_word = Some("APPLE".to_string());

    let snapshot = project(&session, "p1");
    assert_eq!(snapshot.secret_word, None);
    assert_eq!(snapshot.your_role, None);
}

#[test]
fn accusations_are_projected_by_name() {
    let mut session = session_with(&[("p1", "jim"), ("p2", "bob")]);
    session.phase = Phase::FindInsider;
    set_vote(&mut session, "p1", "p2");

    let snapshot = project(&session, "p1");
    let jim = snapshot.players.iter().find(|p| p.id == "p1").unwrap();
    assert_eq!(jim.accused_player_name.as_deref(), Some("bob"));
    let bob = snapshot.players.iter().find(|p| p.id == "p2").unwrap();
    assert_eq!(bob.accused_player_name, None);
}

#[test]
fn accusation_of_departed_player_projects_as_none() {
    let mut session = session_with(&[("p1", "jim")]);
    session.phase = Phase::Summary;
    set_vote(&mut session, "p1", "gone");

    let snapshot = project(&session, "p1");
    assert_eq!(snapshot.players[0].accused_player_name, None);
    // An unresolvable accusation falls into the "no vote" bucket.
    let summary = snapshot.game_summary.unwrap();
    assert_eq!(summary.votes.get("no vote"), Some(&1));
}

#[test]
fn summary_is_absent_outside_summary_and_lost() {
    let mut session = session_with(&[("p1", "jim")]);
    for phase in [Phase::Waiting, Phase::PreGame, Phase::Playing, Phase::FindInsider] {
        session.phase = phase;
        assert!(project(&session, "p1").game_summary.is_none(), "{phase:?}");
    }
    for phase in [Phase::Summary, Phase::Lost] {
        session.phase = phase;
        assert!(project(&session, "p1").game_summary.is_some(), "{phase:?}");
    }
}

#[test]
fn vote_tally_counts_active_accusers_only() {
    // Four actives: jim and bob accuse each other, ann accuses jim,
    // dot casts no vote.
    let mut session = session_with(&[
        ("p1", "jim"),
        ("p2", "bob"),
        ("p3", "ann"),
        ("p4", "dot"),
    ]);
    session.phase = Phase::Summary;
    session.secret_word = Some("APPLE".to_string());
    set_vote(&mut session, "p1", "p2");
    set_vote(&mut session, "p2", "p1");
    set_vote(&mut session, "p3", "p1");
    session.players.get_mut("p4").unwrap().is_active = true;

    let summary = project(&session, "p1").game_summary.unwrap();
    assert_eq!(summary.votes.get("jim"), Some(&2));
    assert_eq!(summary.votes.get("bob"), Some(&1));
    assert_eq!(summary.votes.get("no vote"), Some(&1));
    assert_eq!(summary.votes.len(), 3);
}

#[test]
fn inactive_players_are_excluded_from_the_tally() {
    let mut session = session_with(&[("p1", "jim"), ("p2", "bob")]);
    session.phase = Phase::Summary;
    set_vote(&mut session, "p1", "p2");
    // bob voted, then un-readied: his accusation must not count.
    session.players.get_mut("p2").unwrap().accused_player_id = Some("p1".to_string());
    session.players.get_mut("p2").unwrap().is_active = false;

    let summary = project(&session, "p1").game_summary.unwrap();
    assert_eq!(summary.votes.get("bob"), Some(&1));
    assert_eq!(summary.votes.get("jim"), None);
}

#[test]
fn summary_names_the_insider_and_falls_back_on_missing_word() {
    let mut session = session_with(&[("p1", "jim"), ("p2", "bob")]);
    session.phase = Phase::Lost;
    set_role(&mut session, "p2", PlayerRole::Insider);

    let summary = project(&session, "p1").game_summary.unwrap();
    assert_eq!(summary.insider_name.as_deref(), Some("bob"));
    assert_eq!(summary.secret_word, "NO WORD");
}

#[test]
fn actions_mirror_the_legality_table() {
    let mut session = session_with(&[("p1", "jim")]);
    session.phase = Phase::FindInsider;

    let snapshot = project(&session, "p1");
    assert_eq!(snapshot.actions, Phase::FindInsider.legal_actions().to_vec());
}

#[test]
fn no_game_snapshot_is_empty() {
    let snapshot = no_game("p9", datetime!(2025-06-01 12:00 UTC));
    assert_eq!(snapshot.status, Phase::NoGame);
    assert_eq!(snapshot.code, "");
    assert_eq!(snapshot.player_id, "p9");
    assert!(snapshot.players.is_empty());
    assert!(snapshot.actions.is_empty());
    assert!(snapshot.secret_word.is_none());
    assert!(snapshot.your_role.is_none());
    assert!(snapshot.game_summary.is_none());
}

#[test]
fn snapshot_serializes_with_camel_case_fields_and_wire_enums() {
    let mut session = session_with(&[("p1", "jim")]);
    session.phase = Phase::PreGame;
    set_role(&mut session, "p1", PlayerRole::Leader);
    session.secret_word = Some("APPLE".to_string());

    let json = serde_json::to_value(project(&session, "p1")).unwrap();
    assert_eq!(json["status"], "PRE_GAME");
    assert_eq!(json["yourRole"], "LEADER");
    assert_eq!(json["secretWord"], "APPLE");
    assert_eq!(json["gameSettings"]["canClaimLeader"], true);
    assert_eq!(json["players"][0]["isActive"], true);
    assert!(json["actions"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("EXCHANGE_WORD")));
    assert!(json["lastActivity"].as_str().unwrap().starts_with("2025-06-01T12:00:00"));
    // Absent options are omitted, not null.
    assert!(json.get("gameSummary").is_none());
    assert!(json.get("playStartTime").is_none());
}

#[test]
fn actions_survive_a_serde_round_trip() {
    let session = session_with(&[("p1", "jim")]);
    let snapshot = project(&session, "p1");
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: crate::domain::snapshot::GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.actions, vec![
        GameAction::Ready,
        GameAction::Reset,
        GameAction::AssignRoles,
        GameAction::End,
    ]);
    assert_eq!(back, snapshot);
}
