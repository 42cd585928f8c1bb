//! Session membership lifecycle: create, join, leave, ready-up, and the
//! registry invariants behind them.

mod support;

use backend::domain::phase::Phase;
use backend::domain::role::PlayerRole;
use backend::domain::session::GameSettings;
use backend::errors::domain::DomainError;
use backend::errors::ErrorCode;

#[test]
fn unknown_player_gets_a_no_game_snapshot() {
    let state = support::test_state();
    let snapshot = state.games().get_state("nobody");

    assert_eq!(snapshot.status, Phase::NoGame);
    assert_eq!(snapshot.code, "");
    assert!(snapshot.players.is_empty());
    assert!(snapshot.actions.is_empty());
}

#[test]
fn create_rejects_blank_names() {
    let state = support::test_state();
    let err = state.games().create("p1", "   ", None).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidPlayerName);
    assert_eq!(err.detail(), "Player name cannot be blank.");
    // Nothing was created for the caller.
    assert_eq!(state.games().get_state("p1").status, Phase::NoGame);
}

#[test]
fn create_starts_a_waiting_session_with_the_host() {
    let state = support::test_state();
    let snapshot = state.games().create("p1", "jim", None).unwrap();

    assert_eq!(snapshot.status, Phase::Waiting);
    assert_eq!(snapshot.code.len(), 5);
    assert_eq!(snapshot.players.len(), 1);
    assert_eq!(snapshot.players[0].name, "jim");
    assert!(!snapshot.players[0].is_active);
    assert!(snapshot.your_role.is_none());
}

#[test]
fn create_honors_custom_settings() {
    let state = support::test_state();
    let settings = GameSettings {
        can_claim_insider: true,
        guess_time_limit: 10,
        ..GameSettings::default()
    };
    let snapshot = state.games().create("p1", "jim", Some(settings.clone())).unwrap();
    assert_eq!(snapshot.game_settings, settings);
}

#[test]
fn join_rejects_unknown_codes() {
    let state = support::test_state();
    let err = state.games().join("p1", "jim", "ZZZZZ").unwrap_err();
    match err {
        DomainError::InvalidInput { code, detail } => {
            assert_eq!(code, ErrorCode::GameNotFound);
            assert_eq!(detail, "No game found with code ZZZZZ.");
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn joining_twice_is_idempotent() {
    let state = support::test_state();
    let code = support::setup_session(&state, ("p1", "jim"), &[("p2", "bob")]);
    let games = state.games();

    // Ready up, then join the same session again: the membership (and the
    // readied state) must survive unchanged.
    games.set_ready("p2", None).unwrap();
    let again = games.join("p2", "bob", &code).unwrap();

    assert_eq!(again.players.len(), 2);
    let bob = again.players.iter().find(|p| p.id == "p2").unwrap();
    assert!(bob.is_active);
}

#[test]
fn joining_another_session_moves_the_player() {
    let state = support::test_state();
    let games = state.games();
    let first = support::setup_session(&state, ("p1", "jim"), &[("p2", "bob")]);
    let second = support::setup_session(&state, ("p3", "ann"), &[]);

    let snapshot = games.join("p2", "bob", &second).unwrap();

    assert_eq!(snapshot.code, second);
    assert_eq!(snapshot.players.len(), 2);
    // The first session no longer lists bob.
    let remaining = games.get_state("p1");
    assert_eq!(remaining.code, first);
    assert_eq!(remaining.players.len(), 1);
}

#[test]
fn creating_again_moves_the_host_and_reaps_empty_sessions() {
    let state = support::test_state();
    let games = state.games();
    let first = games.create("p1", "jim", None).unwrap().code;

    let second = games.create("p1", "jim", None).unwrap().code;

    assert_ne!(first, second);
    // The first session lost its only member and was destroyed.
    let err = games.join("p2", "bob", &first).unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotFound);
}

#[test]
fn leaving_the_last_member_destroys_the_session() {
    let state = support::test_state();
    let games = state.games();
    let code = games.create("p1", "jim", None).unwrap().code;

    let snapshot = games.leave("p1");
    assert_eq!(snapshot.status, Phase::NoGame);

    let err = games.join("p2", "bob", &code).unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotFound);
}

#[test]
fn leaving_without_a_session_is_a_no_op() {
    let state = support::test_state();
    let snapshot = state.games().leave("ghost");
    assert_eq!(snapshot.status, Phase::NoGame);
}

#[test]
fn leaver_disappears_from_other_players_view() {
    let state = support::test_state();
    let games = state.games();
    support::setup_session(&state, ("p1", "jim"), &[("p2", "bob")]);

    games.leave("p2");

    let snapshot = games.get_state("p1");
    assert_eq!(snapshot.players.len(), 1);
    assert_eq!(snapshot.players[0].id, "p1");
}

#[test]
fn ready_marks_active_and_records_the_claim() {
    let state = support::test_state();
    support::setup_session(&state, ("p1", "jim"), &[]);

    let snapshot = state
        .games()
        .set_ready("p1", Some(PlayerRole::Leader))
        .unwrap();

    assert_eq!(snapshot.your_role, Some(PlayerRole::Leader));
    assert!(snapshot.players[0].is_active);
}

#[test]
fn second_leader_claim_is_rejected() {
    let state = support::test_state();
    support::setup_session(&state, ("p1", "jim"), &[("p2", "bob")]);
    let games = state.games();
    games.set_ready("p1", Some(PlayerRole::Leader)).unwrap();

    let err = games.set_ready("p2", Some(PlayerRole::Leader)).unwrap_err();
    match err {
        DomainError::InvalidState { code, detail } => {
            assert_eq!(code, ErrorCode::RoleTaken);
            assert_eq!(detail, "There is already a Leader.");
        }
        other => panic!("expected InvalidState, got {other:?}"),
    }
}

#[test]
fn re_claiming_your_own_leader_role_is_allowed() {
    let state = support::test_state();
    support::setup_session(&state, ("p1", "jim"), &[]);
    let games = state.games();
    games.set_ready("p1", Some(PlayerRole::Leader)).unwrap();
    let snapshot = games.set_ready("p1", Some(PlayerRole::Leader)).unwrap();
    assert_eq!(snapshot.your_role, Some(PlayerRole::Leader));
}

#[test]
fn insider_claims_require_the_setting() {
    let state = support::test_state();
    let games = state.games();
    games.create("p1", "jim", None).unwrap();

    let err = games.set_ready("p1", Some(PlayerRole::Insider)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoleNotClaimable);
    assert_eq!(err.detail(), "Not allowed to claim Insider role.");

    // With the setting enabled, the first claim lands and the second is
    // blocked by exclusivity.
    let settings = GameSettings {
        can_claim_insider: true,
        ..GameSettings::default()
    };
    let code = games.create("p2", "bob", Some(settings)).unwrap().code;
    games.join("p3", "ann", &code).unwrap();
    games.set_ready("p2", Some(PlayerRole::Insider)).unwrap();
    let err = games.set_ready("p3", Some(PlayerRole::Insider)).unwrap_err();
    assert_eq!(err.detail(), "There is already an Insider.");
}

#[test]
fn common_claims_require_the_setting_but_not_exclusivity() {
    let state = support::test_state();
    let games = state.games();
    let settings = GameSettings {
        can_claim_common: true,
        ..GameSettings::default()
    };
    let code = games.create("p1", "jim", Some(settings)).unwrap().code;
    games.join("p2", "bob", &code).unwrap();

    games.set_ready("p1", Some(PlayerRole::Common)).unwrap();
    games.set_ready("p2", Some(PlayerRole::Common)).unwrap();

    let err = state
        .games()
        .create("p9", "zed", None)
        .and_then(|snap| {
            state.games().join("p8", "joe", &snap.code)?;
            state.games().set_ready("p8", Some(PlayerRole::Common))
        })
        .unwrap_err();
    assert_eq!(err.detail(), "Not allowed to claim Common role.");
}

#[test]
fn ready_is_gated_to_waiting() {
    let state = support::test_state();
    support::setup_session(&state, ("p1", "jim"), &[("p2", "bob"), ("p3", "ann")]);
    support::ready_and_assign(&state, "p1", &["p2", "p3"]);

    let err = state.games().set_ready("p2", None).unwrap_err();
    assert_eq!(err.code(), ErrorCode::PhaseMismatch);
    assert_eq!(err.detail(), "The game is not waiting for players to ready-up.");
}

#[test]
fn un_readying_works_in_any_phase() {
    let state = support::test_state();
    support::setup_session(&state, ("p1", "jim"), &[("p2", "bob"), ("p3", "ann")]);
    support::ready_and_assign(&state, "p1", &["p2", "p3"]);

    // PRE_GAME, yet un-readying still lands.
    let snapshot = state.games().set_not_ready("p2").unwrap();
    let bob = snapshot.players.iter().find(|p| p.id == "p2").unwrap();
    assert!(!bob.is_active);
    assert!(snapshot.your_role.is_none());
}

#[test]
fn stale_bindings_self_heal_on_the_next_action() {
    let state = support::test_state();
    let games = state.games();
    support::setup_session(&state, ("p1", "jim"), &[("p2", "bob")]);
    // Simulate a session that dropped p2 without unbinding.
    let shared = state.registry().find_by_player("p2").unwrap();
    shared.lock().players.remove("p2");

    let err = games.set_ready("p2", None).unwrap_err();
    assert_eq!(err.code(), ErrorCode::PlayerNotInGame);
    assert_eq!(err.detail(), "No game found for player.");
    // The binding was repaired: the next read sees NO_GAME.
    assert_eq!(games.get_state("p2").status, Phase::NoGame);
}

#[test]
fn concurrent_joins_on_distinct_sessions_do_not_interfere() {
    let state = support::test_state();
    let games = state.games();
    let code_a = games.create("a-host", "Anna", None).unwrap().code;
    let code_b = games.create("b-host", "Bert", None).unwrap().code;

    std::thread::scope(|scope| {
        let state_a = state.clone();
        let join_a = code_a.clone();
        scope.spawn(move || {
            for i in 0..32 {
                state_a
                    .games()
                    .join(&format!("a-{i}"), "worker", &join_a)
                    .unwrap();
            }
        });
        let state_b = state.clone();
        let join_b = code_b.clone();
        scope.spawn(move || {
            for i in 0..32 {
                state_b
                    .games()
                    .join(&format!("b-{i}"), "worker", &join_b)
                    .unwrap();
            }
        });
    });

    assert_eq!(games.get_state("a-host").players.len(), 33);
    assert_eq!(games.get_state("b-host").players.len(), 33);
}

#[test]
fn concurrent_leader_claims_produce_exactly_one_leader() {
    let state = support::test_state();
    let games = state.games();
    let code = games.create("host", "Host", None).unwrap().code;
    for i in 0..4 {
        games.join(&format!("p{i}"), "player", &code).unwrap();
    }

    std::thread::scope(|scope| {
        for i in 0..4 {
            let racer = state.clone();
            scope.spawn(move || {
                let _ = racer.games().set_ready(&format!("p{i}"), Some(PlayerRole::Leader));
            });
        }
    });

    let leaders = (0..4)
        .filter(|i| games.get_state(&format!("p{i}")).your_role == Some(PlayerRole::Leader))
        .count();
    assert_eq!(leaders, 1);
}
