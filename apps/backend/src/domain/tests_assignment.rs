#![cfg(test)]

use std::collections::BTreeMap;

use crate::domain::assignment::plan_role_assignments;
use crate::domain::player::{Player, PlayerId};
use crate::domain::role::PlayerRole;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::infra::rng::GameRng;

fn active_player(id: &str, role: Option<PlayerRole>) -> Player {
    let mut player = Player::new(id, format!("name-{id}"));
    player.is_active = true;
    player.role = role;
    player
}

fn roster(players: Vec<Player>) -> BTreeMap<PlayerId, Player> {
    players.into_iter().map(|p| (p.id.clone(), p)).collect()
}

fn count_role(plan: &[(PlayerId, PlayerRole)], role: PlayerRole) -> usize {
    plan.iter().filter(|(_, r)| *r == role).count()
}

#[test]
fn three_unassigned_actives_get_all_three_roles() {
    let players = roster(vec![
        active_player("p1", None),
        active_player("p2", None),
        active_player("p3", None),
    ]);

    let plan = plan_role_assignments(&players, &GameRng::new(Some(1))).unwrap();

    assert_eq!(plan.len(), 3);
    assert_eq!(count_role(&plan, PlayerRole::Leader), 1);
    assert_eq!(count_role(&plan, PlayerRole::Insider), 1);
    assert_eq!(count_role(&plan, PlayerRole::Common), 1);
}

#[test]
fn preassigned_leader_is_never_duplicated() {
    let players = roster(vec![
        active_player("p1", Some(PlayerRole::Leader)),
        active_player("p2", None),
        active_player("p3", None),
    ]);

    let plan = plan_role_assignments(&players, &GameRng::new(Some(2))).unwrap();

    // The plan only covers the two unassigned players.
    assert_eq!(plan.len(), 2);
    assert_eq!(count_role(&plan, PlayerRole::Leader), 0);
    assert_eq!(count_role(&plan, PlayerRole::Insider), 1);
    assert_eq!(count_role(&plan, PlayerRole::Common), 1);
}

#[test]
fn leftover_pool_members_become_common() {
    let players = roster(vec![
        active_player("p1", None),
        active_player("p2", None),
        active_player("p3", None),
        active_player("p4", None),
        active_player("p5", None),
    ]);

    let plan = plan_role_assignments(&players, &GameRng::new(Some(3))).unwrap();

    assert_eq!(plan.len(), 5);
    assert_eq!(count_role(&plan, PlayerRole::Leader), 1);
    assert_eq!(count_role(&plan, PlayerRole::Insider), 1);
    assert_eq!(count_role(&plan, PlayerRole::Common), 3);
}

#[test]
fn too_few_players_fails_with_not_enough_players() {
    let players = roster(vec![active_player("p1", None), active_player("p2", None)]);

    let err = plan_role_assignments(&players, &GameRng::new(Some(4))).unwrap_err();

    match err {
        DomainError::InvalidState { code, detail } => {
            assert_eq!(code, ErrorCode::NotEnoughPlayers);
            assert!(detail.contains("Not enough players"));
        }
        other => panic!("expected InvalidState, got {other:?}"),
    }
}

#[test]
fn inactive_players_are_ignored() {
    let mut idle = Player::new("idle", "Idle");
    idle.is_active = false;
    let players = roster(vec![
        active_player("p1", None),
        active_player("p2", None),
        active_player("p3", None),
        idle,
    ]);

    let plan = plan_role_assignments(&players, &GameRng::new(Some(5))).unwrap();

    assert_eq!(plan.len(), 3);
    assert!(plan.iter().all(|(id, _)| id != "idle"));
}

#[test]
fn preassigned_roles_shrink_the_required_pool() {
    // Leader and insider claimed: a single unassigned player suffices.
    let players = roster(vec![
        active_player("p1", Some(PlayerRole::Leader)),
        active_player("p2", Some(PlayerRole::Insider)),
        active_player("p3", None),
    ]);

    let plan = plan_role_assignments(&players, &GameRng::new(Some(6))).unwrap();

    assert_eq!(plan, vec![("p3".to_string(), PlayerRole::Common)]);
}

#[test]
fn surplus_claims_do_not_create_shortfall() {
    // Two commons already claimed; the owed count for COMMON goes negative,
    // which must not consume extra pool members.
    let players = roster(vec![
        active_player("p1", Some(PlayerRole::Common)),
        active_player("p2", Some(PlayerRole::Common)),
        active_player("p3", None),
        active_player("p4", None),
    ]);

    let plan = plan_role_assignments(&players, &GameRng::new(Some(7))).unwrap();

    assert_eq!(plan.len(), 2);
    assert_eq!(count_role(&plan, PlayerRole::Leader), 1);
    assert_eq!(count_role(&plan, PlayerRole::Insider), 1);
}

#[test]
fn same_seed_yields_same_plan() {
    let players = roster(vec![
        active_player("p1", None),
        active_player("p2", None),
        active_player("p3", None),
        active_player("p4", None),
    ]);

    let a = plan_role_assignments(&players, &GameRng::new(Some(99))).unwrap();
    let b = plan_role_assignments(&players, &GameRng::new(Some(99))).unwrap();
    assert_eq!(a, b);
}
