#![cfg(test)]

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::domain::assignment::plan_role_assignments;
use crate::domain::player::{Player, PlayerId};
use crate::domain::role::PlayerRole;
use crate::infra::rng::GameRng;

fn roster(
    unassigned: usize,
    preassigned: &[PlayerRole],
    inactive: usize,
) -> BTreeMap<PlayerId, Player> {
    let mut players = BTreeMap::new();
    for i in 0..unassigned {
        let id = format!("u{i}");
        let mut p = Player::new(id.clone(), format!("name-{id}"));
        p.is_active = true;
        players.insert(id, p);
    }
    for (i, role) in preassigned.iter().enumerate() {
        let id = format!("r{i}");
        let mut p = Player::new(id.clone(), format!("name-{id}"));
        p.is_active = true;
        p.role = Some(*role);
        players.insert(id, p);
    }
    for i in 0..inactive {
        let id = format!("x{i}");
        players.insert(id.clone(), Player::new(id, format!("name-{i}")));
    }
    players
}

/// Count holders of `role` after applying `plan` on top of the roster.
fn holders_after(
    players: &BTreeMap<PlayerId, Player>,
    plan: &[(PlayerId, PlayerRole)],
    role: PlayerRole,
) -> usize {
    let preassigned = players
        .values()
        .filter(|p| p.role == Some(role))
        .count();
    preassigned + plan.iter().filter(|(_, r)| *r == role).count()
}

proptest! {
    #[test]
    fn full_pools_assign_each_exclusive_role_once(
        pool in 3usize..10,
        inactive in 0usize..4,
        seed in any::<u64>(),
    ) {
        let players = roster(pool, &[], inactive);
        let plan = plan_role_assignments(&players, &GameRng::new(Some(seed))).unwrap();

        // Every active player is covered, nobody else.
        prop_assert_eq!(plan.len(), pool);
        prop_assert!(plan.iter().all(|(id, _)| id.starts_with('u')));
        prop_assert_eq!(holders_after(&players, &plan, PlayerRole::Leader), 1);
        prop_assert_eq!(holders_after(&players, &plan, PlayerRole::Insider), 1);
        prop_assert_eq!(
            holders_after(&players, &plan, PlayerRole::Common),
            pool - 2
        );
    }

    #[test]
    fn preassigned_exclusive_roles_are_never_duplicated(
        pool in 2usize..8,
        claim_leader in any::<bool>(),
        claim_insider in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut claimed = Vec::new();
        if claim_leader {
            claimed.push(PlayerRole::Leader);
        }
        if claim_insider {
            claimed.push(PlayerRole::Insider);
        }
        let players = roster(pool, &claimed, 0);
        let plan = plan_role_assignments(&players, &GameRng::new(Some(seed))).unwrap();

        prop_assert_eq!(holders_after(&players, &plan, PlayerRole::Leader), 1);
        prop_assert_eq!(holders_after(&players, &plan, PlayerRole::Insider), 1);
    }

    #[test]
    fn infeasible_pools_always_fail(
        pool in 0usize..3,
        seed in any::<u64>(),
    ) {
        let players = roster(pool, &[], 2);
        let result = plan_role_assignments(&players, &GameRng::new(Some(seed)));
        prop_assert!(result.is_err());
    }
}
