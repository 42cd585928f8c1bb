//! Role assignment for the ready-up phase.

use std::collections::BTreeMap;

use crate::domain::player::{Player, PlayerId};
use crate::domain::role::PlayerRole;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::infra::rng::GameRng;

/// Roles a round must fill exactly once, in assignment order.
const REQUIRED_ROLES: [PlayerRole; 3] = [
    PlayerRole::Leader,
    PlayerRole::Insider,
    PlayerRole::Common,
];

/// Compute the role assignments needed to start a round.
///
/// Each required role is owed one holder; active players who already claimed
/// a role reduce what is owed (a count may go negative, meaning no shortfall
/// remains for that role). The remaining active, unassigned players form the
/// pool: the shortfall is drawn from it uniformly at random without
/// replacement, and everyone left over becomes COMMON.
///
/// The plan is all-or-nothing. Feasibility is checked before any draw, so an
/// exhausted pool produces an error and no assignments.
pub fn plan_role_assignments(
    players: &BTreeMap<PlayerId, Player>,
    rng: &GameRng,
) -> Result<Vec<(PlayerId, PlayerRole)>, DomainError> {
    let mut owed: [(PlayerRole, i32); 3] = [
        (REQUIRED_ROLES[0], 1),
        (REQUIRED_ROLES[1], 1),
        (REQUIRED_ROLES[2], 1),
    ];
    let mut pool: Vec<&Player> = Vec::new();

    for player in players.values().filter(|p| p.is_active) {
        match player.role {
            Some(role) => {
                if let Some(entry) = owed.iter_mut().find(|(r, _)| *r == role) {
                    entry.1 -= 1;
                }
            }
            None => pool.push(player),
        }
    }

    let shortfall: i32 = owed.iter().map(|(_, n)| (*n).max(0)).sum();
    if (pool.len() as i32) < shortfall {
        return Err(DomainError::invalid_state(
            ErrorCode::NotEnoughPlayers,
            "Not enough players to assign roles",
        ));
    }

    let mut plan = Vec::with_capacity(pool.len());
    for (role, needed) in owed {
        for _ in 0..needed.max(0) {
            let drawn = pool.swap_remove(rng.index(pool.len()));
            plan.push((drawn.id.clone(), role));
        }
    }
    for leftover in pool {
        plan.push((leftover.id.clone(), PlayerRole::Common));
    }

    Ok(plan)
}
