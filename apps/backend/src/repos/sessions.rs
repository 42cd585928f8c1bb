//! In-memory session registry.
//!
//! Source of truth for which sessions exist and which session each player
//! belongs to. Two indexes: session by code and session code by player. The
//! indexes are only mutated together under the write lock, so a session is
//! never reachable by code once its player map is empty and a player id
//! never resolves to a removed session.
//!
//! Lock order is registry before session. Membership operations briefly take
//! individual session locks while holding the write lock, never two session
//! locks at once.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use time::OffsetDateTime;

use crate::domain::player::{Player, PlayerId};
use crate::domain::session::{GameSession, GameSettings};
use crate::infra::rng::GameRng;
use crate::utils::game_code::generate_game_code;

/// Shared handle to one session. Every mutation of a session happens behind
/// this lock, so operations against the same session serialize while
/// different sessions proceed independently.
pub type SharedSession = Arc<Mutex<GameSession>>;

#[derive(Default)]
struct RegistryIndexes {
    by_code: HashMap<String, SharedSession>,
    by_player: HashMap<PlayerId, String>,
}

/// Registry of live sessions.
pub struct SessionRegistry {
    indexes: RwLock<RegistryIndexes>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            indexes: RwLock::new(RegistryIndexes::default()),
        }
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.indexes.read().by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_by_code(&self, code: &str) -> Option<SharedSession> {
        self.indexes.read().by_code.get(code).cloned()
    }

    pub fn find_by_player(&self, player_id: &str) -> Option<SharedSession> {
        let indexes = self.indexes.read();
        let code = indexes.by_player.get(player_id)?;
        indexes.by_code.get(code).cloned()
    }

    /// Create a session under a freshly drawn, collision-free code, with
    /// `host` as its only member. Any prior membership of the host is
    /// removed first.
    pub fn create(
        &self,
        rng: &GameRng,
        host: Player,
        settings: GameSettings,
        now: OffsetDateTime,
    ) -> SharedSession {
        let mut indexes = self.indexes.write();
        Self::remove_player_locked(&mut indexes, &host.id);

        let code = loop {
            let candidate = generate_game_code(rng);
            if !indexes.by_code.contains_key(&candidate) {
                break candidate;
            }
        };

        let host_id = host.id.clone();
        let mut session = GameSession::new(code.clone(), settings, now);
        session.players.insert(host_id.clone(), host);

        let shared = Arc::new(Mutex::new(session));
        indexes.by_code.insert(code.clone(), shared.clone());
        indexes.by_player.insert(host_id, code);
        shared
    }

    /// Add `player` to the session registered under `code`.
    ///
    /// Returns `None` when no session holds that code. If the player is
    /// already a member of that exact session, the join is a no-op and the
    /// second tuple field is `true`; otherwise any prior membership is
    /// removed, the player is added as a fresh record, and the session's
    /// activity stamp is refreshed.
    pub fn join(
        &self,
        player: Player,
        code: &str,
        now: OffsetDateTime,
    ) -> Option<(SharedSession, bool)> {
        let mut indexes = self.indexes.write();
        let target = indexes.by_code.get(code)?.clone();

        let bound_here = indexes.by_player.get(&player.id).map(String::as_str) == Some(code);
        if bound_here && target.lock().players.contains_key(&player.id) {
            return Some((target, true));
        }

        Self::remove_player_locked(&mut indexes, &player.id);

        let player_id = player.id.clone();
        {
            let mut session = target.lock();
            session.players.insert(player_id.clone(), player);
            session.touch(now);
        }
        indexes.by_player.insert(player_id, code.to_string());
        Some((target, false))
    }

    /// Remove `player_id` from their current session, destroying the session
    /// if it becomes empty. No-op when the player has no binding.
    pub fn remove_player(&self, player_id: &str) {
        let mut indexes = self.indexes.write();
        Self::remove_player_locked(&mut indexes, player_id);
    }

    /// Drop a player binding that points at a session which no longer lists
    /// the player. Consistency repair for the resolve path; bindings that
    /// turn out to be healthy are left alone.
    pub fn unbind_if_stale(&self, player_id: &str) {
        let mut indexes = self.indexes.write();
        let Some(code) = indexes.by_player.get(player_id) else {
            return;
        };
        let stale = match indexes.by_code.get(code) {
            Some(shared) => !shared.lock().players.contains_key(player_id),
            None => true,
        };
        if stale {
            indexes.by_player.remove(player_id);
        }
    }

    fn remove_player_locked(indexes: &mut RegistryIndexes, player_id: &str) {
        let Some(code) = indexes.by_player.remove(player_id) else {
            return;
        };
        let now_empty = match indexes.by_code.get(&code) {
            Some(shared) => {
                let mut session = shared.lock();
                session.players.remove(player_id);
                session.players.is_empty()
            }
            None => false,
        };
        if now_empty {
            indexes.by_code.remove(&code);
        }
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> (SessionRegistry, GameRng) {
        (SessionRegistry::new(), GameRng::new(Some(1234)))
    }

    fn now() -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH
    }

    #[test]
    fn create_indexes_both_ways() {
        let (registry, rng) = registry();
        let shared = registry.create(&rng, Player::new("p1", "jim"), GameSettings::default(), now());
        let code = shared.lock().code.clone();

        assert!(registry.find_by_code(&code).is_some());
        assert!(registry.find_by_player("p1").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn create_moves_the_host_out_of_a_previous_session() {
        let (registry, rng) = registry();
        let first = registry.create(&rng, Player::new("p1", "jim"), GameSettings::default(), now());
        let first_code = first.lock().code.clone();

        registry.create(&rng, Player::new("p1", "jim"), GameSettings::default(), now());

        // The solo host left, so the first session was destroyed.
        assert!(registry.find_by_code(&first_code).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn join_is_idempotent_for_existing_members() {
        let (registry, rng) = registry();
        let shared = registry.create(&rng, Player::new("p1", "jim"), GameSettings::default(), now());
        let code = shared.lock().code.clone();

        let (_, first_join) = registry.join(Player::new("p2", "bob"), &code, now()).unwrap();
        let (_, second_join) = registry.join(Player::new("p2", "bob"), &code, now()).unwrap();

        assert!(!first_join);
        assert!(second_join);
        assert_eq!(shared.lock().players.len(), 2);
    }

    #[test]
    fn join_unknown_code_returns_none() {
        let (registry, _) = registry();
        assert!(registry.join(Player::new("p1", "jim"), "ZZZZZ", now()).is_none());
    }

    #[test]
    fn removing_the_last_member_destroys_the_session() {
        let (registry, rng) = registry();
        let shared = registry.create(&rng, Player::new("p1", "jim"), GameSettings::default(), now());
        let code = shared.lock().code.clone();

        registry.remove_player("p1");

        assert!(registry.find_by_code(&code).is_none());
        assert!(registry.find_by_player("p1").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_is_a_no_op_without_a_binding() {
        let (registry, _) = registry();
        registry.remove_player("ghost");
        assert!(registry.is_empty());
    }

    #[test]
    fn unbind_if_stale_keeps_healthy_bindings() {
        let (registry, rng) = registry();
        registry.create(&rng, Player::new("p1", "jim"), GameSettings::default(), now());

        registry.unbind_if_stale("p1");
        assert!(registry.find_by_player("p1").is_some());
    }

    #[test]
    fn unbind_if_stale_repairs_dangling_bindings() {
        let (registry, rng) = registry();
        let shared = registry.create(&rng, Player::new("p1", "jim"), GameSettings::default(), now());
        // Simulate a session that dropped the player without unbinding.
        shared.lock().players.remove("p1");

        registry.unbind_if_stale("p1");
        assert!(registry.find_by_player("p1").is_none());
    }
}
