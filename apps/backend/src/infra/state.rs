use std::sync::Arc;

use crate::infra::rng::GameRng;
use crate::repos::sessions::SessionRegistry;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main).
pub struct StateBuilder {
    rng_seed: Option<u64>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self { rng_seed: None }
    }

    /// Seed the shared RNG so codes, words, and role draws replay exactly.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn build(self) -> AppState {
        AppState::new(Arc::new(SessionRegistry::new()), GameRng::new(self.rng_seed))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_an_empty_registry() {
        let state = build_state().build();
        assert!(state.registry().is_empty());
    }

    #[test]
    fn seeded_states_draw_identical_codes() {
        let a = build_state().with_rng_seed(9).build();
        let b = build_state().with_rng_seed(9).build();
        let snap_a = a.games().create("p1", "jim", None).unwrap();
        let snap_b = b.games().create("p1", "jim", None).unwrap();
        assert_eq!(snap_a.code, snap_b.code);
    }
}
