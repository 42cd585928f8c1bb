use std::sync::Arc;

use crate::infra::rng::GameRng;
use crate::repos::sessions::SessionRegistry;
use crate::services::games::GameService;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Lifetime-scoped session registry; the only holder of live sessions.
    registry: Arc<SessionRegistry>,
    /// Shared random source for code, word, and role draws.
    rng: GameRng,
}

impl AppState {
    /// Create a new AppState with the given registry and random source.
    pub fn new(registry: Arc<SessionRegistry>, rng: GameRng) -> Self {
        Self { registry, rng }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Service facade over the shared registry and RNG.
    pub fn games(&self) -> GameService {
        GameService::new(self.registry.clone(), self.rng.clone())
    }
}
