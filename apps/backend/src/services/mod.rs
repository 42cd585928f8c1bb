//! Service layer: the game-session state machine.

pub mod games;

pub use games::GameService;
