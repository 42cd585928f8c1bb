//! In-memory storage layer.

pub mod sessions;

pub use sessions::{SessionRegistry, SharedSession};
