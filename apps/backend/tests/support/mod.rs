#![allow(dead_code)]

use backend::domain::role::PlayerRole;
use backend::infra::state::build_state;
use backend::state::app_state::AppState;

// Logging is auto-installed for every test binary pulling this module in.
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// App state with a pinned RNG seed so codes, words, and role draws replay.
pub fn seeded_state(seed: u64) -> AppState {
    build_state().with_rng_seed(seed).build()
}

pub fn test_state() -> AppState {
    seeded_state(0xC0FFEE)
}

/// Create a session hosted by `host` and join `others`; returns the code.
pub fn setup_session(state: &AppState, host: (&str, &str), others: &[(&str, &str)]) -> String {
    let games = state.games();
    let code = games
        .create(host.0, host.1, None)
        .expect("create should succeed")
        .code;
    for (id, name) in others {
        games.join(id, name, &code).expect("join should succeed");
    }
    code
}

/// Ready up `leader` with the Leader claim and everyone else without a
/// claim, then assign roles, landing the session in PRE_GAME.
pub fn ready_and_assign(state: &AppState, leader: &str, others: &[&str]) {
    let games = state.games();
    games
        .set_ready(leader, Some(PlayerRole::Leader))
        .expect("leader ready should succeed");
    for id in others {
        games.set_ready(id, None).expect("ready should succeed");
    }
    games.assign_roles(leader).expect("assignment should succeed");
}
