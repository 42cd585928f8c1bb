//! Game action routes.
//!
//! One POST per player action, mirroring the pull-based client flow: every
//! call returns the caller's fresh snapshot. Clients re-fetch state via
//! `getState`; nothing is pushed.

use actix_web::{web, Result};
use serde::Deserialize;
use tracing::info;

use crate::domain::role::PlayerRole;
use crate::domain::session::GameSettings;
use crate::domain::snapshot::GameSnapshot;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerRequest {
    player_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    player_id: String,
    player_name: String,
    #[serde(default)]
    game_settings: Option<GameSettings>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinRequest {
    player_id: String,
    player_name: String,
    game_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadyRequest {
    player_id: String,
    is_ready: bool,
    #[serde(default)]
    claimed_role: Option<PlayerRole>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VoteRequest {
    player_id: String,
    accused_player_id: String,
}

type SnapshotResult = Result<web::Json<GameSnapshot>, AppError>;

async fn get_state(state: web::Data<AppState>, body: web::Json<PlayerRequest>) -> SnapshotResult {
    info!(player_id = %body.player_id, "getting state");
    Ok(web::Json(state.games().get_state(&body.player_id)))
}

async fn create(state: web::Data<AppState>, body: web::Json<CreateRequest>) -> SnapshotResult {
    let body = body.into_inner();
    info!(player_id = %body.player_id, player_name = %body.player_name, "creating game");
    let snapshot = state
        .games()
        .create(&body.player_id, &body.player_name, body.game_settings)?;
    Ok(web::Json(snapshot))
}

async fn join(state: web::Data<AppState>, body: web::Json<JoinRequest>) -> SnapshotResult {
    info!(player_id = %body.player_id, game_code = %body.game_code, "joining game");
    let snapshot = state
        .games()
        .join(&body.player_id, &body.player_name, &body.game_code)?;
    Ok(web::Json(snapshot))
}

async fn ready(state: web::Data<AppState>, body: web::Json<ReadyRequest>) -> SnapshotResult {
    info!(
        player_id = %body.player_id,
        is_ready = body.is_ready,
        claimed_role = ?body.claimed_role,
        "player ready change"
    );
    let snapshot = if body.is_ready {
        state.games().set_ready(&body.player_id, body.claimed_role)?
    } else {
        state.games().set_not_ready(&body.player_id)?
    };
    Ok(web::Json(snapshot))
}

async fn reset(state: web::Data<AppState>, body: web::Json<PlayerRequest>) -> SnapshotResult {
    info!(player_id = %body.player_id, "resetting game");
    Ok(web::Json(state.games().reset(&body.player_id)?))
}

async fn assign_roles(state: web::Data<AppState>, body: web::Json<PlayerRequest>) -> SnapshotResult {
    info!(player_id = %body.player_id, "assigning roles");
    Ok(web::Json(state.games().assign_roles(&body.player_id)?))
}

async fn exchange_word(
    state: web::Data<AppState>,
    body: web::Json<PlayerRequest>,
) -> SnapshotResult {
    info!(player_id = %body.player_id, "exchanging word");
    Ok(web::Json(state.games().exchange_word(&body.player_id)?))
}

async fn start(state: web::Data<AppState>, body: web::Json<PlayerRequest>) -> SnapshotResult {
    info!(player_id = %body.player_id, "starting game");
    Ok(web::Json(state.games().start(&body.player_id)?))
}

async fn guessed(state: web::Data<AppState>, body: web::Json<PlayerRequest>) -> SnapshotResult {
    info!(player_id = %body.player_id, "word guessed");
    Ok(web::Json(state.games().word_guessed(&body.player_id)?))
}

async fn time_up(state: web::Data<AppState>, body: web::Json<PlayerRequest>) -> SnapshotResult {
    info!(player_id = %body.player_id, "time up");
    Ok(web::Json(state.games().time_up(&body.player_id)?))
}

async fn vote_player(state: web::Data<AppState>, body: web::Json<VoteRequest>) -> SnapshotResult {
    info!(player_id = %body.player_id, "casting vote");
    let snapshot = state
        .games()
        .vote_player(&body.player_id, &body.accused_player_id)?;
    Ok(web::Json(snapshot))
}

async fn complete(state: web::Data<AppState>, body: web::Json<PlayerRequest>) -> SnapshotResult {
    info!(player_id = %body.player_id, "completing voting");
    Ok(web::Json(state.games().complete_voting(&body.player_id)?))
}

async fn end(state: web::Data<AppState>, body: web::Json<PlayerRequest>) -> SnapshotResult {
    info!(player_id = %body.player_id, "ending game");
    Ok(web::Json(state.games().end(&body.player_id)?))
}

async fn leave(state: web::Data<AppState>, body: web::Json<PlayerRequest>) -> SnapshotResult {
    info!(player_id = %body.player_id, "leaving game");
    Ok(web::Json(state.games().leave(&body.player_id)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/getState", web::post().to(get_state))
        .route("/create", web::post().to(create))
        .route("/join", web::post().to(join))
        .route("/ready", web::post().to(ready))
        .route("/reset", web::post().to(reset))
        .route("/assignRoles", web::post().to(assign_roles))
        .route("/exchangeWord", web::post().to(exchange_word))
        .route("/start", web::post().to(start))
        .route("/guessed", web::post().to(guessed))
        .route("/timeUp", web::post().to(time_up))
        .route("/votePlayer", web::post().to(vote_player))
        .route("/complete", web::post().to(complete))
        .route("/end", web::post().to(end))
        .route("/leave", web::post().to(leave));
}
