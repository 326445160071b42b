use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, error};

use arbiter_shared::models::lobby::LobbyEntry;
use arbiter_shared::models::requests::{LobbyRequest, PairRequest};
use arbiter_shared::models::responses::{CreateGameResponse, LobbyListResponse};

use crate::{error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/lobby", get(list_ready_players))
        .route("/lobby/join", post(join_lobby))
        .route("/lobby/leave", post(leave_lobby))
        .route("/lobby/pair", post(pair_players))
}

#[tracing::instrument(skip(state))]
async fn join_lobby(
    State(state): State<AppState>,
    Json(request): Json<LobbyRequest>,
) -> Result<Json<LobbyEntry>, ApiError> {
    let player_id = request.player_id.parse("player_id").map_err(ApiError::BadRequest)?;
    state
        .lobby_service
        .join(player_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to add player {} to lobby: {}", player_id, e);
            ApiError::from(e)
        })
}

/// Leaving is idempotent; a player who was not waiting still gets 204.
#[tracing::instrument(skip(state))]
async fn leave_lobby(
    State(state): State<AppState>,
    Json(request): Json<LobbyRequest>,
) -> Result<StatusCode, ApiError> {
    let player_id = request.player_id.parse("player_id").map_err(ApiError::BadRequest)?;
    let removed = state.lobby_service.leave(player_id).await;
    debug!("Player {} left lobby (was waiting: {})", player_id, removed);
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state))]
async fn list_ready_players(
    State(state): State<AppState>,
) -> Result<Json<LobbyListResponse>, ApiError> {
    state
        .lobby_service
        .list_waiting()
        .await
        .map(|players| Json(LobbyListResponse { players }))
        .map_err(|e| {
            error!("Failed to list lobby: {}", e);
            ApiError::from(e)
        })
}

#[tracing::instrument(skip(state))]
async fn pair_players(
    State(state): State<AppState>,
    Json(request): Json<PairRequest>,
) -> Result<(StatusCode, Json<CreateGameResponse>), ApiError> {
    let player_a_id = request
        .player_a_id
        .optional("player_a_id")
        .map_err(ApiError::BadRequest)?;
    let player_b_id = request
        .player_b_id
        .optional("player_b_id")
        .map_err(ApiError::BadRequest)?;
    let result = match (player_a_id, player_b_id) {
        (Some(a), Some(b)) => state.matchmaking_service.pair(a, b, &request.mode).await,
        (None, None) => state.matchmaking_service.pair_next(&request.mode).await,
        _ => {
            return Err(ApiError::BadRequest(
                "Provide both player ids or neither".to_string(),
            ))
        }
    };

    result
        .map(|created| (StatusCode::CREATED, Json(created)))
        .map_err(|e| {
            error!("Failed to pair lobby players: {}", e);
            ApiError::from(e)
        })
}
