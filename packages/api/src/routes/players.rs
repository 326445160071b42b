use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use arbiter_shared::models::ids::parse_player_id;
use arbiter_shared::models::player::Player;
use arbiter_shared::models::requests::RegisterPlayerRequest;
use arbiter_shared::models::responses::LeaderboardResponse;

use crate::{error::ApiError, state::AppState};

const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/players", post(register_player))
        .route("/players/{player_id}", get(get_player))
        .route("/leaderboard", get(leaderboard))
}

#[derive(Debug, Deserialize)]
struct LeaderboardQuery {
    limit: Option<usize>,
}

#[tracing::instrument(skip(state))]
async fn register_player(
    State(state): State<AppState>,
    Json(request): Json<RegisterPlayerRequest>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    state
        .player_service
        .register_player(&request.username)
        .await
        .map(|player| (StatusCode::CREATED, Json(player)))
        .map_err(|e| {
            error!("Failed to register player {}: {}", request.username, e);
            ApiError::from(e)
        })
}

#[tracing::instrument(skip(state))]
async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let player_id = parse_player_id(&player_id, "player_id").map_err(ApiError::BadRequest)?;
    state
        .player_service
        .get_player(player_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to retrieve player {}: {}", player_id, e);
            ApiError::from(e)
        })
}

#[tracing::instrument(skip(state))]
async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    state
        .player_service
        .leaderboard(limit)
        .await
        .map(|players| Json(LeaderboardResponse { players }))
        .map_err(|e| {
            error!("Failed to build leaderboard: {}", e);
            ApiError::from(e)
        })
}
