use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, error};

use arbiter_shared::models::game::Game;
use arbiter_shared::models::requests::{CreateGameRequest, GameResultRequest, MoveRequest};
use arbiter_shared::models::responses::{
    CreateGameResponse, GameDetails, GameResultResponse, MoveResponse, ReplayResponse,
};
use arbiter_shared::services::game_service::parse_game_id;

use crate::{error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/games", post(create_game))
        .route("/games/{game_id}", get(get_game))
        .route("/games/{game_id}/moves", post(submit_move))
        .route("/games/{game_id}/cancel", post(cancel_game))
        .route("/games/{game_id}/replay", get(get_replay))
        .route("/games/{game_id}/transcript", get(get_transcript))
        .route("/game-result", post(game_result))
}

#[tracing::instrument(skip(state))]
async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<CreateGameResponse>), ApiError> {
    let white_id = request.white_id.parse("white_id").map_err(ApiError::BadRequest)?;
    let black_id = request.black_id.parse("black_id").map_err(ApiError::BadRequest)?;
    state
        .game_service
        .create_game(white_id, black_id, &request.mode)
        .await
        .map(|created| (StatusCode::CREATED, Json(created)))
        .map_err(|e| {
            error!(
                "Failed to create {} game for {} vs {}: {}",
                request.mode, white_id, black_id, e
            );
            ApiError::from(e)
        })
}

#[tracing::instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameDetails>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    state
        .game_service
        .get_game_details(game_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to retrieve game {}: {}", game_id, e);
            ApiError::from(e)
        })
}

/// Illegal moves and timeouts are outcomes, answered with 200 and `is_valid: false`.
#[tracing::instrument(skip(state))]
async fn submit_move(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let request = MoveRequest { game_id, ..request };
    let outcome = state
        .game_service
        .submit_move(&request)
        .await
        .map_err(|e| {
            error!(
                "Failed to process move {}{} in game {}: {}",
                request.from, request.to, request.game_id, e
            );
            ApiError::from(e)
        })?;
    debug!("Move processed in game {}: {:?}", request.game_id, outcome);
    Ok(Json(outcome.into()))
}

#[tracing::instrument(skip(state))]
async fn cancel_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<Game>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    state
        .game_service
        .cancel_game(game_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to cancel game {}: {}", game_id, e);
            ApiError::from(e)
        })
}

#[tracing::instrument(skip(state))]
async fn get_replay(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<ReplayResponse>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    state
        .game_service
        .get_replay(game_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to build replay for game {}: {}", game_id, e);
            ApiError::from(e)
        })
}

#[tracing::instrument(skip(state))]
async fn get_transcript(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let pgn = state
        .game_service
        .get_transcript(game_id)
        .await
        .map_err(|e| {
            error!("Failed to export game {}: {}", game_id, e);
            ApiError::from(e)
        })?;
    Ok(([(header::CONTENT_TYPE, "application/x-chess-pgn")], pgn))
}

#[tracing::instrument(skip(state))]
async fn game_result(
    State(state): State<AppState>,
    Json(request): Json<GameResultRequest>,
) -> Result<Json<GameResultResponse>, ApiError> {
    state
        .game_service
        .game_result(&request.position)
        .map(Json)
        .map_err(|e| {
            error!("Failed to classify position '{}': {}", request.position, e);
            ApiError::from(e)
        })
}
