use axum::{extract::State, routing::post, Json, Router};
use tracing::error;

use arbiter_shared::models::requests::MatchResultRequest;
use arbiter_shared::models::responses::RatingChange;

use crate::{error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/ratings", post(process_match_result))
}

#[tracing::instrument(skip(state))]
async fn process_match_result(
    State(state): State<AppState>,
    Json(request): Json<MatchResultRequest>,
) -> Result<Json<RatingChange>, ApiError> {
    let player_a_id = request.player_a_id.parse("player_a_id").map_err(ApiError::BadRequest)?;
    let player_b_id = request.player_b_id.parse("player_b_id").map_err(ApiError::BadRequest)?;
    state
        .rating_service
        .process_match_result(player_a_id, player_b_id, request.result_a)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to rate {} vs {}: {}", player_a_id, player_b_id, e);
            ApiError::from(e)
        })
}
