use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use arbiter_shared::models::responses::ErrorResponse;
use arbiter_shared::services::errors::{
    game_service_errors::GameServiceError, lobby_service_errors::LobbyServiceError,
    matchmaking_service_errors::MatchmakingServiceError, player_service_errors::PlayerServiceError,
    rating_service_errors::RatingServiceError,
};
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    GameService(GameServiceError),
    PlayerService(PlayerServiceError),
    LobbyService(LobbyServiceError),
    MatchmakingService(MatchmakingServiceError),
    RatingService(RatingServiceError),
    BadRequest(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::GameService(e) => write!(f, "{}", e),
            ApiError::PlayerService(e) => write!(f, "{}", e),
            ApiError::LobbyService(e) => write!(f, "{}", e),
            ApiError::MatchmakingService(e) => write!(f, "{}", e),
            ApiError::RatingService(e) => write!(f, "{}", e),
            ApiError::BadRequest(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<GameServiceError> for ApiError {
    fn from(error: GameServiceError) -> Self {
        ApiError::GameService(error)
    }
}

impl From<PlayerServiceError> for ApiError {
    fn from(error: PlayerServiceError) -> Self {
        ApiError::PlayerService(error)
    }
}

impl From<LobbyServiceError> for ApiError {
    fn from(error: LobbyServiceError) -> Self {
        ApiError::LobbyService(error)
    }
}

impl From<MatchmakingServiceError> for ApiError {
    fn from(error: MatchmakingServiceError) -> Self {
        ApiError::MatchmakingService(error)
    }
}

impl From<RatingServiceError> for ApiError {
    fn from(error: RatingServiceError) -> Self {
        ApiError::RatingService(error)
    }
}

fn game_status(error: &GameServiceError) -> StatusCode {
    match error {
        GameServiceError::MalformedInput(_) => StatusCode::BAD_REQUEST,
        GameServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        GameServiceError::InvalidState(_) => StatusCode::CONFLICT,
        GameServiceError::PersistenceFailure(_)
        | GameServiceError::RuleEngine(_)
        | GameServiceError::Transcript(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn lobby_status(error: &LobbyServiceError) -> StatusCode {
    match error {
        LobbyServiceError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
        LobbyServiceError::SamePlayer(_) => StatusCode::BAD_REQUEST,
        LobbyServiceError::NotWaiting(_) | LobbyServiceError::NotEnoughPlayers => {
            StatusCode::CONFLICT
        }
        LobbyServiceError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::GameService(e) => game_status(e),

            ApiError::PlayerService(PlayerServiceError::ValidationError(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PlayerService(PlayerServiceError::PlayerNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::PlayerService(PlayerServiceError::UsernameTaken(_)) => StatusCode::CONFLICT,
            ApiError::PlayerService(PlayerServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::LobbyService(e) => lobby_status(e),

            ApiError::MatchmakingService(MatchmakingServiceError::MalformedInput(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::MatchmakingService(MatchmakingServiceError::Lobby(e)) => lobby_status(e),
            ApiError::MatchmakingService(MatchmakingServiceError::Game(e)) => game_status(e),

            ApiError::RatingService(RatingServiceError::MalformedInput(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::RatingService(RatingServiceError::PlayerNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::RatingService(RatingServiceError::PersistenceFailure(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
