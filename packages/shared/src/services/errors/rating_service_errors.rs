use std::fmt;

use crate::models::ids::PlayerId;
use crate::repositories::errors::player_repository_errors::PlayerRepositoryError;

#[derive(Debug)]
pub enum RatingServiceError {
    MalformedInput(String),
    PlayerNotFound(PlayerId),
    /// The rating write did not go through; neither rating changed.
    PersistenceFailure(PlayerRepositoryError),
}

impl fmt::Display for RatingServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingServiceError::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            RatingServiceError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            RatingServiceError::PersistenceFailure(err) => {
                write!(f, "Rating update failed: {}", err)
            }
        }
    }
}

impl std::error::Error for RatingServiceError {}

impl From<PlayerRepositoryError> for RatingServiceError {
    fn from(err: PlayerRepositoryError) -> Self {
        RatingServiceError::PersistenceFailure(err)
    }
}
