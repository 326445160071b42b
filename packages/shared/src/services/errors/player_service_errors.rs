use std::fmt;

use crate::models::ids::PlayerId;
use crate::repositories::errors::player_repository_errors::PlayerRepositoryError;

#[derive(Debug)]
pub enum PlayerServiceError {
    ValidationError(String),
    PlayerNotFound(PlayerId),
    UsernameTaken(String),
    RepositoryError(PlayerRepositoryError),
}

impl fmt::Display for PlayerServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            PlayerServiceError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            PlayerServiceError::UsernameTaken(name) => {
                write!(f, "Username '{}' is already taken", name)
            }
            PlayerServiceError::RepositoryError(err) => write!(f, "Repository error: {}", err),
        }
    }
}

impl std::error::Error for PlayerServiceError {}

impl From<PlayerRepositoryError> for PlayerServiceError {
    fn from(err: PlayerRepositoryError) -> Self {
        PlayerServiceError::RepositoryError(err)
    }
}
