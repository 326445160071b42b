use std::fmt;

use crate::models::game::InvalidTransition;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::repositories::errors::move_repository_errors::MoveRepositoryError;
use crate::repositories::errors::player_repository_errors::PlayerRepositoryError;
use crate::services::errors::rating_service_errors::RatingServiceError;
use crate::services::errors::rule_engine_errors::RuleEngineError;
use crate::services::errors::transcript_errors::TranscriptError;

#[derive(Debug)]
pub enum GameServiceError {
    MalformedInput(String),
    NotFound(String),
    /// The action is not allowed in the game's current status.
    InvalidState(String),
    PersistenceFailure(String),
    RuleEngine(RuleEngineError),
    Transcript(TranscriptError),
}

impl fmt::Display for GameServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameServiceError::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            GameServiceError::NotFound(msg) => write!(f, "{}", msg),
            GameServiceError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            GameServiceError::PersistenceFailure(msg) => {
                write!(f, "Persistence failure: {}", msg)
            }
            GameServiceError::RuleEngine(err) => write!(f, "Rule engine error: {}", err),
            GameServiceError::Transcript(err) => write!(f, "Transcript error: {}", err),
        }
    }
}

impl std::error::Error for GameServiceError {}

impl From<GameRepositoryError> for GameServiceError {
    fn from(err: GameRepositoryError) -> Self {
        match err {
            GameRepositoryError::NotFound => GameServiceError::NotFound(err.to_string()),
            other => GameServiceError::PersistenceFailure(other.to_string()),
        }
    }
}

impl From<MoveRepositoryError> for GameServiceError {
    fn from(err: MoveRepositoryError) -> Self {
        GameServiceError::PersistenceFailure(err.to_string())
    }
}

impl From<PlayerRepositoryError> for GameServiceError {
    fn from(err: PlayerRepositoryError) -> Self {
        match err {
            PlayerRepositoryError::NotFound => GameServiceError::NotFound(err.to_string()),
            other => GameServiceError::PersistenceFailure(other.to_string()),
        }
    }
}

impl From<RatingServiceError> for GameServiceError {
    fn from(err: RatingServiceError) -> Self {
        match err {
            RatingServiceError::MalformedInput(msg) => GameServiceError::MalformedInput(msg),
            RatingServiceError::PlayerNotFound(_) => GameServiceError::NotFound(err.to_string()),
            RatingServiceError::PersistenceFailure(_) => {
                GameServiceError::PersistenceFailure(err.to_string())
            }
        }
    }
}

impl From<RuleEngineError> for GameServiceError {
    fn from(err: RuleEngineError) -> Self {
        GameServiceError::RuleEngine(err)
    }
}

impl From<TranscriptError> for GameServiceError {
    fn from(err: TranscriptError) -> Self {
        GameServiceError::Transcript(err)
    }
}

impl From<InvalidTransition> for GameServiceError {
    fn from(err: InvalidTransition) -> Self {
        GameServiceError::InvalidState(err.to_string())
    }
}
