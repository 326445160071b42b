use std::fmt;

use crate::models::ids::PlayerId;
use crate::repositories::errors::player_repository_errors::PlayerRepositoryError;

#[derive(Debug)]
pub enum LobbyServiceError {
    PlayerNotFound(PlayerId),
    /// The player has no entry in the lobby.
    NotWaiting(PlayerId),
    SamePlayer(PlayerId),
    NotEnoughPlayers,
    RepositoryError(PlayerRepositoryError),
}

impl fmt::Display for LobbyServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LobbyServiceError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            LobbyServiceError::NotWaiting(id) => {
                write!(f, "Player {} is not waiting in the lobby", id)
            }
            LobbyServiceError::SamePlayer(id) => {
                write!(f, "Player {} cannot be paired with themself", id)
            }
            LobbyServiceError::NotEnoughPlayers => {
                write!(f, "At least two players must be waiting to pair")
            }
            LobbyServiceError::RepositoryError(err) => write!(f, "Repository error: {}", err),
        }
    }
}

impl std::error::Error for LobbyServiceError {}

impl From<PlayerRepositoryError> for LobbyServiceError {
    fn from(err: PlayerRepositoryError) -> Self {
        LobbyServiceError::RepositoryError(err)
    }
}
