use std::fmt;

use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::errors::lobby_service_errors::LobbyServiceError;

#[derive(Debug)]
pub enum MatchmakingServiceError {
    MalformedInput(String),
    Lobby(LobbyServiceError),
    Game(GameServiceError),
}

impl fmt::Display for MatchmakingServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchmakingServiceError::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            MatchmakingServiceError::Lobby(err) => write!(f, "{}", err),
            MatchmakingServiceError::Game(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for MatchmakingServiceError {}

impl From<LobbyServiceError> for MatchmakingServiceError {
    fn from(err: LobbyServiceError) -> Self {
        MatchmakingServiceError::Lobby(err)
    }
}

impl From<GameServiceError> for MatchmakingServiceError {
    fn from(err: GameServiceError) -> Self {
        MatchmakingServiceError::Game(err)
    }
}
