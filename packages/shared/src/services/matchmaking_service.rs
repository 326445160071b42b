use std::sync::Arc;
use tracing::{info, warn};

use crate::models::game::GameMode;
use crate::models::ids::PlayerId;
use crate::models::lobby::LobbyEntry;
use crate::models::responses::CreateGameResponse;
use crate::services::errors::matchmaking_service_errors::MatchmakingServiceError;
use crate::services::game_service::GameService;
use crate::services::lobby_service::LobbyService;

/// Hands pairs of waiting players over to the game service.
#[derive(Clone)]
pub struct MatchmakingService {
    lobby: Arc<LobbyService>,
    games: Arc<GameService>,
}

impl MatchmakingService {
    pub fn new(lobby: Arc<LobbyService>, games: Arc<GameService>) -> Self {
        MatchmakingService { lobby, games }
    }

    /// Pairs two specific waiting players. The one who joined first plays white.
    pub async fn pair(
        &self,
        player_a_id: PlayerId,
        player_b_id: PlayerId,
        mode: &str,
    ) -> Result<CreateGameResponse, MatchmakingServiceError> {
        let mode = Self::parse_mode(mode)?;
        let pair = self.lobby.take_pair(player_a_id, player_b_id).await?;
        self.start_game(pair, mode).await
    }

    /// Pairs the two longest-waiting players.
    pub async fn pair_next(&self, mode: &str) -> Result<CreateGameResponse, MatchmakingServiceError> {
        let mode = Self::parse_mode(mode)?;
        let pair = self.lobby.take_next_pair().await?;
        self.start_game(pair, mode).await
    }

    fn parse_mode(mode: &str) -> Result<GameMode, MatchmakingServiceError> {
        mode.parse::<GameMode>()
            .map_err(|e| MatchmakingServiceError::MalformedInput(e.to_string()))
    }

    async fn start_game(
        &self,
        (white, black): (LobbyEntry, LobbyEntry),
        mode: GameMode,
    ) -> Result<CreateGameResponse, MatchmakingServiceError> {
        match self
            .games
            .create_game(white.player_id, black.player_id, mode.as_str())
            .await
        {
            Ok(created) => {
                info!(
                    game_id = %created.game_id,
                    white_id = %white.player_id,
                    black_id = %black.player_id,
                    "Lobby pair started a game"
                );
                Ok(created)
            }
            Err(e) => {
                warn!(
                    white_id = %white.player_id,
                    black_id = %black.player_id,
                    error = %e,
                    "Game creation failed, returning players to lobby"
                );
                self.lobby.restore(vec![white, black]).await;
                Err(e.into())
            }
        }
    }
}
