use std::sync::Arc;
use tracing::info;

use crate::models::ids::PlayerId;
use crate::models::player::Player;
use crate::models::responses::PlayerSummary;
use crate::repositories::errors::player_repository_errors::PlayerRepositoryError;
use crate::repositories::player_repository::PlayerRepository;
use crate::services::errors::player_service_errors::PlayerServiceError;

const MAX_USERNAME_LENGTH: usize = 32;
pub const MAX_LEADERBOARD_SIZE: usize = 100;

#[derive(Clone)]
pub struct PlayerService {
    repository: Arc<dyn PlayerRepository + Send + Sync>,
}

impl PlayerService {
    pub fn new(repository: Arc<dyn PlayerRepository + Send + Sync>) -> Self {
        PlayerService { repository }
    }

    pub async fn register_player(&self, username: &str) -> Result<Player, PlayerServiceError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(PlayerServiceError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }
        if username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(PlayerServiceError::ValidationError(format!(
                "Username cannot be longer than {} characters",
                MAX_USERNAME_LENGTH
            )));
        }
        if username.chars().any(char::is_whitespace) {
            return Err(PlayerServiceError::ValidationError(
                "Username cannot contain whitespace".to_string(),
            ));
        }

        let id = self.repository.next_player_id().await?;
        let player = Player::new(id, username);
        match self.repository.create_player(&player).await {
            Ok(()) => {
                info!(player_id = %player.id, username, "Player registered");
                Ok(player)
            }
            Err(PlayerRepositoryError::AlreadyExists) => {
                Err(PlayerServiceError::UsernameTaken(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_player(&self, player_id: PlayerId) -> Result<Player, PlayerServiceError> {
        match self.repository.get_player(player_id).await {
            Ok(player) => Ok(player),
            Err(PlayerRepositoryError::NotFound) => {
                Err(PlayerServiceError::PlayerNotFound(player_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Highest-rated players first; equal ratings are ordered by username.
    pub async fn leaderboard(&self, limit: usize) -> Result<Vec<PlayerSummary>, PlayerServiceError> {
        if limit == 0 || limit > MAX_LEADERBOARD_SIZE {
            return Err(PlayerServiceError::ValidationError(format!(
                "Limit must be between 1 and {}",
                MAX_LEADERBOARD_SIZE
            )));
        }

        let mut players = self.repository.list_players().await?;
        players.sort_by(|a, b| {
            b.rating
                .cmp(&a.rating)
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(players.iter().take(limit).map(PlayerSummary::from).collect())
    }
}
