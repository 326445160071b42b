use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tokio::sync::RwLock;

use crate::models::game::Game;
use crate::models::ids::GameId;
use crate::repositories::counters::next_counter_value;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn next_game_id(&self) -> Result<GameId, GameRepositoryError>;

    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError>;

    async fn get_game(&self, game_id: GameId) -> Result<Option<Game>, GameRepositoryError>;

    /// Replaces the stored record. The game must already exist.
    async fn update_game(&self, game: &Game) -> Result<(), GameRepositoryError>;
}

pub struct DynamoDbGameRepository {
    pub client: Client,
    pub table_name: String,
    pub counters_table: String,
}

impl DynamoDbGameRepository {
    pub fn new(client: Client, table_name: &str, counters_table: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            counters_table: counters_table.to_string(),
        }
    }

    async fn put_conditionally(
        &self,
        game: &Game,
        condition: &str,
        on_condition_failed: GameRepositoryError,
    ) -> Result<(), GameRepositoryError> {
        let item = serde_dynamo::to_item(game)
            .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression(condition)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if let SdkError::ServiceError(service_err) = &e {
                    if service_err.err().is_conditional_check_failed_exception() {
                        return Err(on_condition_failed);
                    }
                }
                Err(GameRepositoryError::DynamoDb(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl GameRepository for DynamoDbGameRepository {
    async fn next_game_id(&self) -> Result<GameId, GameRepositoryError> {
        next_counter_value(&self.client, &self.counters_table, "games")
            .await
            .map(GameId)
            .map_err(GameRepositoryError::DynamoDb)
    }

    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        self.put_conditionally(
            game,
            "attribute_not_exists(id)",
            GameRepositoryError::AlreadyExists,
        )
        .await
    }

    async fn get_game(&self, game_id: GameId) -> Result<Option<Game>, GameRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::N(game_id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = result.item {
            let game: Game = serde_dynamo::from_item(item)
                .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(game))
        } else {
            Ok(None)
        }
    }

    async fn update_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        self.put_conditionally(game, "attribute_exists(id)", GameRepositoryError::NotFound)
            .await
    }
}

#[derive(Default)]
pub struct InMemoryGameRepository {
    games: RwLock<HashMap<GameId, Game>>,
    last_id: AtomicU64,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn next_game_id(&self) -> Result<GameId, GameRepositoryError> {
        Ok(GameId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1))
    }

    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let mut games = self.games.write().await;
        if games.contains_key(&game.id) {
            return Err(GameRepositoryError::AlreadyExists);
        }
        games.insert(game.id, game.clone());
        Ok(())
    }

    async fn get_game(&self, game_id: GameId) -> Result<Option<Game>, GameRepositoryError> {
        Ok(self.games.read().await.get(&game_id).cloned())
    }

    async fn update_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        match self.games.write().await.get_mut(&game.id) {
            Some(stored) => {
                *stored = game.clone();
                Ok(())
            }
            None => Err(GameRepositoryError::NotFound),
        }
    }
}
