use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::{AttributeValue, TransactWriteItem, Update};
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_item};
use tokio::sync::RwLock;

use crate::models::ids::PlayerId;
use crate::models::player::Player;
use crate::repositories::counters::next_counter_value;
use crate::repositories::errors::player_repository_errors::PlayerRepositoryError;

#[cfg(test)]
use mockall::automock;

const USERNAME_INDEX: &str = "GSI_PlayerByUsername";

/// Conditional rating write, applied only while the stored rating still
/// equals `old_rating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingUpdate {
    pub player_id: PlayerId,
    pub old_rating: i32,
    pub new_rating: i32,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn next_player_id(&self) -> Result<PlayerId, PlayerRepositoryError>;
    async fn create_player(&self, player: &Player) -> Result<(), PlayerRepositoryError>;
    async fn get_player(&self, player_id: PlayerId) -> Result<Player, PlayerRepositoryError>;
    async fn get_player_by_username(&self, username: &str)
        -> Result<Player, PlayerRepositoryError>;
    async fn list_players(&self) -> Result<Vec<Player>, PlayerRepositoryError>;
    /// Writes both ratings or neither.
    async fn update_ratings(
        &self,
        a: RatingUpdate,
        b: RatingUpdate,
    ) -> Result<(), PlayerRepositoryError>;
}

pub struct DynamoDbPlayerRepository {
    pub client: Client,
    pub table_name: String,
    pub counters_table: String,
}

impl DynamoDbPlayerRepository {
    pub fn new(client: Client, table_name: &str, counters_table: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            counters_table: counters_table.to_string(),
        }
    }

    fn rating_update(&self, update: RatingUpdate) -> Result<TransactWriteItem, PlayerRepositoryError> {
        let update = Update::builder()
            .table_name(&self.table_name)
            .key("id", AttributeValue::N(update.player_id.to_string()))
            .update_expression("SET rating = :new_rating")
            .condition_expression("rating = :old_rating")
            .expression_attribute_values(
                ":new_rating",
                AttributeValue::N(update.new_rating.to_string()),
            )
            .expression_attribute_values(
                ":old_rating",
                AttributeValue::N(update.old_rating.to_string()),
            )
            .build()
            .map_err(|e| PlayerRepositoryError::Transaction(e.to_string()))?;

        Ok(TransactWriteItem::builder().update(update).build())
    }
}

#[async_trait]
impl PlayerRepository for DynamoDbPlayerRepository {
    async fn next_player_id(&self) -> Result<PlayerId, PlayerRepositoryError> {
        next_counter_value(&self.client, &self.counters_table, "players")
            .await
            .map(PlayerId)
            .map_err(PlayerRepositoryError::DynamoDb)
    }

    async fn create_player(&self, player: &Player) -> Result<(), PlayerRepositoryError> {
        match self.get_player_by_username(&player.username).await {
            Ok(_) => return Err(PlayerRepositoryError::AlreadyExists),
            Err(PlayerRepositoryError::NotFound) => {}
            Err(e) => return Err(e),
        }

        let item =
            to_item(player).map_err(|e| PlayerRepositoryError::Serialization(e.to_string()))?;
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if let SdkError::ServiceError(service_err) = &e {
                    if service_err.err().is_conditional_check_failed_exception() {
                        return Err(PlayerRepositoryError::AlreadyExists);
                    }
                }
                Err(PlayerRepositoryError::DynamoDb(e.to_string()))
            }
        }
    }

    async fn get_player(&self, player_id: PlayerId) -> Result<Player, PlayerRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::N(player_id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| PlayerRepositoryError::DynamoDb(e.to_string()))?;

        match output.item {
            Some(item) => {
                from_item(item).map_err(|e| PlayerRepositoryError::Serialization(e.to_string()))
            }
            None => Err(PlayerRepositoryError::NotFound),
        }
    }

    async fn get_player_by_username(
        &self,
        username: &str,
    ) -> Result<Player, PlayerRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(USERNAME_INDEX)
            .key_condition_expression("username = :username")
            .expression_attribute_values(":username", AttributeValue::S(username.to_string()))
            .limit(1)
            .send()
            .await
            .map_err(|e| PlayerRepositoryError::DynamoDb(e.to_string()))?;

        match output.items.and_then(|items| items.into_iter().next()) {
            Some(item) => {
                from_item(item).map_err(|e| PlayerRepositoryError::Serialization(e.to_string()))
            }
            None => Err(PlayerRepositoryError::NotFound),
        }
    }

    async fn list_players(&self) -> Result<Vec<Player>, PlayerRepositoryError> {
        let mut players = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| PlayerRepositoryError::DynamoDb(e.to_string()))?;

            for item in output.items.unwrap_or_default() {
                let player: Player = from_item(item)
                    .map_err(|e| PlayerRepositoryError::Serialization(e.to_string()))?;
                players.push(player);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(players)
    }

    async fn update_ratings(
        &self,
        a: RatingUpdate,
        b: RatingUpdate,
    ) -> Result<(), PlayerRepositoryError> {
        let transaction_items = vec![self.rating_update(a)?, self.rating_update(b)?];

        let result = self
            .client
            .transact_write_items()
            .set_transact_items(Some(transaction_items))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if let SdkError::ServiceError(service_err) = &e {
                    if service_err.err().is_transaction_canceled_exception() {
                        return Err(PlayerRepositoryError::RatingConflict(format!(
                            "ratings of players {} and {} changed concurrently",
                            a.player_id, b.player_id
                        )));
                    }
                }
                Err(PlayerRepositoryError::Transaction(e.to_string()))
            }
        }
    }
}

/// Process-local player store.
#[derive(Default)]
pub struct InMemoryPlayerRepository {
    players: RwLock<HashMap<PlayerId, Player>>,
    last_id: AtomicU64,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn next_player_id(&self) -> Result<PlayerId, PlayerRepositoryError> {
        Ok(PlayerId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1))
    }

    async fn create_player(&self, player: &Player) -> Result<(), PlayerRepositoryError> {
        let mut players = self.players.write().await;
        let taken = players.contains_key(&player.id)
            || players.values().any(|p| p.username == player.username);
        if taken {
            return Err(PlayerRepositoryError::AlreadyExists);
        }
        players.insert(player.id, player.clone());
        Ok(())
    }

    async fn get_player(&self, player_id: PlayerId) -> Result<Player, PlayerRepositoryError> {
        self.players
            .read()
            .await
            .get(&player_id)
            .cloned()
            .ok_or(PlayerRepositoryError::NotFound)
    }

    async fn get_player_by_username(
        &self,
        username: &str,
    ) -> Result<Player, PlayerRepositoryError> {
        self.players
            .read()
            .await
            .values()
            .find(|p| p.username == username)
            .cloned()
            .ok_or(PlayerRepositoryError::NotFound)
    }

    async fn list_players(&self) -> Result<Vec<Player>, PlayerRepositoryError> {
        let mut players: Vec<Player> = self.players.read().await.values().cloned().collect();
        players.sort_by_key(|p| p.id);
        Ok(players)
    }

    async fn update_ratings(
        &self,
        a: RatingUpdate,
        b: RatingUpdate,
    ) -> Result<(), PlayerRepositoryError> {
        let mut players = self.players.write().await;

        for update in [a, b] {
            let player = players
                .get(&update.player_id)
                .ok_or(PlayerRepositoryError::NotFound)?;
            if player.rating != update.old_rating {
                return Err(PlayerRepositoryError::RatingConflict(format!(
                    "player {} has rating {}, expected {}",
                    update.player_id, player.rating, update.old_rating
                )));
            }
        }

        for update in [a, b] {
            if let Some(player) = players.get_mut(&update.player_id) {
                player.rating = update.new_rating;
            }
        }
        Ok(())
    }
}
