use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tokio::sync::RwLock;

use crate::models::game_move::MoveRecord;
use crate::models::ids::GameId;
use crate::repositories::errors::move_repository_errors::MoveRepositoryError;

#[cfg(test)]
use mockall::automock;

/// Append-only log of accepted moves, keyed by game and sequence number.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MoveRepository: Send + Sync {
    async fn append_move(&self, record: &MoveRecord) -> Result<(), MoveRepositoryError>;

    /// All moves of a game in the order they were played.
    async fn list_moves(&self, game_id: GameId) -> Result<Vec<MoveRecord>, MoveRepositoryError>;
}

pub struct DynamoDbMoveRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbMoveRepository {
    pub fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl MoveRepository for DynamoDbMoveRepository {
    async fn append_move(&self, record: &MoveRecord) -> Result<(), MoveRepositoryError> {
        let item = serde_dynamo::to_item(record)
            .map_err(|e| MoveRepositoryError::Serialization(e.to_string()))?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(game_id) AND attribute_not_exists(id)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if let SdkError::ServiceError(service_err) = &e {
                    if service_err.err().is_conditional_check_failed_exception() {
                        return Err(MoveRepositoryError::AlreadyExists);
                    }
                }
                Err(MoveRepositoryError::DynamoDb(e.to_string()))
            }
        }
    }

    async fn list_moves(&self, game_id: GameId) -> Result<Vec<MoveRecord>, MoveRepositoryError> {
        let mut moves = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("game_id = :game_id")
                .expression_attribute_values(":game_id", AttributeValue::N(game_id.to_string()))
                .scan_index_forward(true)
                .consistent_read(true)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| MoveRepositoryError::DynamoDb(e.to_string()))?;

            for item in output.items.unwrap_or_default() {
                let record: MoveRecord = serde_dynamo::from_item(item)
                    .map_err(|e| MoveRepositoryError::Serialization(e.to_string()))?;
                moves.push(record);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(moves)
    }
}

#[derive(Default)]
pub struct InMemoryMoveRepository {
    moves: RwLock<HashMap<GameId, Vec<MoveRecord>>>,
}

impl InMemoryMoveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MoveRepository for InMemoryMoveRepository {
    async fn append_move(&self, record: &MoveRecord) -> Result<(), MoveRepositoryError> {
        let mut moves = self.moves.write().await;
        let log = moves.entry(record.game_id).or_default();
        if log.iter().any(|m| m.id == record.id) {
            return Err(MoveRepositoryError::AlreadyExists);
        }
        log.push(record.clone());
        log.sort_by_key(|m| m.id);
        Ok(())
    }

    async fn list_moves(&self, game_id: GameId) -> Result<Vec<MoveRecord>, MoveRepositoryError> {
        Ok(self
            .moves
            .read()
            .await
            .get(&game_id)
            .cloned()
            .unwrap_or_default())
    }
}
