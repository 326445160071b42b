use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::ids::PlayerId;
use crate::models::lobby::{LobbyEntry, ReadyPlayer};
use crate::repositories::errors::player_repository_errors::PlayerRepositoryError;
use crate::repositories::player_repository::PlayerRepository;
use crate::services::clock::TimeSource;
use crate::services::errors::lobby_service_errors::LobbyServiceError;

/// Players waiting to be paired, in join order. Every operation runs under
/// one mutex, so a player can never be paired and leave at the same time.
pub struct LobbyService {
    players: Arc<dyn PlayerRepository + Send + Sync>,
    time: Arc<dyn TimeSource>,
    entries: Mutex<Vec<LobbyEntry>>,
}

impl LobbyService {
    pub fn new(players: Arc<dyn PlayerRepository + Send + Sync>, time: Arc<dyn TimeSource>) -> Self {
        LobbyService {
            players,
            time,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Adds the player to the lobby. Joining twice keeps the original entry.
    pub async fn join(&self, player_id: PlayerId) -> Result<LobbyEntry, LobbyServiceError> {
        match self.players.get_player(player_id).await {
            Ok(_) => {}
            Err(PlayerRepositoryError::NotFound) => {
                return Err(LobbyServiceError::PlayerNotFound(player_id))
            }
            Err(e) => return Err(e.into()),
        }

        let mut entries = self.entries.lock().await;
        if let Some(existing) = entries.iter().find(|e| e.player_id == player_id) {
            debug!(%player_id, "Player already waiting in lobby");
            return Ok(existing.clone());
        }

        let entry = LobbyEntry::new(player_id, self.time.now());
        entries.push(entry.clone());
        info!(%player_id, waiting = entries.len(), "Player joined lobby");
        Ok(entry)
    }

    /// Removes the player if present. Returns whether an entry was removed.
    pub async fn leave(&self, player_id: PlayerId) -> bool {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|e| e.player_id != player_id);
        let removed = entries.len() < before;
        if removed {
            info!(%player_id, waiting = entries.len(), "Player left lobby");
        }
        removed
    }

    pub async fn is_waiting(&self, player_id: PlayerId) -> bool {
        self.entries
            .lock()
            .await
            .iter()
            .any(|e| e.player_id == player_id)
    }

    /// Waiting players with their profile, longest-waiting first.
    pub async fn list_waiting(&self) -> Result<Vec<ReadyPlayer>, LobbyServiceError> {
        let snapshot = self.entries.lock().await.clone();

        let mut ready = Vec::with_capacity(snapshot.len());
        for entry in snapshot {
            let player = match self.players.get_player(entry.player_id).await {
                Ok(player) => player,
                Err(PlayerRepositoryError::NotFound) => {
                    return Err(LobbyServiceError::PlayerNotFound(entry.player_id))
                }
                Err(e) => return Err(e.into()),
            };
            ready.push(ReadyPlayer {
                player_id: player.id,
                username: player.username,
                rating: player.rating,
                joined_at: entry.joined_at,
            });
        }
        Ok(ready)
    }

    /// Removes both players' entries, or neither if either is missing.
    /// The pair comes back in join order.
    pub async fn take_pair(
        &self,
        player_a_id: PlayerId,
        player_b_id: PlayerId,
    ) -> Result<(LobbyEntry, LobbyEntry), LobbyServiceError> {
        if player_a_id == player_b_id {
            return Err(LobbyServiceError::SamePlayer(player_a_id));
        }

        let mut entries = self.entries.lock().await;
        for id in [player_a_id, player_b_id] {
            if !entries.iter().any(|e| e.player_id == id) {
                return Err(LobbyServiceError::NotWaiting(id));
            }
        }

        let mut taken = Vec::with_capacity(2);
        entries.retain(|e| {
            if e.player_id == player_a_id || e.player_id == player_b_id {
                taken.push(e.clone());
                false
            } else {
                true
            }
        });

        let mut taken = taken.into_iter();
        match (taken.next(), taken.next()) {
            (Some(first), Some(second)) => {
                info!(
                    first = %first.player_id,
                    second = %second.player_id,
                    "Paired players from lobby"
                );
                Ok((first, second))
            }
            _ => Err(LobbyServiceError::NotEnoughPlayers),
        }
    }

    /// Removes the two longest-waiting players.
    pub async fn take_next_pair(&self) -> Result<(LobbyEntry, LobbyEntry), LobbyServiceError> {
        let mut entries = self.entries.lock().await;
        if entries.len() < 2 {
            return Err(LobbyServiceError::NotEnoughPlayers);
        }

        let mut pair = entries.drain(0..2);
        match (pair.next(), pair.next()) {
            (Some(first), Some(second)) => {
                info!(
                    first = %first.player_id,
                    second = %second.player_id,
                    "Paired longest-waiting players"
                );
                Ok((first, second))
            }
            _ => Err(LobbyServiceError::NotEnoughPlayers),
        }
    }

    /// Puts entries back at their original place in the queue. Players who
    /// rejoined in the meantime keep their newer entry.
    pub async fn restore(&self, restored: Vec<LobbyEntry>) {
        let mut entries = self.entries.lock().await;
        for entry in restored {
            if entries.iter().any(|e| e.player_id == entry.player_id) {
                continue;
            }
            let index = entries.partition_point(|e| e.joined_at <= entry.joined_at);
            debug!(player_id = %entry.player_id, "Restoring lobby entry");
            entries.insert(index, entry);
        }
    }
}
