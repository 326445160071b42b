#![allow(dead_code)]

use std::sync::Arc;

use arbiter_shared::models::ids::PlayerId;
use arbiter_shared::repositories::game_repository::InMemoryGameRepository;
use arbiter_shared::repositories::move_repository::InMemoryMoveRepository;
use arbiter_shared::repositories::player_repository::InMemoryPlayerRepository;
use arbiter_shared::services::clock::ManualTimeSource;
use arbiter_shared::services::game_service::GameService;
use arbiter_shared::services::lobby_service::LobbyService;
use arbiter_shared::services::matchmaking_service::MatchmakingService;
use arbiter_shared::services::player_service::PlayerService;
use arbiter_shared::services::rating_service::RatingService;
use arbiter_shared::services::rule_engine::ChessRuleEngine;
use arbiter_shared::services::transcript::PgnExporter;
use chrono::{DateTime, Utc};

/// Every service wired over in-memory stores and a manually driven clock.
pub struct World {
    pub players: Arc<InMemoryPlayerRepository>,
    pub game_store: Arc<InMemoryGameRepository>,
    pub time: Arc<ManualTimeSource>,
    pub player_service: PlayerService,
    pub ratings: Arc<RatingService>,
    pub games: Arc<GameService>,
    pub lobby: Arc<LobbyService>,
    pub matchmaking: MatchmakingService,
}

pub fn start_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_750_000_000, 0).unwrap()
}

impl World {
    pub fn new() -> Self {
        let players = Arc::new(InMemoryPlayerRepository::new());
        let game_store = Arc::new(InMemoryGameRepository::new());
        let time = Arc::new(ManualTimeSource::new(start_time()));
        let ratings = Arc::new(RatingService::new(players.clone()));
        let games = Arc::new(GameService::new(
            game_store.clone(),
            Arc::new(InMemoryMoveRepository::new()),
            players.clone(),
            Arc::new(ChessRuleEngine::new()),
            Arc::new(PgnExporter::new()),
            ratings.clone(),
            time.clone(),
        ));
        let lobby = Arc::new(LobbyService::new(players.clone(), time.clone()));

        World {
            player_service: PlayerService::new(players.clone()),
            matchmaking: MatchmakingService::new(lobby.clone(), games.clone()),
            players,
            game_store,
            time,
            ratings,
            games,
            lobby,
        }
    }

    pub async fn register(&self, names: &[&str]) -> Vec<PlayerId> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            ids.push(self.player_service.register_player(name).await.unwrap().id);
        }
        ids
    }
}
