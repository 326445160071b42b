use std::sync::Arc;

use arbiter_shared::repositories::game_repository::{
    DynamoDbGameRepository, GameRepository, InMemoryGameRepository,
};
use arbiter_shared::repositories::move_repository::{
    DynamoDbMoveRepository, InMemoryMoveRepository, MoveRepository,
};
use arbiter_shared::repositories::player_repository::{
    DynamoDbPlayerRepository, InMemoryPlayerRepository, PlayerRepository,
};
use arbiter_shared::services::clock::{SystemTimeSource, TimeSource};
use arbiter_shared::services::game_service::GameService;
use arbiter_shared::services::lobby_service::LobbyService;
use arbiter_shared::services::matchmaking_service::MatchmakingService;
use arbiter_shared::services::player_service::PlayerService;
use arbiter_shared::services::rating_service::RatingService;
use arbiter_shared::services::rule_engine::ChessRuleEngine;
use arbiter_shared::services::transcript::PgnExporter;

use crate::config::{StoreBackend, TableNames};

#[derive(Clone)]
pub struct AppState {
    pub player_service: Arc<PlayerService>,
    pub game_service: Arc<GameService>,
    pub rating_service: Arc<RatingService>,
    pub lobby_service: Arc<LobbyService>,
    pub matchmaking_service: Arc<MatchmakingService>,
}

impl AppState {
    pub fn new(
        players: Arc<dyn PlayerRepository + Send + Sync>,
        games: Arc<dyn GameRepository + Send + Sync>,
        moves: Arc<dyn MoveRepository + Send + Sync>,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        let rating_service = Arc::new(RatingService::new(players.clone()));
        let game_service = Arc::new(GameService::new(
            games,
            moves,
            players.clone(),
            Arc::new(ChessRuleEngine::new()),
            Arc::new(PgnExporter::new()),
            rating_service.clone(),
            time.clone(),
        ));
        let lobby_service = Arc::new(LobbyService::new(players.clone(), time));
        let matchmaking_service = Arc::new(MatchmakingService::new(
            lobby_service.clone(),
            game_service.clone(),
        ));

        AppState {
            player_service: Arc::new(PlayerService::new(players)),
            game_service,
            rating_service,
            lobby_service,
            matchmaking_service,
        }
    }

    /// Everything kept in process memory; lost on restart.
    pub fn in_memory(time: Arc<dyn TimeSource>) -> Self {
        AppState::new(
            Arc::new(InMemoryPlayerRepository::new()),
            Arc::new(InMemoryGameRepository::new()),
            Arc::new(InMemoryMoveRepository::new()),
            time,
        )
    }

    pub async fn from_backend(backend: &StoreBackend) -> Self {
        match backend {
            StoreBackend::Memory => AppState::in_memory(Arc::new(SystemTimeSource)),
            StoreBackend::DynamoDb(tables) => Self::dynamodb(tables).await,
        }
    }

    async fn dynamodb(tables: &TableNames) -> Self {
        let config = aws_config::load_from_env().await;
        let client = aws_sdk_dynamodb::Client::new(&config);

        AppState::new(
            Arc::new(DynamoDbPlayerRepository::new(
                client.clone(),
                &tables.players,
                &tables.counters,
            )),
            Arc::new(DynamoDbGameRepository::new(
                client.clone(),
                &tables.games,
                &tables.counters,
            )),
            Arc::new(DynamoDbMoveRepository::new(client, &tables.moves)),
            Arc::new(SystemTimeSource),
        )
    }
}
