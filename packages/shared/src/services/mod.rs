pub mod clock;
pub mod errors;
pub mod game_service;
pub mod lobby_service;
pub mod locks;
pub mod matchmaking_service;
pub mod player_service;
pub mod rating_service;
pub mod rule_engine;
pub mod transcript;
