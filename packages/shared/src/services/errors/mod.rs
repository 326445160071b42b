pub mod game_service_errors;
pub mod lobby_service_errors;
pub mod matchmaking_service_errors;
pub mod player_service_errors;
pub mod rating_service_errors;
pub mod rule_engine_errors;
pub mod transcript_errors;
