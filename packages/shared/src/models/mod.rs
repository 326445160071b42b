pub mod game;
pub mod game_move;
pub mod ids;
pub mod lobby;
pub mod player;
pub mod position;
pub mod requests;
pub mod responses;

pub use game::{EndReason, Game, GameMode, GameStatus};
pub use game_move::MoveRecord;
pub use ids::{GameId, PlayerId};
pub use lobby::{LobbyEntry, ReadyPlayer};
pub use player::Player;
pub use position::{Position, Side};
