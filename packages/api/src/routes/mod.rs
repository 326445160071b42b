pub mod games;
pub mod health;
pub mod lobby;
pub mod players;
pub mod ratings;
