use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ids::PlayerId;

pub const DEFAULT_RATING: i32 = 1200;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

impl Player {
    pub fn new(id: PlayerId, username: &str) -> Self {
        Player {
            id,
            username: username.to_string(),
            rating: DEFAULT_RATING,
            created_at: Utc::now(),
        }
    }
}
