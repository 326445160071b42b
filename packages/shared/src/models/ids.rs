use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Numeric identifier of a registered player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

/// Numeric identifier of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(PlayerId)
    }
}

impl FromStr for GameId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(GameId)
    }
}

impl From<u64> for PlayerId {
    fn from(value: u64) -> Self {
        PlayerId(value)
    }
}

impl From<u64> for GameId {
    fn from(value: u64) -> Self {
        GameId(value)
    }
}

/// Parses a player id supplied by a client, naming `field` in the error.
pub fn parse_player_id(raw: &str, field: &str) -> Result<PlayerId, String> {
    if raw.trim().is_empty() {
        return Err(format!("{} cannot be empty", field));
    }
    raw.parse::<PlayerId>()
        .map_err(|_| format!("{} '{}' is not a player id", field, raw.trim()))
}

/// A player id as it arrives in a request body: a JSON number, a numeric
/// string, or anything else. Kept unparsed so a bad value is reported as
/// malformed input rather than failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPlayerId(Value);

impl RawPlayerId {
    pub fn is_absent(&self) -> bool {
        self.0.is_null()
    }

    pub fn parse(&self, field: &str) -> Result<PlayerId, String> {
        match &self.0 {
            Value::Null => Err(format!("{} is required", field)),
            Value::String(raw) => parse_player_id(raw, field),
            Value::Number(number) => number
                .as_u64()
                .map(PlayerId)
                .ok_or_else(|| format!("{} {} is not a player id", field, number)),
            other => Err(format!("{} {} is not a player id", field, other)),
        }
    }

    /// `None` when the field was left out or null.
    pub fn optional(&self, field: &str) -> Result<Option<PlayerId>, String> {
        if self.is_absent() {
            Ok(None)
        } else {
            self.parse(field).map(Some)
        }
    }
}

impl From<PlayerId> for RawPlayerId {
    fn from(id: PlayerId) -> Self {
        RawPlayerId(Value::from(id.0))
    }
}
