use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::ids::{GameId, PlayerId};
use crate::models::position::{Position, Side};

/// Time control of a match. Each mode grants both sides the same allotment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameMode {
    Short,
    Medium,
    Long,
}

impl GameMode {
    /// Starting clock allotment per side, in seconds.
    pub fn time_limit(&self) -> u32 {
        match self {
            GameMode::Short => 300,
            GameMode::Medium => 600,
            GameMode::Long => 1800,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Short => "SHORT",
            GameMode::Medium => "MEDIUM",
            GameMode::Long => "LONG",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGameMode(pub String);

impl fmt::Display for UnknownGameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown game mode '{}', expected one of SHORT, MEDIUM, LONG",
            self.0
        )
    }
}

impl std::error::Error for UnknownGameMode {}

impl FromStr for GameMode {
    type Err = UnknownGameMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "SHORT" => Ok(GameMode::Short),
            "MEDIUM" => Ok(GameMode::Medium),
            "LONG" => Ok(GameMode::Long),
            other => Err(UnknownGameMode(other.to_string())),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Ongoing,
    Finished,
    Cancelled,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ONGOING"),
            GameStatus::Finished => write!(f, "FINISHED"),
            GameStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Why a match left the ONGOING state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoveRule,
    Timeout,
    Cancelled,
}

/// Attempted to move a match out of a terminal status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: GameStatus,
    pub to: GameStatus,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot move game from {} to {}", self.from, self.to)
    }
}

impl std::error::Error for InvalidTransition {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub white_id: PlayerId,
    pub black_id: PlayerId,
    pub mode: GameMode,
    pub status: GameStatus,
    pub position: Position,
    pub white_time: f64,
    pub black_time: f64,
    pub last_move_at: Option<DateTime<Utc>>,
    pub winner_id: Option<PlayerId>,
    pub end_reason: Option<EndReason>,
    pub move_count: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Game {
    pub fn new(
        id: GameId,
        white_id: PlayerId,
        black_id: PlayerId,
        mode: GameMode,
        started_at: DateTime<Utc>,
    ) -> Self {
        let allotment = f64::from(mode.time_limit());
        Game {
            id,
            white_id,
            black_id,
            mode,
            status: GameStatus::Ongoing,
            position: Position::starting(),
            white_time: allotment,
            black_time: allotment,
            last_move_at: None,
            winner_id: None,
            end_reason: None,
            move_count: 0,
            started_at,
            ended_at: None,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.status == GameStatus::Ongoing
    }

    pub fn player_for(&self, side: Side) -> PlayerId {
        match side {
            Side::White => self.white_id,
            Side::Black => self.black_id,
        }
    }

    /// ONGOING -> FINISHED. A `None` winner records a draw.
    pub fn finish(
        &mut self,
        winner_id: Option<PlayerId>,
        reason: EndReason,
        at: DateTime<Utc>,
    ) -> Result<(), InvalidTransition> {
        self.leave_ongoing(GameStatus::Finished)?;
        self.winner_id = winner_id;
        self.end_reason = Some(reason);
        self.ended_at = Some(at);
        Ok(())
    }

    /// ONGOING -> CANCELLED. No winner is recorded.
    pub fn cancel(&mut self, at: DateTime<Utc>) -> Result<(), InvalidTransition> {
        self.leave_ongoing(GameStatus::Cancelled)?;
        self.winner_id = None;
        self.end_reason = Some(EndReason::Cancelled);
        self.ended_at = Some(at);
        Ok(())
    }

    fn leave_ongoing(&mut self, to: GameStatus) -> Result<(), InvalidTransition> {
        if self.status != GameStatus::Ongoing {
            return Err(InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}
