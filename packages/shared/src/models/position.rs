use serde::{Deserialize, Serialize};
use std::fmt;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// A board position in FEN notation.
///
/// The string is stored as given; legality of the layout is the rule engine's
/// concern. The accessors only read the metadata fields that the session
/// logic needs (side to move and move counters).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(String);

impl Position {
    pub fn starting() -> Self {
        Position(STARTING_FEN.to_string())
    }

    pub fn from_fen(fen: impl Into<String>) -> Self {
        Position(fen.into().trim().to_string())
    }

    pub fn as_fen(&self) -> &str {
        &self.0
    }

    fn field(&self, index: usize) -> Option<&str> {
        self.0.split_whitespace().nth(index)
    }

    /// Side whose move is legal next, read from the turn indicator.
    pub fn side_to_move(&self) -> Option<Side> {
        match self.field(1)? {
            "w" => Some(Side::White),
            "b" => Some(Side::Black),
            _ => None,
        }
    }

    /// Plies since the last capture or pawn move. Missing counters read as 0.
    pub fn halfmove_clock(&self) -> u32 {
        self.field(4).and_then(|s| s.parse().ok()).unwrap_or(0)
    }

    /// Missing counters read as 1.
    pub fn fullmove_number(&self) -> u32 {
        self.field(5).and_then(|s| s.parse().ok()).unwrap_or(1)
    }

    /// Returns the position with its two move counters replaced.
    pub fn with_counters(&self, halfmove_clock: u32, fullmove_number: u32) -> Position {
        let head: Vec<&str> = self.0.split_whitespace().take(4).collect();
        Position(format!(
            "{} {} {}",
            head.join(" "),
            halfmove_clock,
            fullmove_number
        ))
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::starting()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
