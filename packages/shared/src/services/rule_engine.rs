use chess::{BitBoard, Board, BoardStatus, ChessMove, MoveGen, Piece, Square};
use std::str::FromStr;

use crate::models::game::EndReason;
use crate::models::position::{Position, Side};
use crate::services::errors::rule_engine_errors::RuleEngineError;

#[cfg(test)]
use mockall::automock;

const DARK_SQUARES: BitBoard = BitBoard(0xAA55_AA55_AA55_AA55);
const LIGHT_SQUARES: BitBoard = BitBoard(0x55AA_55AA_55AA_55AA);

/// Halfmove clock value at which the game is drawn automatically.
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCheck {
    pub is_legal: bool,
    /// The position after the move, or the unchanged input when illegal.
    pub resulting_position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStatus {
    Checkmate,
    Draw(EndReason),
    InProgress,
}

/// Chess rules as seen by the session logic: move legality and terminal
/// classification of a position.
#[cfg_attr(test, automock)]
pub trait RuleEngine: Send + Sync {
    fn legal_move(
        &self,
        position: &Position,
        from: &str,
        to: &str,
        promotion: Option<char>,
    ) -> Result<MoveCheck, RuleEngineError>;

    fn terminal_status(&self, position: &Position) -> Result<TerminalStatus, RuleEngineError>;
}

#[derive(Debug, Clone, Default)]
pub struct ChessRuleEngine;

impl ChessRuleEngine {
    pub fn new() -> Self {
        ChessRuleEngine
    }
}

pub(crate) fn parse_board(position: &Position) -> Result<Board, RuleEngineError> {
    Board::from_str(position.as_fen())
        .map_err(|e| RuleEngineError::InvalidPosition(format!("{}: {}", position, e)))
}

pub(crate) fn parse_square(square: &str) -> Result<Square, RuleEngineError> {
    Square::from_str(square).map_err(|_| RuleEngineError::InvalidSquare(square.to_string()))
}

pub(crate) fn promotion_piece(letter: char) -> Result<Piece, RuleEngineError> {
    match letter.to_ascii_lowercase() {
        'q' => Ok(Piece::Queen),
        'r' => Ok(Piece::Rook),
        'b' => Ok(Piece::Bishop),
        'n' => Ok(Piece::Knight),
        other => Err(RuleEngineError::InvalidPromotion(other)),
    }
}

/// Applies a move that is already known to be legal and carries the move
/// counters forward, which the board's own FEN output does not track.
pub(crate) fn advance(position: &Position, board: &Board, chess_move: ChessMove) -> Position {
    let resets_halfmove = board.piece_on(chess_move.get_source()) == Some(Piece::Pawn)
        || board.piece_on(chess_move.get_dest()).is_some();
    let halfmove = if resets_halfmove {
        0
    } else {
        position.halfmove_clock() + 1
    };
    let fullmove = match position.side_to_move() {
        Some(Side::Black) => position.fullmove_number() + 1,
        _ => position.fullmove_number(),
    };

    let next = board.make_move_new(chess_move);
    Position::from_fen(format!("{}", next)).with_counters(halfmove, fullmove)
}

/// No pawns or major pieces, and either at most one minor piece or only
/// bishops that all stand on one square colour.
fn insufficient_material(board: &Board) -> bool {
    let heavy = *board.pieces(Piece::Pawn) | *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);
    if heavy.popcnt() > 0 {
        return false;
    }

    let knights = *board.pieces(Piece::Knight);
    let bishops = *board.pieces(Piece::Bishop);
    if (knights | bishops).popcnt() <= 1 {
        return true;
    }

    knights.popcnt() == 0
        && ((bishops & DARK_SQUARES).popcnt() == 0 || (bishops & LIGHT_SQUARES).popcnt() == 0)
}

impl RuleEngine for ChessRuleEngine {
    fn legal_move(
        &self,
        position: &Position,
        from: &str,
        to: &str,
        promotion: Option<char>,
    ) -> Result<MoveCheck, RuleEngineError> {
        let board = parse_board(position)?;
        let from_sq = parse_square(from)?;
        let to_sq = parse_square(to)?;
        let promotion = promotion.map(promotion_piece).transpose()?;

        let chess_move = ChessMove::new(from_sq, to_sq, promotion);
        let is_legal = MoveGen::new_legal(&board).any(|m| m == chess_move);
        if !is_legal {
            return Ok(MoveCheck {
                is_legal: false,
                resulting_position: position.clone(),
            });
        }

        Ok(MoveCheck {
            is_legal: true,
            resulting_position: advance(position, &board, chess_move),
        })
    }

    fn terminal_status(&self, position: &Position) -> Result<TerminalStatus, RuleEngineError> {
        let board = parse_board(position)?;

        Ok(match board.status() {
            BoardStatus::Checkmate => TerminalStatus::Checkmate,
            BoardStatus::Stalemate => TerminalStatus::Draw(EndReason::Stalemate),
            BoardStatus::Ongoing if insufficient_material(&board) => {
                TerminalStatus::Draw(EndReason::InsufficientMaterial)
            }
            BoardStatus::Ongoing if position.halfmove_clock() >= SEVENTY_FIVE_MOVE_PLIES => {
                TerminalStatus::Draw(EndReason::SeventyFiveMoveRule)
            }
            BoardStatus::Ongoing => TerminalStatus::InProgress,
        })
    }
}
