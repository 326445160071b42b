use chess::{Board, BoardStatus, ChessMove, MoveGen, Piece, Square};

use crate::models::game::{EndReason, Game, GameStatus};
use crate::models::game_move::MoveRecord;
use crate::models::player::Player;
use crate::models::position::Position;
use crate::services::errors::transcript_errors::TranscriptError;
use crate::services::rule_engine::{parse_board, parse_square, promotion_piece};

const MAX_LINE_WIDTH: usize = 80;

/// Renders a game's move list as a portable text transcript.
pub trait TranscriptExporter: Send + Sync {
    fn export(
        &self,
        game: &Game,
        white: &Player,
        black: &Player,
        moves: &[MoveRecord],
    ) -> Result<String, TranscriptError>;
}

/// PGN export with SAN movetext.
#[derive(Debug, Clone, Default)]
pub struct PgnExporter;

impl PgnExporter {
    pub fn new() -> Self {
        PgnExporter
    }
}

/// Result tag value; unfinished and cancelled games read `*`.
pub fn result_marker(game: &Game) -> &'static str {
    if game.status != GameStatus::Finished {
        return "*";
    }
    match game.winner_id {
        Some(winner) if winner == game.white_id => "1-0",
        Some(_) => "0-1",
        None => "1/2-1/2",
    }
}

fn termination(game: &Game) -> &'static str {
    match (game.status, game.end_reason) {
        (GameStatus::Ongoing, _) => "unterminated",
        (_, Some(EndReason::Timeout)) => "time forfeit",
        (_, Some(EndReason::Cancelled)) | (GameStatus::Cancelled, _) => "abandoned",
        _ => "normal",
    }
}

fn piece_letter(piece: Piece) -> &'static str {
    match piece {
        Piece::Pawn => "",
        Piece::Knight => "N",
        Piece::Bishop => "B",
        Piece::Rook => "R",
        Piece::Queen => "Q",
        Piece::King => "K",
    }
}

fn file_char(square: Square) -> char {
    (b'a' + square.get_file().to_index() as u8) as char
}

fn rank_char(square: Square) -> char {
    (b'1' + square.get_rank().to_index() as u8) as char
}

fn parse_uci(board: &Board, notation: &str) -> Option<ChessMove> {
    let from = parse_square(notation.get(0..2)?).ok()?;
    let to = parse_square(notation.get(2..4)?).ok()?;
    let promotion = match notation.chars().nth(4) {
        Some(letter) => Some(promotion_piece(letter).ok()?),
        None => None,
    };
    let chess_move = ChessMove::new(from, to, promotion);
    MoveGen::new_legal(board)
        .any(|m| m == chess_move)
        .then_some(chess_move)
}

/// Standard algebraic notation of a legal move on `board`.
pub(crate) fn san(board: &Board, chess_move: ChessMove) -> String {
    let from = chess_move.get_source();
    let to = chess_move.get_dest();
    let piece = board.piece_on(from).unwrap_or(Piece::Pawn);
    let file_distance = from.get_file().to_index().abs_diff(to.get_file().to_index());

    let mut text = String::new();
    if piece == Piece::King && file_distance == 2 {
        text.push_str(if to.get_file().to_index() > from.get_file().to_index() {
            "O-O"
        } else {
            "O-O-O"
        });
    } else if piece == Piece::Pawn {
        // A diagonal pawn step is always a capture, en passant included.
        if file_distance != 0 {
            text.push(file_char(from));
            text.push('x');
        }
        text.push_str(&to.to_string());
        if let Some(promoted) = chess_move.get_promotion() {
            text.push('=');
            text.push_str(piece_letter(promoted));
        }
    } else {
        text.push_str(piece_letter(piece));

        let rivals: Vec<Square> = MoveGen::new_legal(board)
            .filter(|m| {
                m.get_dest() == to
                    && m.get_source() != from
                    && board.piece_on(m.get_source()) == Some(piece)
            })
            .map(|m| m.get_source())
            .collect();
        if !rivals.is_empty() {
            let shares_file = rivals.iter().any(|s| s.get_file() == from.get_file());
            let shares_rank = rivals.iter().any(|s| s.get_rank() == from.get_rank());
            if !shares_file {
                text.push(file_char(from));
            } else if !shares_rank {
                text.push(rank_char(from));
            } else {
                text.push(file_char(from));
                text.push(rank_char(from));
            }
        }

        if board.piece_on(to).is_some() {
            text.push('x');
        }
        text.push_str(&to.to_string());
    }

    let next = board.make_move_new(chess_move);
    if next.status() == BoardStatus::Checkmate {
        text.push('#');
    } else if next.checkers().popcnt() > 0 {
        text.push('+');
    }
    text
}

fn wrap(tokens: &[String]) -> String {
    let mut lines = Vec::new();
    let mut line = String::new();
    for token in tokens {
        if !line.is_empty() && line.len() + 1 + token.len() > MAX_LINE_WIDTH {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(token);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}

impl TranscriptExporter for PgnExporter {
    fn export(
        &self,
        game: &Game,
        white: &Player,
        black: &Player,
        moves: &[MoveRecord],
    ) -> Result<String, TranscriptError> {
        let result = result_marker(game);

        let mut board = parse_board(&Position::starting())?;
        let mut tokens = Vec::with_capacity(moves.len() * 3 / 2 + 1);
        for (index, record) in moves.iter().enumerate() {
            let chess_move =
                parse_uci(&board, &record.notation).ok_or_else(|| TranscriptError::UnplayableMove {
                    index: index + 1,
                    notation: record.notation.clone(),
                })?;
            if index % 2 == 0 {
                tokens.push(format!("{}.", index / 2 + 1));
            }
            tokens.push(san(&board, chess_move));
            board = board.make_move_new(chess_move);
        }
        tokens.push(result.to_string());

        let headers = [
            ("Event", format!("Rated {} game", game.mode)),
            ("Site", "arbiter".to_string()),
            ("Date", game.started_at.format("%Y.%m.%d").to_string()),
            ("Round", "-".to_string()),
            ("White", white.username.clone()),
            ("Black", black.username.clone()),
            ("Result", result.to_string()),
            ("WhiteElo", white.rating.to_string()),
            ("BlackElo", black.rating.to_string()),
            ("TimeControl", game.mode.time_limit().to_string()),
            ("Termination", termination(game).to_string()),
        ];

        let mut pgn = String::new();
        for (name, value) in headers {
            pgn.push_str(&format!("[{} \"{}\"]\n", name, value.replace('"', "'")));
        }
        pgn.push('\n');
        pgn.push_str(&wrap(&tokens));
        pgn.push('\n');
        Ok(pgn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::GameMode;
    use crate::models::ids::{GameId, PlayerId};
    use chrono::Utc;
    use std::str::FromStr;

    fn players() -> (Player, Player) {
        (
            Player::new(PlayerId(1), "alice"),
            Player::new(PlayerId(2), "bob"),
        )
    }

    fn records(moves: &[&str]) -> Vec<MoveRecord> {
        moves
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let mover = if i % 2 == 0 { PlayerId(1) } else { PlayerId(2) };
                MoveRecord::new(GameId(1), i as u32 + 1, mover, m, Utc::now())
            })
            .collect()
    }

    fn san_of(fen: &str, uci: &str) -> String {
        let board = Board::from_str(fen).unwrap();
        let chess_move = parse_uci(&board, uci).unwrap();
        san(&board, chess_move)
    }

    #[test]
    fn test_fools_mate_transcript() {
        let (white, black) = players();
        let mut game = Game::new(GameId(1), white.id, black.id, GameMode::Short, Utc::now());
        game.finish(Some(black.id), EndReason::Checkmate, Utc::now())
            .unwrap();

        let pgn = PgnExporter::new()
            .export(
                &game,
                &white,
                &black,
                &records(&["f2f3", "e7e5", "g2g4", "d8h4"]),
            )
            .unwrap();

        assert!(pgn.contains("[Result \"0-1\"]"));
        assert!(pgn.contains("[White \"alice\"]"));
        assert!(pgn.contains("[TimeControl \"300\"]"));
        assert!(pgn.trim_end().ends_with("1. f3 e5 2. g4 Qh4# 0-1"));
    }

    #[test]
    fn test_ongoing_game_uses_open_marker() {
        let (white, black) = players();
        let game = Game::new(GameId(1), white.id, black.id, GameMode::Long, Utc::now());

        let pgn = PgnExporter::new()
            .export(&game, &white, &black, &records(&["e2e4"]))
            .unwrap();

        assert!(pgn.contains("[Result \"*\"]"));
        assert!(pgn.contains("[Termination \"unterminated\"]"));
        assert!(pgn.trim_end().ends_with("1. e4 *"));
    }

    #[test]
    fn test_unplayable_move_is_reported() {
        let (white, black) = players();
        let game = Game::new(GameId(1), white.id, black.id, GameMode::Long, Utc::now());

        let result = PgnExporter::new().export(&game, &white, &black, &records(&["e2e4", "e2e4"]));

        assert!(matches!(
            result,
            Err(TranscriptError::UnplayableMove { index: 2, .. })
        ));
    }

    #[test]
    fn test_san_castling_and_captures() {
        assert_eq!(san_of("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1g1"), "O-O");
        assert_eq!(san_of("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1c1"), "O-O-O");
        assert_eq!(
            san_of("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2", "e4d5"),
            "exd5"
        );
    }

    #[test]
    fn test_san_disambiguation_and_promotion() {
        assert_eq!(san_of("4k3/8/8/8/8/8/4K3/R6R w - - 0 1", "a1d1"), "Rad1");
        assert_eq!(san_of("4k3/8/8/8/8/8/4K3/R6R w - - 0 1", "h1f1"), "Rhf1");
        assert_eq!(san_of("8/P7/8/8/8/8/8/K6k w - - 0 1", "a7a8q"), "a8=Q+");
    }

    #[test]
    fn test_draw_marker() {
        let (white, black) = players();
        let mut game = Game::new(GameId(1), white.id, black.id, GameMode::Short, Utc::now());
        game.finish(None, EndReason::Stalemate, Utc::now()).unwrap();

        assert_eq!(result_marker(&game), "1/2-1/2");
    }
}
