use std::sync::Arc;
use tracing::{debug, error, info};

use crate::models::game::{EndReason, Game, GameMode};
use crate::models::game_move::MoveRecord;
use crate::models::ids::{GameId, PlayerId};
use crate::models::player::Player;
use crate::models::position::Position;
use crate::models::requests::MoveRequest;
use crate::models::responses::{
    CreateGameResponse, GameDetails, GameResultResponse, MatchResult, MoveResponse,
    PlayerSummary, ReplayResponse,
};
use crate::repositories::errors::player_repository_errors::PlayerRepositoryError;
use crate::repositories::game_repository::GameRepository;
use crate::repositories::move_repository::MoveRepository;
use crate::repositories::player_repository::PlayerRepository;
use crate::services::clock::{self, TimeSource};
use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::errors::rule_engine_errors::RuleEngineError;
use crate::services::locks::LockRegistry;
use crate::services::rating_service::RatingService;
use crate::services::rule_engine::{RuleEngine, TerminalStatus};
use crate::services::transcript::TranscriptExporter;

/// What happened to a submitted move.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    Accepted {
        position: Position,
        result: MatchResult,
        winner_id: Option<PlayerId>,
        white_time: f64,
        black_time: f64,
    },
    /// Rejected by the rules. The thinking time stays charged.
    Illegal {
        position: Position,
        message: String,
        white_time: f64,
        black_time: f64,
    },
    Timeout {
        winner_id: PlayerId,
        white_time: f64,
        black_time: f64,
    },
}

impl From<MoveOutcome> for MoveResponse {
    fn from(outcome: MoveOutcome) -> Self {
        match outcome {
            MoveOutcome::Accepted {
                position,
                result,
                winner_id,
                white_time,
                black_time,
            } => MoveResponse {
                is_valid: true,
                next_position: Some(position.to_string()),
                match_result: Some(result),
                winner_id,
                white_time,
                black_time,
                message: None,
            },
            MoveOutcome::Illegal {
                position,
                message,
                white_time,
                black_time,
            } => MoveResponse {
                is_valid: false,
                next_position: Some(position.to_string()),
                match_result: None,
                winner_id: None,
                white_time,
                black_time,
                message: Some(message),
            },
            MoveOutcome::Timeout {
                winner_id,
                white_time,
                black_time,
            } => MoveResponse {
                is_valid: false,
                next_position: None,
                match_result: Some(MatchResult::Timeout),
                winner_id: Some(winner_id),
                white_time,
                black_time,
                message: None,
            },
        }
    }
}

impl From<TerminalStatus> for MatchResult {
    fn from(status: TerminalStatus) -> Self {
        match status {
            TerminalStatus::Checkmate => MatchResult::Checkmate,
            TerminalStatus::Draw(_) => MatchResult::Draw,
            TerminalStatus::InProgress => MatchResult::InProgress,
        }
    }
}

pub fn parse_game_id(raw: &str) -> Result<GameId, GameServiceError> {
    if raw.trim().is_empty() {
        return Err(GameServiceError::MalformedInput(
            "game_id cannot be empty".to_string(),
        ));
    }
    raw.parse::<GameId>().map_err(|_| {
        GameServiceError::MalformedInput(format!("game_id '{}' is not a number", raw.trim()))
    })
}

fn parse_square(raw: &str, field: &str) -> Result<String, GameServiceError> {
    let square = raw.trim().to_ascii_lowercase();
    if square.is_empty() {
        return Err(GameServiceError::MalformedInput(format!(
            "{} cannot be empty",
            field
        )));
    }
    let bytes = square.as_bytes();
    let well_formed = bytes.len() == 2
        && (b'a'..=b'h').contains(&bytes[0])
        && (b'1'..=b'8').contains(&bytes[1]);
    if !well_formed {
        return Err(GameServiceError::MalformedInput(format!(
            "{} '{}' is not a square",
            field,
            raw.trim()
        )));
    }
    Ok(square)
}

fn parse_promotion(raw: Option<&str>) -> Result<Option<char>, GameServiceError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };
    let mut chars = raw.chars();
    match (chars.next().map(|c| c.to_ascii_lowercase()), chars.next()) {
        (Some(piece @ ('q' | 'r' | 'b' | 'n')), None) => Ok(Some(piece)),
        _ => Err(GameServiceError::MalformedInput(format!(
            "promotion '{}' must be one of q, r, b, n",
            raw
        ))),
    }
}

/// Owns the lifecycle of every match: creation, move processing with clock
/// accounting, end detection, rating settlement, and read access.
pub struct GameService {
    games: Arc<dyn GameRepository + Send + Sync>,
    moves: Arc<dyn MoveRepository + Send + Sync>,
    players: Arc<dyn PlayerRepository + Send + Sync>,
    rules: Arc<dyn RuleEngine>,
    exporter: Arc<dyn TranscriptExporter>,
    ratings: Arc<RatingService>,
    time: Arc<dyn TimeSource>,
    locks: LockRegistry<GameId>,
}

impl GameService {
    pub fn new(
        games: Arc<dyn GameRepository + Send + Sync>,
        moves: Arc<dyn MoveRepository + Send + Sync>,
        players: Arc<dyn PlayerRepository + Send + Sync>,
        rules: Arc<dyn RuleEngine>,
        exporter: Arc<dyn TranscriptExporter>,
        ratings: Arc<RatingService>,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        GameService {
            games,
            moves,
            players,
            rules,
            exporter,
            ratings,
            time,
            locks: LockRegistry::new(),
        }
    }

    pub async fn create_game(
        &self,
        white_id: PlayerId,
        black_id: PlayerId,
        mode: &str,
    ) -> Result<CreateGameResponse, GameServiceError> {
        let mode = mode
            .parse::<GameMode>()
            .map_err(|e| GameServiceError::MalformedInput(e.to_string()))?;
        if white_id == black_id {
            return Err(GameServiceError::MalformedInput(
                "A player cannot play against themself".to_string(),
            ));
        }
        self.load_player(white_id).await?;
        self.load_player(black_id).await?;

        let id = self.games.next_game_id().await?;
        let game = Game::new(id, white_id, black_id, mode, self.time.now());
        self.games.create_game(&game).await?;

        info!(game_id = %id, %white_id, %black_id, %mode, "Game created");
        Ok(CreateGameResponse {
            game_id: id,
            mode,
            time_limit: mode.time_limit(),
        })
    }

    /// Processes one move submission. At most one submission per game runs
    /// at a time.
    pub async fn submit_move(&self, request: &MoveRequest) -> Result<MoveOutcome, GameServiceError> {
        let game_id = parse_game_id(&request.game_id)?;
        let from = parse_square(&request.from, "from")?;
        let to = parse_square(&request.to, "to")?;
        let promotion = parse_promotion(request.promotion.as_deref())?;
        let hint = request
            .player_id
            .optional("player_id")
            .map_err(GameServiceError::MalformedInput)?;

        let _guard = self.locks.acquire(game_id).await;

        let mut game = self.load_game(game_id).await?;
        if !game.is_ongoing() {
            return Err(GameServiceError::InvalidState(format!(
                "Game {} is {}",
                game_id, game.status
            )));
        }

        let side = game.position.side_to_move().ok_or_else(|| {
            RuleEngineError::InvalidPosition(format!("no side to move in '{}'", game.position))
        })?;
        let mover = game.player_for(side);

        let now = self.time.now();
        let charge = clock::charge(side, game.white_time, game.black_time, game.last_move_at, now);
        game.white_time = charge.white_time;
        game.black_time = charge.black_time;

        if let Some(flagged) = charge.flagged {
            let winner_id = game.player_for(flagged.opponent());
            game.finish(Some(winner_id), EndReason::Timeout, now)?;
            self.games.update_game(&game).await?;
            info!(%game_id, %winner_id, flagged = %flagged, "Game ended on time");
            self.settle_ratings(&game).await?;
            return Ok(MoveOutcome::Timeout {
                winner_id,
                white_time: game.white_time,
                black_time: game.black_time,
            });
        }

        // A flag beats a wrong hint.
        if let Some(hint) = hint {
            if hint != mover {
                return Err(GameServiceError::InvalidState(format!(
                    "It is not player {}'s turn in game {}",
                    hint, game_id
                )));
            }
        }

        game.last_move_at = Some(charge.punched_at);

        // The rule engine is pure, so both checks run before anything is
        // written; a collaborator failure leaves the stored game untouched.
        let check = self
            .rules
            .legal_move(&game.position, &from, &to, promotion)?;
        let notation = format!(
            "{}{}{}",
            from,
            to,
            promotion.map(String::from).unwrap_or_default()
        );

        if !check.is_legal {
            self.games.update_game(&game).await?;
            info!(%game_id, %mover, %notation, "Illegal move rejected");
            return Ok(MoveOutcome::Illegal {
                position: game.position.clone(),
                message: format!("Illegal move {}", notation),
                white_time: game.white_time,
                black_time: game.black_time,
            });
        }

        let status = self.rules.terminal_status(&check.resulting_position)?;

        let record = MoveRecord::new(game_id, game.move_count + 1, mover, &notation, now);
        self.moves.append_move(&record).await?;

        game.move_count = record.id;
        game.position = check.resulting_position;
        let winner_id = match status {
            TerminalStatus::Checkmate => {
                game.finish(Some(mover), EndReason::Checkmate, now)?;
                Some(mover)
            }
            TerminalStatus::Draw(reason) => {
                game.finish(None, reason, now)?;
                None
            }
            TerminalStatus::InProgress => None,
        };
        self.games.update_game(&game).await?;
        debug!(%game_id, %mover, %notation, move_number = record.id, "Move accepted");

        if !game.is_ongoing() {
            info!(
                %game_id,
                winner_id = ?winner_id,
                end_reason = ?game.end_reason,
                "Game finished"
            );
            self.settle_ratings(&game).await?;
        }

        Ok(MoveOutcome::Accepted {
            position: game.position.clone(),
            result: status.into(),
            winner_id,
            white_time: game.white_time,
            black_time: game.black_time,
        })
    }

    /// Read-only terminal classification of an arbitrary position.
    pub fn game_result(&self, position: &str) -> Result<GameResultResponse, GameServiceError> {
        let position = position.trim();
        if position.is_empty() {
            return Err(GameServiceError::MalformedInput(
                "position cannot be empty".to_string(),
            ));
        }

        match self.rules.terminal_status(&Position::from_fen(position)) {
            Ok(status) => Ok(GameResultResponse {
                result: status.into(),
            }),
            Err(RuleEngineError::InvalidPosition(msg)) => Err(GameServiceError::MalformedInput(msg)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_game(&self, game_id: GameId) -> Result<Game, GameServiceError> {
        self.load_game(game_id).await
    }

    pub async fn get_game_details(&self, game_id: GameId) -> Result<GameDetails, GameServiceError> {
        let game = self.load_game(game_id).await?;
        let white = self.load_player(game.white_id).await?;
        let black = self.load_player(game.black_id).await?;
        let moves = self.moves.list_moves(game_id).await?;

        Ok(GameDetails {
            game_id,
            mode: game.mode,
            status: game.status,
            position: game.position.to_string(),
            white: PlayerSummary::from(&white),
            black: PlayerSummary::from(&black),
            white_time: game.white_time,
            black_time: game.black_time,
            winner_id: game.winner_id,
            end_reason: game.end_reason,
            started_at: game.started_at,
            ended_at: game.ended_at,
            moves: moves.into_iter().map(|m| m.notation).collect(),
        })
    }

    pub async fn get_replay(&self, game_id: GameId) -> Result<ReplayResponse, GameServiceError> {
        self.load_game(game_id).await?;
        let moves = self.moves.list_moves(game_id).await?;

        Ok(ReplayResponse {
            game_id,
            moves: moves.into_iter().map(|m| m.notation).collect(),
        })
    }

    pub async fn get_transcript(&self, game_id: GameId) -> Result<String, GameServiceError> {
        let game = self.load_game(game_id).await?;
        let white = self.load_player(game.white_id).await?;
        let black = self.load_player(game.black_id).await?;
        let moves = self.moves.list_moves(game_id).await?;

        Ok(self.exporter.export(&game, &white, &black, &moves)?)
    }

    /// Abandons an ongoing game. Ratings are left as they are.
    pub async fn cancel_game(&self, game_id: GameId) -> Result<Game, GameServiceError> {
        let _guard = self.locks.acquire(game_id).await;

        let mut game = self.load_game(game_id).await?;
        game.cancel(self.time.now())?;
        self.games.update_game(&game).await?;

        info!(%game_id, "Game cancelled");
        Ok(game)
    }

    async fn load_game(&self, game_id: GameId) -> Result<Game, GameServiceError> {
        self.games
            .get_game(game_id)
            .await?
            .ok_or_else(|| GameServiceError::NotFound(format!("Game {} not found", game_id)))
    }

    async fn load_player(&self, player_id: PlayerId) -> Result<Player, GameServiceError> {
        match self.players.get_player(player_id).await {
            Ok(player) => Ok(player),
            Err(PlayerRepositoryError::NotFound) => Err(GameServiceError::NotFound(format!(
                "Player {} not found",
                player_id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Rates a finished game from white's point of view. The game record is
    /// already final; a failure here leaves both ratings unchanged.
    async fn settle_ratings(&self, game: &Game) -> Result<(), GameServiceError> {
        let result_white = match game.winner_id {
            Some(winner) if winner == game.white_id => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        };

        self.ratings
            .process_match_result(game.white_id, game.black_id, result_white)
            .await
            .map(|_| ())
            .map_err(|e| {
                error!(game_id = %game.id, error = %e, "Rating settlement failed");
                GameServiceError::from(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::GameStatus;
    use crate::repositories::errors::move_repository_errors::MoveRepositoryError;
    use crate::repositories::game_repository::InMemoryGameRepository;
    use crate::repositories::move_repository::{InMemoryMoveRepository, MockMoveRepository};
    use crate::repositories::player_repository::{InMemoryPlayerRepository, MockPlayerRepository};
    use crate::services::clock::ManualTimeSource;
    use crate::services::rule_engine::{ChessRuleEngine, MockRuleEngine};
    use crate::services::transcript::PgnExporter;
    use chrono::{Duration, Utc};
    use rstest::rstest;

    struct Harness {
        service: GameService,
        games: Arc<InMemoryGameRepository>,
        time: Arc<ManualTimeSource>,
    }

    fn harness_with(
        players: Arc<dyn PlayerRepository + Send + Sync>,
        moves: Arc<dyn MoveRepository + Send + Sync>,
        rules: Arc<dyn RuleEngine>,
    ) -> Harness {
        let games = Arc::new(InMemoryGameRepository::new());
        let time = Arc::new(ManualTimeSource::new(Utc::now()));
        let service = GameService::new(
            games.clone(),
            moves,
            players.clone(),
            rules,
            Arc::new(PgnExporter::new()),
            Arc::new(RatingService::new(players)),
            time.clone(),
        );
        Harness {
            service,
            games,
            time,
        }
    }

    async fn seeded_players() -> Arc<InMemoryPlayerRepository> {
        let players = Arc::new(InMemoryPlayerRepository::new());
        for name in ["white", "black"] {
            let id = players.next_player_id().await.unwrap();
            players.create_player(&Player::new(id, name)).await.unwrap();
        }
        players
    }

    async fn harness() -> Harness {
        harness_with(
            seeded_players().await,
            Arc::new(InMemoryMoveRepository::new()),
            Arc::new(ChessRuleEngine::new()),
        )
    }

    async fn new_game(harness: &Harness) -> GameId {
        harness
            .service
            .create_game(PlayerId(1), PlayerId(2), "SHORT")
            .await
            .unwrap()
            .game_id
    }

    async fn stored(harness: &Harness, game_id: GameId) -> Game {
        harness.games.get_game(game_id).await.unwrap().unwrap()
    }

    #[rstest]
    #[case::empty_id("", "e2", "e4", None)]
    #[case::non_numeric_id("abc", "e2", "e4", None)]
    #[case::missing_from("1", "", "e4", None)]
    #[case::off_board("1", "e9", "e4", None)]
    #[case::long_square("1", "e2", "e44", None)]
    #[case::bad_promotion("1", "a7", "a8", Some("k"))]
    #[tokio::test]
    async fn test_malformed_input_rejected_before_state_access(
        #[case] game_id: &str,
        #[case] from: &str,
        #[case] to: &str,
        #[case] promotion: Option<&str>,
    ) {
        let harness = harness().await;
        let mut request = MoveRequest::new(game_id, from, to);
        request.promotion = promotion.map(str::to_string);

        let result = harness.service.submit_move(&request).await;

        assert!(matches!(result, Err(GameServiceError::MalformedInput(_))));
    }

    #[tokio::test]
    async fn test_unknown_game_is_not_found() {
        let harness = harness().await;

        let result = harness
            .service
            .submit_move(&MoveRequest::new(42, "e2", "e4"))
            .await;

        assert!(matches!(result, Err(GameServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_game_validation() {
        let harness = harness().await;

        assert!(matches!(
            harness.service.create_game(PlayerId(1), PlayerId(1), "SHORT").await,
            Err(GameServiceError::MalformedInput(_))
        ));
        assert!(matches!(
            harness.service.create_game(PlayerId(1), PlayerId(9), "SHORT").await,
            Err(GameServiceError::NotFound(_))
        ));
        assert!(harness.games.get_game(GameId(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_illegal_move_still_charges_time() {
        let harness = harness().await;
        let game_id = new_game(&harness).await;
        harness
            .service
            .submit_move(&MoveRequest::new(game_id, "e2", "e4"))
            .await
            .unwrap();
        harness.time.advance(Duration::seconds(7));

        let outcome = harness
            .service
            .submit_move(&MoveRequest::new(game_id, "e7", "e4"))
            .await
            .unwrap();

        match outcome {
            MoveOutcome::Illegal {
                black_time,
                position,
                ..
            } => {
                assert_eq!(black_time, 293.0);
                assert_eq!(position.side_to_move(), Some(crate::models::position::Side::Black));
            }
            other => panic!("Expected Illegal, got {:?}", other),
        }
        let game = stored(&harness, game_id).await;
        assert_eq!(game.black_time, 293.0);
        assert_eq!(game.move_count, 1);
        assert_eq!(game.last_move_at, Some(harness.time.now()));
    }

    #[tokio::test]
    async fn test_wrong_mover_hint_changes_nothing() {
        let harness = harness().await;
        let game_id = new_game(&harness).await;
        let before = stored(&harness, game_id).await;

        let result = harness
            .service
            .submit_move(&MoveRequest::new(game_id, "e2", "e4").by_player(PlayerId(2)))
            .await;

        assert!(matches!(result, Err(GameServiceError::InvalidState(_))));
        assert_eq!(stored(&harness, game_id).await, before);
    }

    #[tokio::test]
    async fn test_expired_clock_wins_over_wrong_mover_hint() {
        let harness = harness().await;
        let game_id = new_game(&harness).await;
        harness
            .service
            .submit_move(&MoveRequest::new(game_id, "e2", "e4"))
            .await
            .unwrap();
        harness.time.advance(Duration::seconds(400));

        let outcome = harness
            .service
            .submit_move(&MoveRequest::new(game_id, "e7", "e5").by_player(PlayerId(1)))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            MoveOutcome::Timeout {
                winner_id: PlayerId(1),
                white_time: 300.0,
                black_time: 0.0,
            }
        );
        let game = stored(&harness, game_id).await;
        assert_eq!(game.status, GameStatus::Finished);
        assert_eq!(game.end_reason, Some(EndReason::Timeout));
        assert_eq!(game.winner_id, Some(PlayerId(1)));
    }

    #[tokio::test]
    async fn test_non_numeric_mover_hint_is_malformed() {
        let harness = harness().await;
        let game_id = new_game(&harness).await;
        let mut request = MoveRequest::new(game_id, "e2", "e4");
        request.player_id = serde_json::from_str(r#""white""#).unwrap();

        let result = harness.service.submit_move(&request).await;

        assert!(matches!(result, Err(GameServiceError::MalformedInput(_))));
        assert_eq!(stored(&harness, game_id).await.move_count, 0);
    }

    #[tokio::test]
    async fn test_cancelled_game_rejects_moves() {
        let harness = harness().await;
        let game_id = new_game(&harness).await;

        let cancelled = harness.service.cancel_game(game_id).await.unwrap();
        assert_eq!(cancelled.status, GameStatus::Cancelled);

        let result = harness
            .service
            .submit_move(&MoveRequest::new(game_id, "e2", "e4"))
            .await;
        assert!(matches!(result, Err(GameServiceError::InvalidState(_))));
        assert!(matches!(
            harness.service.cancel_game(game_id).await,
            Err(GameServiceError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_promotion_is_recorded_in_notation() {
        let harness = harness().await;
        let game_id = new_game(&harness).await;
        let mut game = stored(&harness, game_id).await;
        game.position = Position::from_fen("8/P7/8/8/8/8/8/K6k w - - 0 1");
        harness.games.update_game(&game).await.unwrap();

        let outcome = harness
            .service
            .submit_move(&MoveRequest::with_promotion(game_id, "a7", "a8", "Q"))
            .await
            .unwrap();

        assert!(matches!(outcome, MoveOutcome::Accepted { .. }));
        let replay = harness.service.get_replay(game_id).await.unwrap();
        assert_eq!(replay.moves, vec!["a7a8q"]);
    }

    #[tokio::test]
    async fn test_rule_engine_failure_persists_nothing() {
        let mut rules = MockRuleEngine::new();
        rules
            .expect_legal_move()
            .returning(|_, _, _, _| Err(RuleEngineError::InvalidPosition("corrupt".to_string())));
        let harness = harness_with(
            seeded_players().await,
            Arc::new(InMemoryMoveRepository::new()),
            Arc::new(rules),
        );
        let game_id = new_game(&harness).await;
        let before = stored(&harness, game_id).await;

        let result = harness
            .service
            .submit_move(&MoveRequest::new(game_id, "e2", "e4"))
            .await;

        assert!(matches!(result, Err(GameServiceError::RuleEngine(_))));
        assert_eq!(stored(&harness, game_id).await, before);
    }

    #[tokio::test]
    async fn test_move_log_failure_persists_nothing() {
        let mut moves = MockMoveRepository::new();
        moves
            .expect_append_move()
            .returning(|_| Err(MoveRepositoryError::DynamoDb("unavailable".to_string())));
        let harness = harness_with(
            seeded_players().await,
            Arc::new(moves),
            Arc::new(ChessRuleEngine::new()),
        );
        let game_id = new_game(&harness).await;
        let before = stored(&harness, game_id).await;

        let result = harness
            .service
            .submit_move(&MoveRequest::new(game_id, "e2", "e4"))
            .await;

        assert!(matches!(result, Err(GameServiceError::PersistenceFailure(_))));
        assert_eq!(stored(&harness, game_id).await, before);
    }

    #[tokio::test]
    async fn test_rating_failure_surfaces_after_game_is_final() {
        let mut players = MockPlayerRepository::new();
        players
            .expect_get_player()
            .returning(|id| Ok(Player::new(id, &format!("player{}", id))));
        players
            .expect_update_ratings()
            .returning(|_, _| Err(PlayerRepositoryError::Transaction("aborted".to_string())));
        let harness = harness_with(
            Arc::new(players),
            Arc::new(InMemoryMoveRepository::new()),
            Arc::new(ChessRuleEngine::new()),
        );
        let game_id = new_game(&harness).await;

        let mut last = None;
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            last = Some(
                harness
                    .service
                    .submit_move(&MoveRequest::new(game_id, from, to))
                    .await,
            );
        }

        assert!(matches!(
            last,
            Some(Err(GameServiceError::PersistenceFailure(_)))
        ));
        let game = stored(&harness, game_id).await;
        assert_eq!(game.status, GameStatus::Finished);
        assert_eq!(game.winner_id, Some(PlayerId(2)));
    }

    #[tokio::test]
    async fn test_game_result_classifies_positions() {
        let harness = harness().await;

        let result = harness
            .service
            .game_result("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
        assert_eq!(result.result, MatchResult::Checkmate);

        assert!(matches!(
            harness.service.game_result("garbage"),
            Err(GameServiceError::MalformedInput(_))
        ));
        assert!(matches!(
            harness.service.game_result("  "),
            Err(GameServiceError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_outcome_to_response() {
        let response = MoveResponse::from(MoveOutcome::Timeout {
            winner_id: PlayerId(2),
            white_time: 0.0,
            black_time: 120.0,
        });

        assert!(!response.is_valid);
        assert_eq!(response.match_result, Some(MatchResult::Timeout));
        assert_eq!(response.winner_id, Some(PlayerId(2)));
        assert!(response.next_position.is_none());
    }
}
