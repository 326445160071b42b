use std::sync::Arc;
use tracing::{info, warn};

use crate::models::ids::PlayerId;
use crate::models::responses::{RatingChange, RatingDelta};
use crate::repositories::errors::player_repository_errors::PlayerRepositoryError;
use crate::repositories::player_repository::{PlayerRepository, RatingUpdate};
use crate::services::errors::rating_service_errors::RatingServiceError;
use crate::services::locks::LockRegistry;

/// Ratings below this use the smaller K-factor.
pub const K_FACTOR_THRESHOLD: i32 = 1300;

pub fn k_factor(rating: i32) -> f64 {
    if rating < K_FACTOR_THRESHOLD {
        24.0
    } else {
        32.0
    }
}

/// Expected score of a player rated `rating` against `opponent`.
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf(f64::from(opponent - rating) / 400.0))
}

/// New ratings for A and B after a game in which A scored `result_a`.
pub fn calculate_ratings(rating_a: i32, rating_b: i32, result_a: f64) -> (i32, i32) {
    let expected_a = expected_score(rating_a, rating_b);
    let expected_b = 1.0 - expected_a;
    let result_b = 1.0 - result_a;

    let new_a = f64::from(rating_a) + k_factor(rating_a) * (result_a - expected_a);
    let new_b = f64::from(rating_b) + k_factor(rating_b) * (result_b - expected_b);

    (new_a.round() as i32, new_b.round() as i32)
}

pub struct RatingService {
    players: Arc<dyn PlayerRepository + Send + Sync>,
    locks: LockRegistry<PlayerId>,
}

impl RatingService {
    pub fn new(players: Arc<dyn PlayerRepository + Send + Sync>) -> Self {
        RatingService {
            players,
            locks: LockRegistry::new(),
        }
    }

    /// Rates a finished game. `result_a` is 1.0, 0.5 or 0.0 from A's side.
    /// Both new ratings are written together or not at all.
    pub async fn process_match_result(
        &self,
        player_a_id: PlayerId,
        player_b_id: PlayerId,
        result_a: f64,
    ) -> Result<RatingChange, RatingServiceError> {
        if ![0.0, 0.5, 1.0].contains(&result_a) {
            return Err(RatingServiceError::MalformedInput(format!(
                "result_a must be 0, 0.5 or 1, got {}",
                result_a
            )));
        }
        if player_a_id == player_b_id {
            return Err(RatingServiceError::MalformedInput(
                "A player cannot be rated against themself".to_string(),
            ));
        }

        // Fixed acquisition order keeps two opposite-order calls from deadlocking.
        let (first, second) = if player_a_id < player_b_id {
            (player_a_id, player_b_id)
        } else {
            (player_b_id, player_a_id)
        };
        let _first_guard = self.locks.acquire(first).await;
        let _second_guard = self.locks.acquire(second).await;

        let rating_a = self.current_rating(player_a_id).await?;
        let rating_b = self.current_rating(player_b_id).await?;
        let (new_a, new_b) = calculate_ratings(rating_a, rating_b, result_a);

        self.players
            .update_ratings(
                RatingUpdate {
                    player_id: player_a_id,
                    old_rating: rating_a,
                    new_rating: new_a,
                },
                RatingUpdate {
                    player_id: player_b_id,
                    old_rating: rating_b,
                    new_rating: new_b,
                },
            )
            .await
            .map_err(|e| {
                warn!(%player_a_id, %player_b_id, error = %e, "Rating update failed");
                RatingServiceError::PersistenceFailure(e)
            })?;

        info!(
            %player_a_id,
            %player_b_id,
            result_a,
            rating_a,
            new_a,
            rating_b,
            new_b,
            "Ratings updated"
        );

        Ok(RatingChange {
            player_a: RatingDelta {
                player_id: player_a_id,
                old: rating_a,
                new: new_a,
            },
            player_b: RatingDelta {
                player_id: player_b_id,
                old: rating_b,
                new: new_b,
            },
        })
    }

    async fn current_rating(&self, player_id: PlayerId) -> Result<i32, RatingServiceError> {
        match self.players.get_player(player_id).await {
            Ok(player) => Ok(player.rating),
            Err(PlayerRepositoryError::NotFound) => {
                Err(RatingServiceError::PlayerNotFound(player_id))
            }
            Err(e) => Err(RatingServiceError::PersistenceFailure(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Player;
    use crate::repositories::player_repository::{InMemoryPlayerRepository, MockPlayerRepository};
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(1299, 24.0)]
    #[case(1300, 32.0)]
    #[case(800, 24.0)]
    #[case(2400, 32.0)]
    fn test_k_factor_boundary(#[case] rating: i32, #[case] expected: f64) {
        assert_eq!(k_factor(rating), expected);
    }

    #[rstest]
    #[case::underdog_wins(1200, 1400, 1.0, (1218, 1376))]
    #[case::draw(1200, 1400, 0.5, (1206, 1392))]
    #[case::favourite_wins(1400, 1200, 1.0, (1408, 1194))]
    #[case::equal_draw(1500, 1500, 0.5, (1500, 1500))]
    #[case::equal_loss(1200, 1200, 0.0, (1188, 1212))]
    fn test_calculate_ratings(
        #[case] rating_a: i32,
        #[case] rating_b: i32,
        #[case] result_a: f64,
        #[case] expected: (i32, i32),
    ) {
        assert_eq!(calculate_ratings(rating_a, rating_b, result_a), expected);
    }

    proptest! {
        #[test]
        fn prop_changes_follow_zero_sum_expectation(
            rating_a in 100i32..3000,
            rating_b in 100i32..3000,
            result_index in 0usize..3,
        ) {
            let result_a = [0.0, 0.5, 1.0][result_index];
            let (new_a, new_b) = calculate_ratings(rating_a, rating_b, result_a);

            let expected_a = expected_score(rating_a, rating_b);
            let expected_b = expected_score(rating_b, rating_a);
            prop_assert!((expected_a + expected_b - 1.0).abs() < 1e-9);

            let delta_a = f64::from(new_a - rating_a) / k_factor(rating_a);
            let delta_b = f64::from(new_b - rating_b) / k_factor(rating_b);
            // Each delta is off by at most half a point of rounding before scaling.
            let tolerance = 0.5 / 24.0 * 2.0 + 1e-9;
            prop_assert!((delta_a + delta_b).abs() <= tolerance);

            if result_a == 1.0 {
                prop_assert!(new_a >= rating_a && new_b <= rating_b);
            } else if result_a == 0.0 {
                prop_assert!(new_a <= rating_a && new_b >= rating_b);
            }
        }
    }

    async fn service_with_players() -> (RatingService, Arc<InMemoryPlayerRepository>) {
        let repository = Arc::new(InMemoryPlayerRepository::new());
        for name in ["alice", "bob"] {
            let id = repository.next_player_id().await.unwrap();
            repository
                .create_player(&Player::new(id, name))
                .await
                .unwrap();
        }
        (RatingService::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn test_process_match_result_persists_both() {
        let (service, repository) = service_with_players().await;

        let change = service
            .process_match_result(PlayerId(1), PlayerId(2), 1.0)
            .await
            .unwrap();

        assert_eq!(change.player_a.old, 1200);
        assert_eq!(change.player_a.new, 1212);
        assert_eq!(change.player_b.new, 1188);
        assert_eq!(repository.get_player(PlayerId(1)).await.unwrap().rating, 1212);
        assert_eq!(repository.get_player(PlayerId(2)).await.unwrap().rating, 1188);
    }

    #[rstest]
    #[case(0.25)]
    #[case(2.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[tokio::test]
    async fn test_invalid_result_rejected(#[case] result_a: f64) {
        let (service, _) = service_with_players().await;

        let result = service
            .process_match_result(PlayerId(1), PlayerId(2), result_a)
            .await;

        assert!(matches!(result, Err(RatingServiceError::MalformedInput(_))));
    }

    #[tokio::test]
    async fn test_self_match_rejected() {
        let (service, _) = service_with_players().await;

        let result = service
            .process_match_result(PlayerId(1), PlayerId(1), 0.5)
            .await;

        assert!(matches!(result, Err(RatingServiceError::MalformedInput(_))));
    }

    #[tokio::test]
    async fn test_unknown_player() {
        let (service, _) = service_with_players().await;

        let result = service
            .process_match_result(PlayerId(1), PlayerId(9), 0.5)
            .await;

        assert!(matches!(
            result,
            Err(RatingServiceError::PlayerNotFound(PlayerId(9)))
        ));
    }

    #[tokio::test]
    async fn test_failed_write_reports_persistence_failure() {
        let mut repository = MockPlayerRepository::new();
        repository
            .expect_get_player()
            .returning(|id| Ok(Player::new(id, &format!("player{}", id))));
        repository
            .expect_update_ratings()
            .times(1)
            .returning(|_, _| Err(PlayerRepositoryError::Transaction("boom".to_string())));
        let service = RatingService::new(Arc::new(repository));

        let result = service
            .process_match_result(PlayerId(1), PlayerId(2), 0.0)
            .await;

        assert!(matches!(
            result,
            Err(RatingServiceError::PersistenceFailure(_))
        ));
    }
}
