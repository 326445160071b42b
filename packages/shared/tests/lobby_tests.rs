mod common;

use arbiter_shared::models::ids::PlayerId;
use arbiter_shared::services::errors::lobby_service_errors::LobbyServiceError;
use arbiter_shared::services::errors::matchmaking_service_errors::MatchmakingServiceError;
use chrono::Duration;
use common::World;

#[tokio::test]
async fn test_lobby_lists_players_with_ratings_in_join_order() {
    let world = World::new();
    let ids = world.register(&["ann", "ben", "cat"]).await;
    for id in [ids[2], ids[0], ids[2], ids[1]] {
        world.lobby.join(id).await.unwrap();
        world.time.advance(Duration::seconds(3));
    }

    let waiting = world.lobby.list_waiting().await.unwrap();

    let names: Vec<&str> = waiting.iter().map(|p| p.username.as_str()).collect();
    assert_eq!(names, vec!["cat", "ann", "ben"]);
    assert!(waiting.iter().all(|p| p.rating == 1200));
    assert!(waiting[0].joined_at < waiting[1].joined_at);
}

#[tokio::test]
async fn test_paired_players_start_a_game_and_leave_lobby() {
    let world = World::new();
    let ids = world.register(&["ann", "ben"]).await;
    world.lobby.join(ids[1]).await.unwrap();
    world.time.advance(Duration::seconds(1));
    world.lobby.join(ids[0]).await.unwrap();

    let created = world.matchmaking.pair_next("SHORT").await.unwrap();

    let game = world.games.get_game(created.game_id).await.unwrap();
    assert_eq!(game.white_id, ids[1]);
    assert!(world.lobby.list_waiting().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pairing_races_with_leave_exactly_once() {
    for _ in 0..50 {
        let world = World::new();
        let ids = world.register(&["ann", "ben"]).await;
        world.lobby.join(ids[0]).await.unwrap();
        world.lobby.join(ids[1]).await.unwrap();

        let pairing = {
            let matchmaking = world.matchmaking.clone();
            let (a, b) = (ids[0], ids[1]);
            tokio::spawn(async move { matchmaking.pair(a, b, "SHORT").await })
        };
        let leaving = {
            let lobby = world.lobby.clone();
            let id = ids[1];
            tokio::spawn(async move { lobby.leave(id).await })
        };

        let paired = pairing.await.unwrap();
        let left = leaving.await.unwrap();

        // Exactly one of the two operations removed ben's entry.
        match paired {
            Ok(_) => {
                assert!(!left);
                assert!(world.lobby.list_waiting().await.unwrap().is_empty());
            }
            Err(MatchmakingServiceError::Lobby(LobbyServiceError::NotWaiting(id))) => {
                assert_eq!(id, ids[1]);
                assert!(left);
                assert!(world.lobby.is_waiting(ids[0]).await);
            }
            Err(other) => panic!("unexpected pairing error: {}", other),
        }
        assert!(!world.lobby.is_waiting(ids[1]).await);
    }
}

#[tokio::test]
async fn test_join_requires_registered_player() {
    let world = World::new();

    let result = world.lobby.join(PlayerId(77)).await;

    assert!(matches!(
        result,
        Err(LobbyServiceError::PlayerNotFound(PlayerId(77)))
    ));
}
