use huddle_core::{ClientEvent, ServerEvent};

use crate::integration::{create_test_router, init_tracing};
use crate::utils::{connect, create_room, disconnect, emit, flush, join_room, query};

#[tokio::test]
async fn test_switching_rooms_is_silent_for_old_room() {
    init_tracing();

    let (router_tx, signaling) = create_test_router();
    let alice = connect(&router_tx).await.unwrap();
    let bob = connect(&router_tx).await.unwrap();
    let carol = connect(&router_tx).await.unwrap();

    let x = create_room(&router_tx, &signaling, alice, "Alice").await.unwrap();
    join_room(&router_tx, bob, x.as_str(), "Bob").await.unwrap();
    let y = create_room(&router_tx, &signaling, carol, "Carol").await.unwrap();
    signaling.clear().await;

    join_room(&router_tx, alice, y.as_str(), "Alice").await.unwrap();

    assert!(
        signaling.events_for(&bob).await.is_empty(),
        "old room peers must not be notified"
    );
    assert_eq!(
        signaling.events_for(&carol).await,
        vec![ServerEvent::UserJoined {
            socket_id: alice,
            username: "Alice".into()
        }]
    );
    assert_eq!(query(&router_tx, x.as_str()).await.unwrap().user_count, 1);
    assert_eq!(query(&router_tx, y.as_str()).await.unwrap().user_count, 2);

    // Leaving later only concerns the new room.
    signaling.clear().await;
    disconnect(&router_tx, alice).await.unwrap();
    flush(&router_tx).await.unwrap();

    assert!(signaling.events_for(&bob).await.is_empty());
    assert_eq!(
        signaling.events_for(&carol).await,
        vec![ServerEvent::UserLeft { sid: alice }]
    );
}

#[tokio::test]
async fn test_mute_only_reaches_current_room() {
    init_tracing();

    let (router_tx, signaling) = create_test_router();
    let alice = connect(&router_tx).await.unwrap();
    let bob = connect(&router_tx).await.unwrap();

    let x = create_room(&router_tx, &signaling, alice, "Alice").await.unwrap();
    join_room(&router_tx, bob, x.as_str(), "Bob").await.unwrap();
    create_room(&router_tx, &signaling, alice, "Alice").await.unwrap();
    signaling.clear().await;

    emit(&router_tx, alice, ClientEvent::MicMuted {}).await.unwrap();
    flush(&router_tx).await.unwrap();

    assert_eq!(signaling.total().await, 0);
    assert_eq!(query(&router_tx, x.as_str()).await.unwrap().user_count, 1);
}

#[tokio::test]
async fn test_failed_join_keeps_current_room() {
    init_tracing();

    let (router_tx, signaling) = create_test_router();
    let alice = connect(&router_tx).await.unwrap();
    let bob = connect(&router_tx).await.unwrap();

    let x = create_room(&router_tx, &signaling, alice, "Alice").await.unwrap();
    join_room(&router_tx, bob, x.as_str(), "Bob").await.unwrap();
    signaling.clear().await;

    join_room(&router_tx, bob, "ZZZZZZ", "Bob").await.unwrap();
    emit(&router_tx, bob, ClientEvent::MicMuted {}).await.unwrap();
    flush(&router_tx).await.unwrap();

    assert_eq!(
        signaling.events_for(&alice).await,
        vec![ServerEvent::UserMicMuted {
            socket_id: bob,
            muted: true
        }]
    );
    assert_eq!(query(&router_tx, x.as_str()).await.unwrap().user_count, 2);
}
