use huddle_core::ServerEvent;

use crate::integration::{create_test_router, init_tracing};
use crate::utils::{connect, create_room, disconnect, flush, join_room, query};

#[tokio::test]
async fn test_peer_leaves_others_stay() {
    init_tracing();

    let (router_tx, signaling) = create_test_router();
    let alice = connect(&router_tx).await.unwrap();
    let bob = connect(&router_tx).await.unwrap();
    let carol = connect(&router_tx).await.unwrap();

    let code = create_room(&router_tx, &signaling, alice, "Alice").await.unwrap();
    join_room(&router_tx, bob, code.as_str(), "Bob").await.unwrap();
    join_room(&router_tx, carol, code.as_str(), "Carol").await.unwrap();
    signaling.clear().await;

    disconnect(&router_tx, alice).await.unwrap();
    flush(&router_tx).await.unwrap();

    for peer in [bob, carol] {
        assert_eq!(
            signaling.take_for(&peer).await,
            vec![ServerEvent::UserLeft { sid: alice }]
        );
    }
    assert!(signaling.events_for(&alice).await.is_empty());
    assert_eq!(query(&router_tx, code.as_str()).await.unwrap().user_count, 2);

    // A later joiner only sees who is still there.
    let dave = connect(&router_tx).await.unwrap();
    join_room(&router_tx, dave, code.as_str(), "Dave").await.unwrap();

    match signaling.events_for(&dave).await.as_slice() {
        [ServerEvent::RoomJoined { users, .. }] => {
            let ids: Vec<_> = users.iter().map(|u| u.socket_id).collect();
            assert_eq!(ids, vec![bob, carol, dave]);
        }
        other => panic!("expected room-joined, got {other:?}"),
    }
}
