use huddle_core::{ClientEvent, ServerEvent};
use serde_json::json;

use crate::integration::{create_test_router, init_tracing};
use crate::utils::{connect, emit, flush};

#[tokio::test]
async fn test_relay_without_target_reports_to_sender() {
    init_tracing();

    let (router_tx, signaling) = create_test_router();
    let alice = connect(&router_tx).await.unwrap();

    emit(
        &router_tx,
        alice,
        ClientEvent::Offer {
            target: None,
            offer: json!({"sdp": "v=0"}),
        },
    )
    .await
    .unwrap();
    emit(
        &router_tx,
        alice,
        ClientEvent::IceCandidate {
            target: None,
            candidate: json!({}),
        },
    )
    .await
    .unwrap();
    flush(&router_tx).await.unwrap();

    let events = signaling.events_for(&alice).await;
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        ServerEvent::SignalError { event, .. } if event == "offer"
    ));
    assert!(matches!(
        &events[1],
        ServerEvent::SignalError { event, .. } if event == "ice-candidate"
    ));
    assert_eq!(signaling.total().await, 2);
}
