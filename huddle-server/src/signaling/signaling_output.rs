use async_trait::async_trait;
use huddle_core::{PeerId, ServerEvent};

/// Outbound side of the transport, as seen by the router.
///
/// Delivery is fire-and-forget: implementations must not wait on the socket,
/// and a failed send never reaches the caller.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Send an event to one connection.
    async fn send_event(&self, peer_id: PeerId, event: ServerEvent);

    /// Send the same event to every listed connection.
    async fn broadcast(&self, peers: &[PeerId], event: ServerEvent) {
        for peer_id in peers {
            self.send_event(*peer_id, event.clone()).await;
        }
    }
}
