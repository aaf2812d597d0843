use huddle_core::{ClientEvent, PeerId, RoomStatus};
use tokio::sync::oneshot;

/// Commands fed to the router by the transport and the HTTP surface.
#[derive(Debug)]
pub enum RouterCommand {
    /// Socket opened.
    Connect { peer_id: PeerId },

    /// Parsed frame from a connected socket.
    Event { peer_id: PeerId, event: ClientEvent },

    /// Frame naming `event` whose payload did not parse.
    Rejected {
        peer_id: PeerId,
        event: String,
        reason: String,
    },

    /// Socket closed. Sent exactly once per connection.
    Disconnect { peer_id: PeerId },

    /// Room-existence check; the code is normalised by the router.
    QueryRoom {
        room_code: String,
        reply: oneshot::Sender<RoomStatus>,
    },
}
