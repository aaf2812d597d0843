mod peer;
mod room;
mod signaling;

pub use peer::PeerId;
pub use room::{DEFAULT_USERNAME, Member, RoomCode, RoomStatus};
pub use signaling::{ClientEvent, FrameError, ServerEvent};
