mod connection_index;
mod room_code;
mod room_registry;
mod room_state;

pub use connection_index::*;
pub use room_code::*;
pub use room_registry::*;
pub use room_state::*;
