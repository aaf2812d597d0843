mod router_command;
mod signaling_output;
mod signaling_router;
mod signaling_service;
mod ws_handler;

pub use router_command::*;
pub use signaling_output::*;
pub use signaling_router::*;
pub use signaling_service::*;
pub use ws_handler::*;
