pub mod config;
pub mod error;
pub mod http;
pub mod room;
pub mod server;
pub mod signaling;

pub use config::*;
pub use error::*;
pub use http::router;
pub use room::*;
pub use server::*;
pub use signaling::*;
