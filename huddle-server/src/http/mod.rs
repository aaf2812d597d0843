mod api_error;
mod room_status;
mod routes;

pub use api_error::*;
pub use room_status::*;
pub use routes::*;
