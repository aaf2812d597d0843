use crate::http::room_exists;
use crate::signaling::{SignalingService, ws_handler};
use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

/// WebSocket endpoint plus the room query, open to any origin.
pub fn router(service: SignalingService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/api/rooms/{room_code}/exists", get(room_exists))
        .layer(cors)
        .with_state(service)
}
