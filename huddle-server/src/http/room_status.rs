use crate::http::ApiResult;
use crate::signaling::SignalingService;
use axum::Json;
use axum::extract::{Path, State};
use huddle_core::RoomStatus;

/// `GET /api/rooms/{room_code}/exists`. The code is matched case-insensitively.
pub async fn room_exists(
    Path(room_code): Path<String>,
    State(service): State<SignalingService>,
) -> ApiResult<Json<RoomStatus>> {
    let status = service.query_room(room_code).await?;
    Ok(Json(status))
}
