use axum::{Json, Router, routing::get};
use marketdash_models::ApiResponse;

use crate::state::AppState;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/ping",
    responses((status = 200, description = "Service is up", body = ApiResponse<()>)),
    tag = "Health"
)]
pub async fn ping() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("pong"))
}

pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}
