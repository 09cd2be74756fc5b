use axum::{Json, extract::State};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    generative: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let generative = if state.analysis.is_configured() {
        "configured"
    } else {
        "unconfigured"
    };
    info!(generative, "Health check passed");
    Json(HealthResponse {
        status: "OK".to_string(),
        generative: generative.to_string(),
    })
}
