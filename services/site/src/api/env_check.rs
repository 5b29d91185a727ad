//! Mail configuration presence check.
//!
//! Reports whether credentials are loaded without revealing them; the
//! account identifier is masked.

use axum::{extract::State, routing::get, Json, Router};
use folio_notify::EnvReport;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EnvCheckResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub environment: String,
    pub variables: EnvReport,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/env-check", get(env_check))
}

async fn env_check(State(state): State<AppState>) -> Json<EnvCheckResponse> {
    Json(EnvCheckResponse {
        status: "Environment Variables Check",
        message: "This endpoint checks if environment variables are properly loaded",
        environment: state.environment().to_string(),
        variables: EnvReport::inspect(state.pipeline().config()),
    })
}
