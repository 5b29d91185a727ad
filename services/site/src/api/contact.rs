//! Contact form relay.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use folio_notify::Submission;
use serde::Serialize;
use tracing::warn;

use crate::api::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/contact", post(submit))
}

async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<Submission>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(submission) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Unreadable contact payload");
        ApiError::bad_request("Failed to process request").with_details(rejection.body_text())
    })?;

    let receipt = state.pipeline().deliver(&submission).await?;

    Ok(Json(MessageResponse {
        message: receipt.message().to_string(),
    }))
}
