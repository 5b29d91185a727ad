use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_notify::DeliveryError;
use serde::Serialize;

/// Error body returned to the contact form.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
                details: None,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.body.details = Some(details.into());
        self
    }
}

impl From<DeliveryError> for ApiError {
    fn from(err: DeliveryError) -> Self {
        match &err {
            // The form shows the summary only.
            DeliveryError::Validation { .. } => Self::bad_request(err.to_string()),
            DeliveryError::Configuration { .. } => Self::internal(err.to_string()),
            DeliveryError::AllTransportsFailed { .. } => {
                let api = Self::internal(err.to_string());
                match err.details() {
                    Some(details) => api.with_details(details),
                    None => api,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
