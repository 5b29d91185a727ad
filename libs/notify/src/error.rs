//! Error types for submission delivery.

use std::time::Duration;

use thiserror::Error;

use crate::pipeline::DeliveryAttempt;

/// Failure of a single transport attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The pre-send capability check failed.
    #[error("verification failed: {0}")]
    Verification(String),

    /// The remote service refused the message.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The remote service could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The envelope could not be turned into a message for this transport.
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),

    /// The attempt did not finish in time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Terminal outcome of a failed delivery.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// Required submission fields are missing or blank.
    #[error("All fields are required")]
    Validation { missing: Vec<&'static str> },

    /// Required transport configuration is absent. Carries key names only.
    #[error("Email configuration is missing")]
    Configuration { missing: Vec<&'static str> },

    /// Every configured transport was tried once and failed.
    #[error("Failed to send email via all methods")]
    AllTransportsFailed { attempts: Vec<DeliveryAttempt> },
}

impl DeliveryError {
    /// Returns true if the caller can fix the problem by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, DeliveryError::Validation { .. })
    }

    /// Human-readable detail suitable for a response body.
    pub fn details(&self) -> Option<String> {
        match self {
            DeliveryError::Validation { missing } => {
                Some(format!("Missing fields: {}", missing.join(", ")))
            }
            DeliveryError::Configuration { missing } => {
                Some(format!("Missing settings: {}", missing.join(", ")))
            }
            DeliveryError::AllTransportsFailed { attempts } => Some(match attempts.len() {
                0 => "No email methods are configured".to_string(),
                1 => "Primary email method failed and no fallback is configured".to_string(),
                _ => "Both primary and fallback email methods failed".to_string(),
            }),
        }
    }
}
