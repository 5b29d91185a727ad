//! Transport interface and implementations.
//!
//! A transport moves one [`Envelope`] to a mail service:
//! - [`SmtpTransport`]: authenticated SMTP relay (implicit TLS or STARTTLS)
//! - [`HttpApiTransport`]: JSON mail API over HTTPS

mod http_api;
mod smtp;

use async_trait::async_trait;

use crate::envelope::Envelope;
use crate::error::TransportError;

pub use http_api::{HttpApiTransport, RESEND_API_BASE};
pub use smtp::{SmtpSecurity, SmtpTransport};

/// Outbound delivery mechanism.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short name recorded on every attempt.
    fn name(&self) -> &str;

    /// Lightweight capability check run before sending, when requested.
    async fn verify(&self) -> Result<(), TransportError> {
        Ok(())
    }

    /// Deliver the envelope once.
    async fn send(&self, envelope: &Envelope) -> Result<(), TransportError>;
}
