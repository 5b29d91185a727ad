use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use super::Transport;
use crate::config::Secret;
use crate::envelope::Envelope;
use crate::error::TransportError;

/// Connection security for an SMTP relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// TLS from the first byte (usually port 465).
    ImplicitTls,
    /// Plain connection upgraded with STARTTLS (usually port 587).
    StartTls,
}

/// Authenticated SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpTransport {
    name: String,
    host: String,
    port: u16,
    security: SmtpSecurity,
    user: String,
    password: Secret,
    timeout: Option<Duration>,
}

impl SmtpTransport {
    /// Relay on port 465 with implicit TLS.
    pub fn implicit_tls(host: impl Into<String>, user: impl Into<String>, password: Secret) -> Self {
        Self::new(SmtpSecurity::ImplicitTls, host, 465, user, password)
    }

    /// Relay on port 587 with STARTTLS.
    pub fn starttls(host: impl Into<String>, user: impl Into<String>, password: Secret) -> Self {
        Self::new(SmtpSecurity::StartTls, host, 587, user, password)
    }

    fn new(
        security: SmtpSecurity,
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: Secret,
    ) -> Self {
        let name = match security {
            SmtpSecurity::ImplicitTls => "smtp",
            SmtpSecurity::StartTls => "smtp-starttls",
        };
        Self {
            name: name.to_string(),
            host: host.into(),
            port,
            security,
            user: user.into(),
            password,
            timeout: None,
        }
    }

    /// Client-side socket timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn security(&self) -> SmtpSecurity {
        self.security
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn mailer(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, TransportError> {
        let builder = match self.security {
            SmtpSecurity::ImplicitTls => AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host),
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            }
        }
        .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(builder
            .port(self.port)
            .credentials(Credentials::new(
                self.user.clone(),
                self.password.expose().to_string(),
            ))
            .timeout(self.timeout)
            .build())
    }

    /// Build the MIME message for `envelope`.
    pub fn message(&self, envelope: &Envelope) -> Result<Message, TransportError> {
        let from: Mailbox = envelope
            .from
            .parse()
            .map_err(|e| TransportError::InvalidEnvelope(format!("from: {e}")))?;
        let to: Mailbox = envelope
            .to
            .parse()
            .map_err(|e| TransportError::InvalidEnvelope(format!("to: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(envelope.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                envelope.text.clone(),
                envelope.html.clone(),
            ))
            .map_err(|e| TransportError::InvalidEnvelope(e.to_string()))
    }
}

fn classify(err: lettre::transport::smtp::Error) -> TransportError {
    if err.is_permanent() {
        TransportError::Rejected(err.to_string())
    } else {
        TransportError::Connection(err.to_string())
    }
}

#[async_trait]
impl Transport for SmtpTransport {
    fn name(&self) -> &str {
        &self.name
    }

    async fn verify(&self) -> Result<(), TransportError> {
        debug!(host = %self.host, port = self.port, "Verifying SMTP relay");
        match self.mailer()?.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(TransportError::Verification(format!(
                "{}:{} did not accept the connection",
                self.host, self.port
            ))),
            Err(e) => Err(TransportError::Verification(e.to_string())),
        }
    }

    async fn send(&self, envelope: &Envelope) -> Result<(), TransportError> {
        let message = self.message(envelope)?;
        let response = self.mailer()?.send(message).await.map_err(classify)?;
        debug!(
            host = %self.host,
            port = self.port,
            code = %response.code(),
            "SMTP relay accepted message"
        );
        Ok(())
    }
}
