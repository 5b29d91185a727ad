//! Ordered delivery with fallback.
//!
//! A submission moves through validation, configuration checking and then
//! a primary tier and at most one fallback tier. Each tier gets exactly one attempt,
//! bounded by a timeout; the first success ends the run. If every tier
//! fails the collected attempts are returned in a single error.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::{ConfigProvider, MailSettings, EMAIL_PASS, EMAIL_USER};
use crate::envelope::Envelope;
use crate::error::{DeliveryError, TransportError};
use crate::submission::Submission;
use crate::transport::{HttpApiTransport, SmtpTransport, Transport, RESEND_API_BASE};

/// Primary plus one fallback. A submission is never attempted a third time.
pub const MAX_TIERS: usize = 2;

/// Which path an attempt was made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Primary,
    Fallback,
}

/// One position in the delivery order.
#[derive(Clone)]
pub struct Tier {
    pub route: Route,
    pub transport: Arc<dyn Transport>,
    /// Run [`Transport::verify`] before sending.
    pub verify: bool,
}

impl Tier {
    pub fn primary(transport: Arc<dyn Transport>) -> Self {
        Self {
            route: Route::Primary,
            transport,
            verify: false,
        }
    }

    pub fn fallback(transport: Arc<dyn Transport>) -> Self {
        Self {
            route: Route::Fallback,
            transport,
            verify: false,
        }
    }

    pub fn verified(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

/// Result of one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(TransportError),
}

/// Record of one transport attempt. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAttempt {
    pub transport: String,
    pub route: Route,
    pub outcome: Outcome,
}

/// Successful delivery.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Transport that delivered the message.
    pub transport: String,
    pub route: Route,
    /// Every attempt made, failures first.
    pub attempts: Vec<DeliveryAttempt>,
}

impl Receipt {
    pub fn via_fallback(&self) -> bool {
        self.route == Route::Fallback
    }

    /// Message for the submitter.
    pub fn message(&self) -> &'static str {
        if self.via_fallback() {
            "Email sent successfully (via fallback method)"
        } else {
            "Email sent successfully"
        }
    }
}

/// Builds the tier order for resolved settings.
pub trait ChainBuilder: Send + Sync {
    fn build(&self, settings: &MailSettings) -> Vec<Tier>;
}

impl<F> ChainBuilder for F
where
    F: Fn(&MailSettings) -> Vec<Tier> + Send + Sync,
{
    fn build(&self, settings: &MailSettings) -> Vec<Tier> {
        self(settings)
    }
}

/// Production order: SMTP with implicit TLS, then at most one fallback.
///
/// The fallback is the HTTP mail API when a key is configured, otherwise the
/// STARTTLS profile when `FOLIO_SMTP_FALLBACK` is enabled. With neither the
/// chain has no fallback.
#[derive(Debug, Clone)]
pub struct DefaultChain {
    client: reqwest::Client,
    api_base: String,
}

impl DefaultChain {
    /// Build the chain with one HTTP client shared by every API tier it hands out.
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            api_base: RESEND_API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl ChainBuilder for DefaultChain {
    fn build(&self, settings: &MailSettings) -> Vec<Tier> {
        let primary = SmtpTransport::implicit_tls(
            &settings.smtp_host,
            &settings.user,
            settings.password.clone(),
        )
        .with_timeout(settings.attempt_timeout);
        let mut tiers = vec![Tier::primary(Arc::new(primary)).verified(settings.verify_primary)];

        if let Some(key) = &settings.api_key {
            let api = HttpApiTransport::new(
                self.client.clone(),
                &self.api_base,
                key.clone(),
                &settings.api_sender,
            );
            tiers.push(Tier::fallback(Arc::new(api)));
        } else if settings.smtp_fallback {
            let alternate = SmtpTransport::starttls(
                &settings.smtp_host,
                &settings.user,
                settings.password.clone(),
            )
            .with_timeout(settings.attempt_timeout);
            tiers.push(Tier::fallback(Arc::new(alternate)));
        }

        tiers
    }
}

/// Submission delivery pipeline.
#[derive(Clone)]
pub struct Pipeline {
    config: Arc<dyn ConfigProvider>,
    chain: Arc<dyn ChainBuilder>,
    timeout_override: Option<Duration>,
}

impl Pipeline {
    pub fn new(config: Arc<dyn ConfigProvider>, chain: Arc<dyn ChainBuilder>) -> Self {
        Self {
            config,
            chain,
            timeout_override: None,
        }
    }

    /// Override the per-attempt timeout from configuration.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_override = Some(timeout);
        self
    }

    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// Deliver `submission` through the first transport that accepts it.
    pub async fn deliver(&self, submission: &Submission) -> Result<Receipt, DeliveryError> {
        if let Err(e) = submission.validate() {
            warn!(error = %e, details = ?e.details(), "Rejected contact submission");
            return Err(e);
        }

        let settings = match MailSettings::resolve(self.config.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                error!(
                    has_email_user = self.config.non_empty(EMAIL_USER).is_some(),
                    has_email_pass = self.config.non_empty(EMAIL_PASS).is_some(),
                    "Email configuration is missing"
                );
                return Err(e);
            }
        };
        let timeout = self.timeout_override.unwrap_or(settings.attempt_timeout);

        let mut tiers = self.chain.build(&settings);
        if tiers.len() > MAX_TIERS {
            warn!(
                tiers = tiers.len(),
                "Delivery chain has more than one fallback; extra tiers are ignored"
            );
            tiers.truncate(MAX_TIERS);
        }
        let mut attempts = Vec::with_capacity(tiers.len());

        for tier in tiers {
            let name = tier.transport.name().to_string();
            let envelope = Envelope::compose(submission, &settings, tier.route);

            match attempt(&tier, &envelope, timeout).await {
                Ok(()) => {
                    info!(transport = %name, route = ?tier.route, "Email sent");
                    attempts.push(DeliveryAttempt {
                        transport: name.clone(),
                        route: tier.route,
                        outcome: Outcome::Success,
                    });
                    return Ok(Receipt {
                        transport: name,
                        route: tier.route,
                        attempts,
                    });
                }
                Err(e) => {
                    warn!(transport = %name, route = ?tier.route, error = %e, "Email attempt failed");
                    attempts.push(DeliveryAttempt {
                        transport: name,
                        route: tier.route,
                        outcome: Outcome::Failure(e),
                    });
                }
            }
        }

        let err = DeliveryError::AllTransportsFailed { attempts };
        error!(details = ?err.details(), "Failed to send email via all methods");
        Err(err)
    }
}

async fn attempt(tier: &Tier, envelope: &Envelope, timeout: Duration) -> Result<(), TransportError> {
    let run = async {
        if tier.verify {
            tier.transport.verify().await?;
        }
        tier.transport.send(envelope).await
    };
    tokio::time::timeout(timeout, run)
        .await
        .map_err(|_| TransportError::Timeout(timeout))?
}
