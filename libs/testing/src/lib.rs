//! Test doubles for the delivery pipeline.
//!
//! [`MockTransport`] counts calls and follows a scripted behavior;
//! [`mail_config`] and [`fixed_chain`] cover the usual pipeline wiring.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use folio_notify::config::{EMAIL_PASS, EMAIL_USER};
use folio_notify::{ChainBuilder, Envelope, MailSettings, StaticConfig, Tier, Transport, TransportError};

/// Scripted transport behavior.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Every send succeeds.
    Accept,
    /// Every send fails with the given error.
    Reject(TransportError),
    /// Verification fails; sends would succeed.
    FailVerify,
    /// Sends never complete.
    Hang,
}

/// Transport double with call counters.
pub struct MockTransport {
    name: String,
    behavior: Behavior,
    send_calls: AtomicUsize,
    verify_calls: AtomicUsize,
    sent: Mutex<Vec<Envelope>>,
}

impl MockTransport {
    pub fn new(name: impl Into<String>, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            behavior,
            send_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        })
    }

    /// A transport that accepts everything.
    pub fn accepting(name: impl Into<String>) -> Arc<Self> {
        Self::new(name, Behavior::Accept)
    }

    /// A transport whose sends are rejected.
    pub fn failing(name: impl Into<String>) -> Arc<Self> {
        Self::new(
            name,
            Behavior::Reject(TransportError::Rejected("mock transport configured to fail".into())),
        )
    }

    pub fn send_calls(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    /// Envelopes accepted so far.
    pub fn sent(&self) -> Vec<Envelope> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        &self.name
    }

    async fn verify(&self) -> Result<(), TransportError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::FailVerify => Err(TransportError::Verification(
                "mock transport failed verification".into(),
            )),
            _ => Ok(()),
        }
    }

    async fn send(&self, envelope: &Envelope) -> Result<(), TransportError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Reject(e) => Err(e.clone()),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
            Behavior::Accept | Behavior::FailVerify => {
                if let Ok(mut sent) = self.sent.lock() {
                    sent.push(envelope.clone());
                }
                Ok(())
            }
        }
    }
}

/// Configuration with the required mail credentials set.
pub fn mail_config() -> StaticConfig {
    StaticConfig::new()
        .with(EMAIL_USER, "owner@example.com")
        .with(EMAIL_PASS, "app-password")
}

/// Chain builder that always returns `tiers`.
pub fn fixed_chain(tiers: Vec<Tier>) -> Arc<dyn ChainBuilder> {
    Arc::new(move |_: &MailSettings| tiers.clone())
}
