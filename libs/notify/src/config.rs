//! Mail configuration.
//!
//! Settings are read through a [`ConfigProvider`] so the pipeline never
//! touches the process environment directly. Tests substitute a
//! [`StaticConfig`].

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use crate::error::DeliveryError;

pub const EMAIL_USER: &str = "EMAIL_USER";
pub const EMAIL_PASS: &str = "EMAIL_PASS";
pub const EMAIL_TO: &str = "EMAIL_TO";
pub const RESEND_API_KEY: &str = "RESEND_API_KEY";
pub const MAIL_FROM_API: &str = "FOLIO_MAIL_FROM_API";
pub const SMTP_HOST: &str = "FOLIO_SMTP_HOST";
pub const SMTP_FALLBACK: &str = "FOLIO_SMTP_FALLBACK";
pub const MAIL_VERIFY: &str = "FOLIO_MAIL_VERIFY";
pub const MAIL_TIMEOUT_SECS: &str = "FOLIO_MAIL_TIMEOUT_SECS";

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_API_SENDER: &str = "onboarding@resend.dev";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Source of configuration values.
pub trait ConfigProvider: Send + Sync {
    /// Raw value for `key`, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// Value for `key`, treating empty strings as unset.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl ConfigProvider for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: BTreeMap<String, String>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigProvider for StaticConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// A credential that never prints.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Resolved mail settings.
#[derive(Debug, Clone)]
pub struct MailSettings {
    /// Account identifier; also the default sender and recipient.
    pub user: String,
    pub password: Secret,
    pub recipient: String,
    pub smtp_host: String,
    /// Use the STARTTLS profile as the fallback when no API key is set.
    pub smtp_fallback: bool,
    /// Key for the HTTP mail API tier, if configured.
    pub api_key: Option<Secret>,
    pub api_sender: String,
    /// Verify the primary transport before sending.
    pub verify_primary: bool,
    /// Bound on each transport attempt.
    pub attempt_timeout: Duration,
}

impl MailSettings {
    /// Resolve settings, failing if a required key is absent.
    pub fn resolve(config: &dyn ConfigProvider) -> Result<Self, DeliveryError> {
        let user = config.non_empty(EMAIL_USER);
        let password = config.non_empty(EMAIL_PASS);

        let (user, password) = match (user, password) {
            (Some(user), Some(password)) => (user, password),
            (user, password) => {
                let mut missing = Vec::new();
                if user.is_none() {
                    missing.push(EMAIL_USER);
                }
                if password.is_none() {
                    missing.push(EMAIL_PASS);
                }
                return Err(DeliveryError::Configuration { missing });
            }
        };

        let recipient = config.non_empty(EMAIL_TO).unwrap_or_else(|| user.clone());
        let timeout_secs = parse_or(config, MAIL_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS).max(1);

        Ok(Self {
            recipient,
            smtp_host: config
                .non_empty(SMTP_HOST)
                .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_fallback: flag_or(config, SMTP_FALLBACK, false),
            api_key: config.non_empty(RESEND_API_KEY).map(Secret::new),
            api_sender: config
                .non_empty(MAIL_FROM_API)
                .unwrap_or_else(|| DEFAULT_API_SENDER.to_string()),
            verify_primary: flag_or(config, MAIL_VERIFY, false),
            attempt_timeout: Duration::from_secs(timeout_secs),
            password: Secret::new(password),
            user,
        })
    }
}

fn flag_or(config: &dyn ConfigProvider, key: &str, default: bool) -> bool {
    match config.non_empty(key) {
        None => default,
        Some(v) => match v.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                warn!(key, value = %v, default, "Unrecognized boolean setting, using default");
                default
            }
        },
    }
}

fn parse_or(config: &dyn ConfigProvider, key: &str, default: u64) -> u64 {
    match config.non_empty(key) {
        None => default,
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %v, default, "Invalid integer setting, using default");
            default
        }),
    }
}

/// Mask an address as `ab...@domain`.
pub fn mask_address(address: &str) -> String {
    match address.split_once('@') {
        Some((local, domain)) => {
            let head: String = local.chars().take(2).collect();
            format!("{head}...@{domain}")
        }
        None => {
            let head: String = address.chars().take(2).collect();
            format!("{head}...")
        }
    }
}

/// Presence report for the mail configuration. Never includes secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvReport {
    pub has_email_user: bool,
    pub has_email_pass: bool,
    pub has_fallback_api_key: bool,
    pub email_user_masked: Option<String>,
}

impl EnvReport {
    pub fn inspect(config: &dyn ConfigProvider) -> Self {
        let user = config.non_empty(EMAIL_USER);
        Self {
            has_email_user: user.is_some(),
            has_email_pass: config.non_empty(EMAIL_PASS).is_some(),
            has_fallback_api_key: config.non_empty(RESEND_API_KEY).is_some(),
            email_user_masked: user.as_deref().map(mask_address),
        }
    }
}
