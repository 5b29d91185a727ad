//! Contact form delivery.
//!
//! A [`Submission`] is validated, the mail configuration is resolved through a
//! [`ConfigProvider`], and the composed [`Envelope`] is handed to an ordered
//! list of [`Transport`]s: the primary first, then each fallback, one attempt
//! apiece. Key concepts:
//!
//! - **Validation** and **configuration** failures never reach a transport
//! - **Transport** failures move on to the next tier exactly once
//! - **All failed** is a single error carrying every attempt

pub mod config;
pub mod envelope;
pub mod error;
pub mod pipeline;
pub mod submission;
pub mod transport;

pub use config::{ConfigProvider, EnvConfig, EnvReport, MailSettings, Secret, StaticConfig};
pub use envelope::Envelope;
pub use error::{DeliveryError, TransportError};
pub use pipeline::{
    ChainBuilder, DefaultChain, DeliveryAttempt, Outcome, Pipeline, Receipt, Route, Tier,
};
pub use submission::Submission;
pub use transport::{HttpApiTransport, SmtpSecurity, SmtpTransport, Transport};
