use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

use super::Transport;
use crate::config::Secret;
use crate::envelope::Envelope;
use crate::error::TransportError;

/// Base URL of the hosted mail API used for the secondary tier.
pub const RESEND_API_BASE: &str = "https://api.resend.com";

const BODY_EXCERPT_LEN: usize = 200;

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

/// Mail delivery through a JSON HTTP API with bearer authentication.
///
/// The API requires a sender on a verified domain, so the envelope's `from`
/// is replaced with the configured API sender.
#[derive(Debug, Clone)]
pub struct HttpApiTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Secret,
    sender: String,
}

impl HttpApiTransport {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Secret,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpApiTransport {
    fn name(&self) -> &str {
        "http-api"
    }

    async fn send(&self, envelope: &Envelope) -> Result<(), TransportError> {
        let url = format!("{}/emails", self.base_url);
        let body = SendEmailRequest {
            from: &self.sender,
            to: [&envelope.to],
            subject: &envelope.subject,
            html: &envelope.html,
            text: &envelope.text,
        };

        debug!(url = %url, "Posting message to mail API");
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
            error!(status = %status, body = %excerpt, "Mail API rejected message");
            return Err(TransportError::Rejected(format!("{status}: {excerpt}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn envelope() -> Envelope {
        Envelope {
            from: "owner@example.com".to_string(),
            to: "owner@example.com".to_string(),
            subject: "New Contact Form Submission from Ada (Fallback)".to_string(),
            text: "Name: Ada\n".to_string(),
            html: "<p>Ada</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_posts_json_with_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer re_test"))
            .and(body_partial_json(serde_json::json!({
                "from": "site@example.dev",
                "to": ["owner@example.com"],
                "subject": "New Contact Form Submission from Ada (Fallback)",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "abc"})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpApiTransport::new(
            reqwest::Client::new(),
            server.uri(),
            Secret::new("re_test"),
            "site@example.dev",
        );
        transport.send(&envelope()).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid sender"))
            .mount(&server)
            .await;

        let transport = HttpApiTransport::new(
            reqwest::Client::new(),
            format!("{}/", server.uri()),
            Secret::new("k"),
            "a@b.dev",
        );
        let err = transport.send(&envelope()).await.unwrap_err();
        match err {
            TransportError::Rejected(msg) => {
                assert!(msg.contains("422"));
                assert!(msg.contains("invalid sender"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_is_connection_error() {
        let transport = HttpApiTransport::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9",
            Secret::new("k"),
            "a@b.dev",
        );
        let err = transport.send(&envelope()).await.unwrap_err();
        assert!(matches!(err, TransportError::Connection(_)));
    }
}
