//! End-to-end tests against a bound listener.

use std::sync::Arc;

use folio_notify::config::{EMAIL_USER, RESEND_API_KEY};
use folio_notify::{Pipeline, StaticConfig, Tier};
use folio_scene::{Backdrop, BackdropSpec};
use folio_site::{api, state::AppState};
use folio_testing::{fixed_chain, mail_config, MockTransport};
use rstest::rstest;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct SiteFixture {
    base_url: String,
    client: reqwest::Client,
    primary: Arc<MockTransport>,
    fallback: Arc<MockTransport>,
}

async fn start_site(
    config: StaticConfig,
    primary: Arc<MockTransport>,
    fallback: Arc<MockTransport>,
) -> SiteFixture {
    let pipeline = Pipeline::new(
        Arc::new(config),
        fixed_chain(vec![
            Tier::primary(primary.clone()),
            Tier::fallback(fallback.clone()),
        ]),
    );
    let backdrop = Backdrop::generate(&BackdropSpec::default());
    let app = api::create_router(AppState::new(pipeline, "test", &backdrop));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server failed");
    });

    SiteFixture {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        primary,
        fallback,
    }
}

async fn default_site() -> SiteFixture {
    start_site(
        mail_config(),
        MockTransport::accepting("primary"),
        MockTransport::accepting("fallback"),
    )
    .await
}

impl SiteFixture {
    async fn post_contact(&self, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .post(format!("{}/api/contact", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("request failed");
        let status = resp.status().as_u16();
        (status, resp.json().await.expect("body is not JSON"))
    }

    async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("request failed");
        let status = resp.status().as_u16();
        (status, resp.json().await.expect("body is not JSON"))
    }
}

fn valid_body() -> Value {
    json!({"name": "Ada", "email": "ada@example.com", "message": "Hello!"})
}

#[tokio::test]
async fn test_contact_success() {
    let site = default_site().await;

    let (status, body) = site.post_contact(valid_body()).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"message": "Email sent successfully"}));
    assert_eq!(site.primary.send_calls(), 1);
    assert_eq!(site.fallback.send_calls(), 0);
}

#[tokio::test]
async fn test_contact_fallback_success() {
    let site = start_site(
        mail_config(),
        MockTransport::failing("primary"),
        MockTransport::accepting("fallback"),
    )
    .await;

    let (status, body) = site.post_contact(valid_body()).await;

    assert_eq!(status, 200);
    assert_eq!(body["message"], "Email sent successfully (via fallback method)");
    assert_eq!(site.fallback.send_calls(), 1);
}

#[tokio::test]
async fn test_contact_all_failed() {
    let site = start_site(
        mail_config(),
        MockTransport::failing("primary"),
        MockTransport::failing("fallback"),
    )
    .await;

    let (status, body) = site.post_contact(valid_body()).await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to send email via all methods");
    assert_eq!(body["details"], "Both primary and fallback email methods failed");
    assert_eq!(site.primary.send_calls(), 1);
    assert_eq!(site.fallback.send_calls(), 1);
}

#[rstest]
#[case(json!({"email": "ada@example.com", "message": "hi"}))]
#[case(json!({"name": "Ada", "message": "hi"}))]
#[case(json!({"name": "Ada", "email": "ada@example.com", "message": ""}))]
#[tokio::test]
async fn test_contact_missing_field(#[case] body: Value) {
    let site = default_site().await;

    let (status, resp) = site.post_contact(body).await;

    assert_eq!(status, 400);
    assert_eq!(resp, json!({"error": "All fields are required"}));
    assert_eq!(site.primary.send_calls() + site.fallback.send_calls(), 0);
}

#[tokio::test]
async fn test_contact_malformed_json() {
    let site = default_site().await;

    let resp = site
        .client
        .post(format!("{}/api/contact", site.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.expect("body is not JSON");
    assert_eq!(body["error"], "Failed to process request");
    assert!(body["details"].is_string());
    assert_eq!(site.primary.send_calls(), 0);
}

#[tokio::test]
async fn test_contact_missing_configuration() {
    let site = start_site(
        StaticConfig::new().with(EMAIL_USER, "owner@example.com"),
        MockTransport::accepting("primary"),
        MockTransport::accepting("fallback"),
    )
    .await;

    let (status, body) = site.post_contact(valid_body()).await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({"error": "Email configuration is missing"}));
    assert_eq!(site.primary.send_calls(), 0);
}

#[tokio::test]
async fn test_env_check_masks_user() {
    let site = start_site(
        mail_config().with(RESEND_API_KEY, "re_secret"),
        MockTransport::accepting("primary"),
        MockTransport::accepting("fallback"),
    )
    .await;

    let (status, body) = site.get_json("/api/env-check").await;

    assert_eq!(status, 200);
    assert_eq!(body["environment"], "test");
    assert_eq!(
        body["variables"],
        json!({
            "hasEmailUser": true,
            "hasEmailPass": true,
            "hasFallbackApiKey": true,
            "emailUserMasked": "ow...@example.com",
        })
    );
    let raw = body.to_string();
    assert!(!raw.contains("app-password"));
    assert!(!raw.contains("re_secret"));
}

#[tokio::test]
async fn test_scene_home_is_animated() {
    let site = default_site().await;

    let (status, body) = site.get_json("/api/scene?section=home").await;

    assert_eq!(status, 200);
    assert_eq!(body["mode"], "animated");
    let layers = body["layers"].as_array().expect("layers array");
    assert_eq!(layers.len(), 4);
    assert_eq!(layers[1]["name"], "stars");
    assert_eq!(layers[1]["elements"].as_array().map(Vec::len), Some(100));
}

#[tokio::test]
async fn test_scene_is_stable_across_requests() {
    let site = default_site().await;

    let (_, first) = site.get_json("/api/scene").await;
    let (_, second) = site.get_json("/api/scene").await;

    assert_eq!(first, second);
    assert_eq!(first["mode"], "animated");
}

#[tokio::test]
async fn test_scene_other_section_is_still() {
    let site = default_site().await;

    let (status, body) = site.get_json("/api/scene?section=projects").await;

    assert_eq!(status, 200);
    assert_eq!(body["mode"], "still");
}

#[tokio::test]
async fn test_hero_scene() {
    let site = default_site().await;

    let (status, body) = site.get_json("/api/scene/hero").await;

    assert_eq!(status, 200);
    let elements = body["layers"][0]["elements"].as_array().expect("elements");
    assert_eq!(elements.len(), 30);
    assert_eq!(elements[0]["id"], "particle-0");
}

#[tokio::test]
async fn test_health_endpoints() {
    let site = default_site().await;

    let (status, body) = site.get_json("/healthz").await;
    assert_eq!(status, 200);
    assert_eq!(body["service"], "folio-site");

    let (status, body) = site.get_json("/readyz").await;
    assert_eq!(status, 200);
    assert_eq!(body["components"]["mail"]["status"], "ok");
}

#[tokio::test]
async fn test_readyz_degraded_without_mail() {
    let site = start_site(
        StaticConfig::new(),
        MockTransport::accepting("primary"),
        MockTransport::accepting("fallback"),
    )
    .await;

    let (status, body) = site.get_json("/readyz").await;

    assert_eq!(status, 503);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let site = default_site().await;

    let resp = site
        .client
        .get(format!("{}/livez", site.base_url))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key("x-request-id"));
}
