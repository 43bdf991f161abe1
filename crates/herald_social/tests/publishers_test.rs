//! Publisher tests against in-process fake Graph and LinkedIn APIs.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use herald_core::{
    Credential, GeneratedContent, InstagramCredential, LinkedInCredential, MetaCredential, Platform,
};
use herald_social::{PublisherConfig, Publishers};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// Recorded `(path, body)` pairs plus switches for failure injection.
#[derive(Clone, Default)]
struct FakeApi {
    calls: Arc<Mutex<Vec<(String, Value)>>>,
    fail_container: bool,
    fail_publish: bool,
}

impl FakeApi {
    fn record(&self, path: String, body: Value) {
        self.calls.lock().unwrap().push((path, body));
    }

    fn paths(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    fn body(&self, index: usize) -> Value {
        self.calls.lock().unwrap()[index].1.clone()
    }
}

fn graph_error(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": {"message": message, "type": "OAuthException", "code": 190}})),
    )
}

async fn feed(
    State(api): State<FakeApi>,
    Path(page_id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    api.record(format!("/{}/feed", page_id), body);
    Json(json!({"id": format!("{}_777", page_id)}))
}

async fn media(
    State(api): State<FakeApi>,
    Path(account): Path<String>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    api.record(format!("/{}/media", account), body);
    if api.fail_container {
        return graph_error("Only photo or video can be accepted as media type.").into_response();
    }
    Json(json!({"id": "container-1"})).into_response()
}

async fn media_publish(
    State(api): State<FakeApi>,
    Path(account): Path<String>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    api.record(format!("/{}/media_publish", account), body);
    if api.fail_publish {
        return graph_error("Media ID is not available").into_response();
    }
    Json(json!({"id": "ig-media-9"})).into_response()
}

async fn ugc_posts(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> axum::response::Response {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let protocol = headers
        .get("x-restli-protocol-version")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    api.record("/ugcPosts".to_string(), json!({"auth": auth, "protocol": protocol, "body": body}));

    if auth != "Bearer li-token" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid access token", "status": 401})),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        [("x-restli-id", "urn:li:share:6844785523593134080")],
        "",
    )
        .into_response()
}

async fn spawn_fake(api: FakeApi) -> String {
    let app = Router::new()
        .route("/:id/feed", post(feed))
        .route("/:id/media", post(media))
        .route("/:id/media_publish", post(media_publish))
        .route("/ugcPosts", post(ugc_posts))
        .with_state(api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn publishers(api: FakeApi) -> Publishers {
    let base = spawn_fake(api).await;
    let config = PublisherConfig::builder()
        .graph_base_url(base.clone())
        .linkedin_base_url(base)
        .build()
        .unwrap();
    Publishers::http(&config).unwrap()
}

fn content() -> GeneratedContent {
    GeneratedContent::builder()
        .title("Spring is here")
        .summary("New season, new product.")
        .body("Full article.")
        .instagram_caption("Spring! #launch")
        .linkedin_caption("We are launching this spring.")
        .build()
        .unwrap()
}

fn instagram_credential() -> Credential {
    InstagramCredential::new(
        "ig-token".to_string(),
        "1784".to_string(),
        "https://cdn.example.com/spring.jpg".to_string(),
    )
    .into()
}

#[tokio::test]
async fn test_meta_posts_composed_message_to_page_feed() {
    let api = FakeApi::default();
    let publishers = publishers(api.clone()).await;
    let credential: Credential = MetaCredential::new("page-token".into(), "1234".into()).into();

    let result = publishers
        .for_platform(Platform::Meta)
        .publish(&credential, &content())
        .await;

    assert!(*result.success(), "unexpected failure: {}", result);
    assert_eq!(result.external_id().as_deref(), Some("1234_777"));
    assert_eq!(api.paths(), vec!["/1234/feed"]);
    let body = api.body(0);
    assert_eq!(
        body["message"],
        "Spring is here\n\nNew season, new product.\n\nFull article."
    );
    assert_eq!(body["access_token"], "page-token");
}

#[tokio::test]
async fn test_instagram_creates_container_before_publishing() {
    let api = FakeApi::default();
    let publishers = publishers(api.clone()).await;

    let result = publishers
        .for_platform(Platform::Instagram)
        .publish(&instagram_credential(), &content())
        .await;

    assert!(*result.success(), "unexpected failure: {}", result);
    assert_eq!(result.external_id().as_deref(), Some("ig-media-9"));
    assert_eq!(api.paths(), vec!["/1784/media", "/1784/media_publish"]);
    assert_eq!(api.body(0)["image_url"], "https://cdn.example.com/spring.jpg");
    assert_eq!(api.body(0)["caption"], "Spring! #launch");
    assert_eq!(api.body(1)["creation_id"], "container-1");
}

#[tokio::test]
async fn test_instagram_container_failure_skips_publish_step() {
    let api = FakeApi {
        fail_container: true,
        ..FakeApi::default()
    };
    let publishers = publishers(api.clone()).await;

    let result = publishers
        .for_platform(Platform::Instagram)
        .publish(&instagram_credential(), &content())
        .await;

    assert!(!*result.success());
    assert!(result.message().contains("media container creation failed"));
    assert!(result.message().contains("Only photo or video"));
    assert_eq!(api.paths(), vec!["/1784/media"]);
}

#[tokio::test]
async fn test_instagram_publish_failure_names_the_step() {
    let api = FakeApi {
        fail_publish: true,
        ..FakeApi::default()
    };
    let publishers = publishers(api.clone()).await;

    let result = publishers
        .for_platform(Platform::Instagram)
        .publish(&instagram_credential(), &content())
        .await;

    assert!(!*result.success());
    assert!(result.message().starts_with("Instagram publish failed"));
    assert!(result.message().contains("Media ID is not available"));
    assert_eq!(api.paths().len(), 2);
}

#[tokio::test]
async fn test_linkedin_shares_with_bearer_token() {
    let api = FakeApi::default();
    let publishers = publishers(api.clone()).await;
    let credential: Credential =
        LinkedInCredential::new("li-token".into(), "urn:li:person:abc".into()).into();

    let result = publishers
        .for_platform(Platform::LinkedIn)
        .publish(&credential, &content())
        .await;

    assert!(*result.success(), "unexpected failure: {}", result);
    assert_eq!(
        result.external_id().as_deref(),
        Some("urn:li:share:6844785523593134080")
    );
    let recorded = api.body(0);
    assert_eq!(recorded["protocol"], "2.0.0");
    assert_eq!(recorded["body"]["author"], "urn:li:person:abc");
    assert_eq!(
        recorded["body"]["specificContent"]["com.linkedin.ugc.ShareContent"]["shareCommentary"]["text"],
        "We are launching this spring."
    );
}

#[tokio::test]
async fn test_linkedin_rejection_becomes_failed_result() {
    let api = FakeApi::default();
    let publishers = publishers(api.clone()).await;
    let credential: Credential =
        LinkedInCredential::new("expired".into(), "urn:li:person:abc".into()).into();

    let result = publishers
        .for_platform(Platform::LinkedIn)
        .publish(&credential, &content())
        .await;

    assert!(!*result.success());
    assert_eq!(*result.platform(), Platform::LinkedIn);
    assert!(result.message().contains("HTTP 401"));
    assert!(result.message().contains("Invalid access token"));
}

#[tokio::test]
async fn test_unreachable_endpoint_becomes_failed_result() {
    let config = PublisherConfig::builder()
        .graph_base_url("http://127.0.0.1:9")
        .build()
        .unwrap();
    let publishers = Publishers::http(&config).unwrap();
    let credential: Credential = MetaCredential::new("t".into(), "1".into()).into();

    let result = publishers
        .for_platform(Platform::Meta)
        .publish(&credential, &content())
        .await;

    assert!(!*result.success());
    assert!(result.message().contains("request failed"));
}

#[tokio::test]
async fn test_wrong_credential_is_reported_not_sent() {
    let api = FakeApi::default();
    let publishers = publishers(api.clone()).await;

    let result = publishers
        .for_platform(Platform::Meta)
        .publish(&instagram_credential(), &content())
        .await;

    assert!(!*result.success());
    assert!(result.message().contains("credential mismatch"));
    assert!(api.paths().is_empty());
}
