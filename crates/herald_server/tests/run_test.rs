//! Orchestrator and HTTP API tests with fake collaborators.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use herald_core::{
    ContentBrief, Credential, GeneratedContent, Platform, PlatformResult, RequestValidator,
};
use herald_error::{GenerationError, GenerationErrorKind, HeraldErrorKind};
use herald_models::ContentGenerator;
use herald_server::{RUN_PATH, RunOrchestrator, create_router};
use herald_social::{Publisher, Publishers};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Barrier;
use tower::ServiceExt;

struct FakeGenerator {
    calls: AtomicUsize,
    fail: bool,
}

impl FakeGenerator {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    async fn generate(&self, brief: &ContentBrief) -> Result<GeneratedContent, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status: 429,
                message: "rate limited".to_string(),
            }));
        }
        Ok(GeneratedContent::builder()
            .title(format!("About {}", brief.topic()))
            .summary("Summary.")
            .body("Body.")
            .instagram_caption("Caption #tag")
            .linkedin_caption("Professional caption")
            .build()
            .unwrap())
    }
}

#[derive(Clone, Copy)]
enum Behavior {
    Succeed,
    Fail,
    Panic,
}

struct FakePublisher {
    platform: Platform,
    behavior: Behavior,
    calls: AtomicUsize,
    barrier: Option<Arc<Barrier>>,
}

impl FakePublisher {
    fn new(platform: Platform, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            platform,
            behavior,
            calls: AtomicUsize::new(0),
            barrier: None,
        })
    }

    fn meeting_at(platform: Platform, barrier: Arc<Barrier>) -> Arc<Self> {
        Arc::new(Self {
            platform,
            behavior: Behavior::Succeed,
            calls: AtomicUsize::new(0),
            barrier: Some(barrier),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Publisher for FakePublisher {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn publish(&self, credential: &Credential, _content: &GeneratedContent) -> PlatformResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(credential.platform(), self.platform);
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        match self.behavior {
            Behavior::Succeed => {
                PlatformResult::succeeded(self.platform, "posted", format!("{}-1", self.platform))
            }
            Behavior::Fail => PlatformResult::failed(self.platform, "HTTP 401: token expired"),
            Behavior::Panic => panic!("publisher blew up"),
        }
    }
}

struct Harness {
    generator: Arc<FakeGenerator>,
    meta: Arc<FakePublisher>,
    instagram: Arc<FakePublisher>,
    linkedin: Arc<FakePublisher>,
}

impl Harness {
    fn new(generator: Arc<FakeGenerator>, publishers: [Arc<FakePublisher>; 3]) -> Self {
        let [meta, instagram, linkedin] = publishers;
        Self {
            generator,
            meta,
            instagram,
            linkedin,
        }
    }

    fn succeeding() -> Self {
        Self::new(
            FakeGenerator::new(false),
            [
                FakePublisher::new(Platform::Meta, Behavior::Succeed),
                FakePublisher::new(Platform::Instagram, Behavior::Succeed),
                FakePublisher::new(Platform::LinkedIn, Behavior::Succeed),
            ],
        )
    }

    fn orchestrator(&self) -> RunOrchestrator {
        let publishers = Publishers::new(
            self.meta.clone(),
            self.instagram.clone(),
            self.linkedin.clone(),
        );
        RunOrchestrator::new(
            RequestValidator::with_default_media_url(Some(
                "https://cdn.example.com/default.jpg".to_string(),
            )),
            self.generator.clone(),
            publishers,
        )
    }

    fn router(&self) -> Router {
        create_router(self.orchestrator())
    }

    fn publisher_calls(&self) -> usize {
        self.meta.calls() + self.instagram.calls() + self.linkedin.calls()
    }
}

fn all_enabled() -> Value {
    json!({
        "topic": "Spring launch",
        "keywords": ["spring"],
        "platforms": {
            "meta": {"enabled": true, "accessToken": "m", "pageId": "1"},
            "instagram": {"enabled": true, "accessToken": "i", "businessAccountId": "2"},
            "linkedin": {"enabled": true, "accessToken": "l", "authorUrn": "urn:li:person:3"}
        },
        "schedule": {"intervalMinutes": 30, "runNow": true}
    })
}

async fn post_raw(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(RUN_PATH)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn post_json(app: Router, body: &Value) -> (StatusCode, Value) {
    post_raw(app, serde_json::to_string(body).unwrap()).await
}

#[tokio::test]
async fn test_end_to_end_meta_only_with_short_interval() {
    let harness = Harness::succeeding();
    let body = json!({
        "topic": "Spring launch",
        "platforms": {
            "meta": {"enabled": true, "accessToken": "m", "pageId": "1"},
            "instagram": {"enabled": false},
            "linkedin": {"enabled": false}
        },
        "schedule": {"intervalMinutes": 10, "runNow": true}
    });

    let (status, response) = post_json(harness.router(), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["intervalMinutes"], 15);
    assert_eq!(response["content"]["title"], "About Spring launch");
    let results = response["platformResults"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["platform"], "meta");
    assert_eq!(results[0]["success"], true);
    assert_eq!(results[0]["externalId"], "meta-1");
    assert_eq!(results[1]["message"], "instagram skipped");
    assert_eq!(results[2]["message"], "linkedin skipped");
    assert_eq!(harness.meta.calls(), 1);
    assert_eq!(harness.instagram.calls(), 0);
    assert_eq!(harness.linkedin.calls(), 0);
}

#[tokio::test]
async fn test_missing_topic_is_rejected_before_any_call() {
    let harness = Harness::succeeding();
    let mut body = all_enabled();
    body.as_object_mut().unwrap().remove("topic");

    let (status, response) = post_json(harness.router(), &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "Invalid payload");
    let details = response["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d.as_str().unwrap_or_default().starts_with("topic")));
    assert_eq!(harness.generator.calls(), 0);
    assert_eq!(harness.publisher_calls(), 0);
}

#[tokio::test]
async fn test_every_violation_is_listed() {
    let harness = Harness::succeeding();
    let body = json!({
        "topic": "",
        "platforms": {"linkedin": {"enabled": true, "accessToken": "l", "authorUrn": "person:3"}},
        "schedule": {"intervalMinutes": "often"}
    });

    let (status, response) = post_json(harness.router(), &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["details"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_malformed_json_is_invalid_payload() {
    let harness = Harness::succeeding();

    let (status, response) = post_raw(harness.router(), "{\"topic\": ").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "Invalid payload");
    assert_eq!(harness.generator.calls(), 0);
}

#[tokio::test]
async fn test_generation_failure_is_500_with_no_publishing() {
    let harness = Harness::new(
        FakeGenerator::new(true),
        [
            FakePublisher::new(Platform::Meta, Behavior::Succeed),
            FakePublisher::new(Platform::Instagram, Behavior::Succeed),
            FakePublisher::new(Platform::LinkedIn, Behavior::Succeed),
        ],
    );

    let (status, response) = post_json(harness.router(), &all_enabled()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response["error"].as_str().unwrap().contains("rate limited"));
    assert_eq!(harness.generator.calls(), 1);
    assert_eq!(harness.publisher_calls(), 0);
}

#[tokio::test]
async fn test_all_disabled_yields_three_skips() {
    let harness = Harness::succeeding();
    let body = json!({"topic": "Quiet week"});

    let response = harness.orchestrator().run(&body).await.unwrap();

    let results = response.platform_results();
    assert_eq!(results.len(), 3);
    for (result, platform) in results.iter().zip(Platform::ALL) {
        assert_eq!(*result.platform(), platform);
        assert!(!*result.success());
        assert!(result.is_skipped());
    }
    assert_eq!(harness.generator.calls(), 1);
    assert_eq!(harness.publisher_calls(), 0);
    assert_eq!(*response.interval_minutes(), 60);
}

#[tokio::test]
async fn test_one_failure_does_not_affect_siblings() {
    let harness = Harness::new(
        FakeGenerator::new(false),
        [
            FakePublisher::new(Platform::Meta, Behavior::Succeed),
            FakePublisher::new(Platform::Instagram, Behavior::Fail),
            FakePublisher::new(Platform::LinkedIn, Behavior::Panic),
        ],
    );

    let response = harness.orchestrator().run(&all_enabled()).await.unwrap();

    let results = response.platform_results();
    assert!(*results[0].success());
    assert!(!*results[1].success());
    assert_eq!(results[1].message(), "HTTP 401: token expired");
    assert!(!*results[2].success());
    assert!(results[2].message().contains("publish task aborted"));
    assert_eq!(response.published_count(), 1);
}

#[tokio::test]
async fn test_publishers_run_concurrently() {
    let barrier = Arc::new(Barrier::new(3));
    let harness = Harness::new(
        FakeGenerator::new(false),
        [
            FakePublisher::meeting_at(Platform::Meta, barrier.clone()),
            FakePublisher::meeting_at(Platform::Instagram, barrier.clone()),
            FakePublisher::meeting_at(Platform::LinkedIn, barrier),
        ],
    );

    // Each publisher waits until all three are in flight; a sequential
    // fan-out would never get past the first one.
    let response = tokio::time::timeout(
        Duration::from_secs(5),
        harness.orchestrator().run(&all_enabled()),
    )
    .await
    .expect("fan-out stalled")
    .unwrap();

    assert_eq!(response.published_count(), 3);
}

#[tokio::test]
async fn test_orchestrator_surfaces_validation_kind() {
    let harness = Harness::succeeding();

    let err = harness
        .orchestrator()
        .run(&json!(["not", "an", "object"]))
        .await
        .unwrap_err();

    match err.kind() {
        HeraldErrorKind::Validation(e) => assert!(e.mentions("body")),
        other => panic!("expected validation error, got {}", other),
    }
}

#[tokio::test]
async fn test_health_check() {
    let harness = Harness::succeeding();
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let resp = harness.router().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}
