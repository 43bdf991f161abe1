//! Run client tests: HTTP against a fake endpoint, and in-process.

use async_trait::async_trait;
use axum::{Json, Router, http::StatusCode, routing::post};
use herald_bot::{HttpRunClient, LocalRunClient, RunClient, describe_failure};
use herald_core::{
    AutomationRequest, ContentBrief, GeneratedContent, MetaCredential, PlatformSetting,
    PlatformSettings, RequestValidator, Schedule,
};
use herald_error::{GenerationError, GenerationErrorKind, HeraldErrorKind, LoopErrorKind};
use herald_models::ContentGenerator;
use herald_server::RunOrchestrator;
use herald_social::{PublisherConfig, Publishers};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

async fn spawn_fake(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn request() -> AutomationRequest {
    let brief = ContentBrief::builder().topic("Spring launch").build().unwrap();
    let platforms = PlatformSettings::new(
        PlatformSetting::Enabled(MetaCredential::new("tok".into(), "42".into())),
        PlatformSetting::Disabled,
        PlatformSetting::Disabled,
    );
    AutomationRequest::new(brief, platforms, Schedule::new(10, false))
}

#[tokio::test]
async fn test_http_client_decodes_success() {
    let app = Router::new().route(
        "/api/agent/run",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["topic"], "Spring launch");
            assert_eq!(body["platforms"]["meta"]["enabled"], true);
            assert_eq!(body["platforms"]["instagram"]["enabled"], false);
            assert_eq!(body["schedule"]["intervalMinutes"], 15);
            assert_eq!(body["schedule"]["runNow"], false);
            Json(json!({
                "content": {"title": "T", "summary": "S", "keywords": [], "body": "B",
                            "instagramCaption": "I", "linkedinCaption": "L"},
                "platformResults": [
                    {"platform": "meta", "success": true, "message": "Posted to page feed", "externalId": "42_1"},
                    {"platform": "instagram", "success": false, "message": "instagram skipped"},
                    {"platform": "linkedin", "success": false, "message": "linkedin skipped"}
                ],
                "intervalMinutes": 15
            }))
        }),
    );
    let base = spawn_fake(app).await;
    let client = HttpRunClient::new(&base, Duration::from_secs(5)).unwrap();

    let response = client.run(&request()).await.unwrap();

    assert_eq!(response.published_count(), 1);
    assert_eq!(*response.interval_minutes(), 15);
    assert!(response.platform_results()[1].is_skipped());
}

#[tokio::test]
async fn test_http_client_decodes_invalid_payload() {
    let app = Router::new().route(
        "/api/agent/run",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"error": "Invalid payload", "details": ["topic: Required"]})),
            )
        }),
    );
    let base = spawn_fake(app).await;
    let client = HttpRunClient::new(&base, Duration::from_secs(5)).unwrap();

    let err = client.run(&request()).await.unwrap_err();

    match err.kind() {
        HeraldErrorKind::Validation(e) => assert_eq!(e.details, vec!["topic: Required"]),
        other => panic!("expected validation error, got {}", other),
    }
    assert_eq!(describe_failure(&err), "Invalid payload: topic: Required");
}

#[tokio::test]
async fn test_http_client_decodes_server_error() {
    let app = Router::new().route(
        "/api/agent/run",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Content generation failed: Generation service timed out"})),
            )
        }),
    );
    let base = spawn_fake(app).await;
    let client = HttpRunClient::new(&base, Duration::from_secs(5)).unwrap();

    let err = client.run(&request()).await.unwrap_err();

    match err.kind() {
        HeraldErrorKind::Loop(e) => assert_eq!(
            e.kind,
            LoopErrorKind::RunFailed {
                status: 500,
                message: "Content generation failed: Generation service timed out".to_string(),
            }
        ),
        other => panic!("expected loop error, got {}", other),
    }
}

struct DownGenerator;

#[async_trait]
impl ContentGenerator for DownGenerator {
    async fn generate(&self, _brief: &ContentBrief) -> Result<GeneratedContent, GenerationError> {
        Err(GenerationError::new(GenerationErrorKind::Http(
            "connection refused".to_string(),
        )))
    }
}

#[tokio::test]
async fn test_local_client_runs_through_orchestrator() {
    let publishers = Publishers::http(&PublisherConfig::default()).unwrap();
    let orchestrator =
        RunOrchestrator::new(RequestValidator::new(), Arc::new(DownGenerator), publishers);
    let client = LocalRunClient::new(orchestrator);

    let err = client.run(&request()).await.unwrap_err();

    assert_eq!(
        describe_failure(&err),
        "Generation request failed: connection refused"
    );
}
