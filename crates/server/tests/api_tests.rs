//! Router integration tests
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use precis_core::{
    ArticleService, BatchConfig, CompletionRequest, ContentSource, LanguageModel, PrecisConfig, PrecisError, Result,
};
use precis_server::{AppState, create_router};
use serde_json::Value;
use tower::ServiceExt;

#[derive(Default)]
struct StubSource {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

#[async_trait]
impl ContentSource for StubSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| PrecisError::HttpStatus { status: 500, url: url.to_string() })
    }
}

#[derive(Default)]
struct StubModel {
    calls: AtomicUsize,
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if request.prompt.contains("unsummarizable") {
            return Err(PrecisError::LlmError { status: 500, message: "upstream".to_string() });
        }
        Ok("Greeting.".to_string())
    }
}

struct Harness {
    source: Arc<StubSource>,
    model: Arc<StubModel>,
    app: axum::Router,
}

fn harness(batch: BatchConfig) -> Harness {
    let mut pages = HashMap::new();
    pages.insert("http://a.test/1".to_string(), "Hello world.".to_string());
    pages.insert("http://a.test/3".to_string(), "unsummarizable".to_string());

    let source = Arc::new(StubSource { pages, ..Default::default() });
    let model = Arc::new(StubModel::default());
    let service = ArticleService::new(source.clone(), model.clone(), &PrecisConfig::default());
    let app = create_router(AppState::new(service, batch));

    Harness { source, model, app }
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_summarize_keeps_input_order() {
    let harness = harness(BatchConfig::default());
    let body = "article_urls%5B%5D=http%3A%2F%2Fa.test%2F1&article_urls%5B%5D=http%3A%2F%2Fbad.test%2F2";

    let response = harness.app.oneshot(form_request("/summarize", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(
        json,
        serde_json::json!({"summaries": ["Greeting.", "Error fetching articles from http://bad.test/2"]})
    );
}

#[tokio::test]
async fn test_summarize_reports_summary_failure() {
    let harness = harness(BatchConfig::default());
    let body = "article_urls[]=http://a.test/3";

    let response = harness.app.oneshot(form_request("/summarize", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["summaries"][0], "Error generating summary for http://a.test/3");
}

#[tokio::test]
async fn test_empty_request_is_rejected_without_work() {
    let harness = harness(BatchConfig::default());

    let response = harness.app.oneshot(form_request("/summarize", "")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, serde_json::json!({"error": "No article URLs provided."}));
    assert_eq!(harness.source.calls.load(Ordering::SeqCst), 0);
    assert_eq!(harness.model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unbracketed_field_name_is_accepted() {
    let harness = harness(BatchConfig::default());

    let response = harness
        .app
        .oneshot(form_request("/summarize", "article_urls=http://a.test/1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["summaries"][0], "Greeting.");
}

#[tokio::test]
async fn test_mixed_field_names_keep_body_order() {
    let harness = harness(BatchConfig::default());
    let body = "article_urls[]=http://bad.test/0&article_urls=http://a.test/1&article_urls[]=http://a.test/3";

    let response = harness.app.oneshot(form_request("/summarize", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["summaries"],
        serde_json::json!([
            "Error fetching articles from http://bad.test/0",
            "Greeting.",
            "Error generating summary for http://a.test/3"
        ])
    );
}

#[tokio::test]
async fn test_multipart_form_is_accepted() {
    let harness = harness(BatchConfig::default());
    let boundary = "precis-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"article_urls[]\"\r\n\r\nhttp://a.test/1\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nignored\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"article_urls[]\"\r\n\r\nhttp://bad.test/2\r\n\
         --{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method("POST")
        .uri("/summarize")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();

    let response = harness.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({"summaries": ["Greeting.", "Error fetching articles from http://bad.test/2"]})
    );
}

#[tokio::test]
async fn test_request_without_content_type_has_no_urls() {
    let harness = harness(BatchConfig::default());

    let request = Request::builder().method("POST").uri("/summarize").body(Body::empty()).unwrap();
    let response = harness.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, serde_json::json!({"error": "No article URLs provided."}));
    assert_eq!(harness.source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_json_body_has_no_urls() {
    let harness = harness(BatchConfig::default());

    let request = Request::builder()
        .method("POST")
        .uri("/summarize/outcomes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"article_urls": ["http://a.test/1"]}"#))
        .unwrap();
    let response = harness.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No article URLs provided.");
}

#[tokio::test]
async fn test_broken_multipart_is_json_bad_request() {
    let harness = harness(BatchConfig::default());

    let request = Request::builder()
        .method("POST")
        .uri("/summarize")
        .header(header::CONTENT_TYPE, "multipart/form-data")
        .body(Body::from("not multipart"))
        .unwrap();
    let response = harness.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, serde_json::json!({"error": "Invalid form body."}));
}

#[tokio::test]
async fn test_batch_failure_is_generic_server_error() {
    let harness = harness(BatchConfig { max_concurrency: 0 });

    let response = harness
        .app
        .oneshot(form_request("/summarize", "article_urls[]=http://a.test/1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, serde_json::json!({"error": "Internal server error."}));
}

#[tokio::test]
async fn test_outcomes_are_tagged() {
    let harness = harness(BatchConfig::default());
    let body = "article_urls[]=http://a.test/1&article_urls[]=http://bad.test/2&article_urls[]=http://a.test/3";

    let response = harness.app.oneshot(form_request("/summarize/outcomes", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let outcomes = json["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0]["status"], "summary");
    assert_eq!(outcomes[0]["summary"], "Greeting.");
    assert_eq!(outcomes[1]["status"], "fetch_error");
    assert_eq!(outcomes[1]["url"], "http://bad.test/2");
    assert_eq!(outcomes[2]["status"], "summary_error");
}

#[tokio::test]
async fn test_health() {
    let harness = harness(BatchConfig::default());

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = harness.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}
