use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use vantage::api::{build_router, AppState};
use vantage::config::GatewayConfig;
use vantage::errors::VantageError;
use vantage::llm::anthropic::AnthropicProvider;
use vantage::llm::types::ContentBlock;
use vantage::llm::ResearchProvider;

/// Provider returning a canned content sequence, counting invocations.
struct ScriptedProvider {
    blocks: Vec<ContentBlock>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ResearchProvider for ScriptedProvider {
    async fn research(
        &self,
        _system: &str,
        _user: &str,
    ) -> Result<Vec<ContentBlock>, VantageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.blocks.clone())
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

fn text(content: &str) -> ContentBlock {
    ContentBlock::Text { text: content.to_string() }
}

fn search(query: &str) -> ContentBlock {
    ContentBlock::ServerToolUse {
        name: "web_search".to_string(),
        input: json!({ "query": query }),
    }
}

fn scripted_state(blocks: Vec<ContentBlock>) -> (AppState, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let state = AppState {
        provider: Arc::new(ScriptedProvider { blocks, calls: calls.clone() }),
        strict_schema: false,
    };
    (state, calls)
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn generate_body() -> Value {
    json!({
        "query": "instant noodles",
        "market": "Nigeria",
        "framework": "Porter's Five Forces",
        "investment": "$1M-$5M",
        "region": "Lagos"
    })
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

/// In-process stand-in for the messages endpoint, bound to an ephemeral port.
async fn spawn_upstream(status: u16, body: Value) -> String {
    let status = StatusCode::from_u16(status).unwrap();
    let app = Router::new().route(
        "/v1/messages",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}", addr)
}

fn wire_state(base_url: &str) -> AppState {
    let config = GatewayConfig::new("sk-test".into())
        .with_base_url(base_url)
        .with_timeout_secs(5);
    AppState {
        provider: Arc::new(AnthropicProvider::new(&config).unwrap()),
        strict_schema: false,
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let (state, _) = scripted_state(vec![]);
    let req = make_request("GET", "/api/health", None);
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "vantage");
}

#[tokio::test]
async fn test_generate_success_with_prose_and_searches() {
    let (state, _) = scripted_state(vec![
        search("instant noodles market size Nigeria"),
        search("instant noodles competitors Nigeria"),
        text("Intro text\n{\"title\":\"Noodle Market\",\"executive_summary\":{\"headline\":\"h\",\"body\":\"b\"}}"),
    ]);

    let req = make_request("POST", "/api/generate", Some(generate_body()));
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["report"]["title"], "Noodle Market");
    assert_eq!(
        body["searches"],
        json!(["instant noodles market size Nigeria", "instant noodles competitors Nigeria"])
    );
}

#[tokio::test]
async fn test_generate_strips_markdown_fences() {
    let (state, _) = scripted_state(vec![text("```json\n{\"title\":\"X\"}\n```")]);

    let req = make_request("POST", "/api/generate", Some(generate_body()));
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["report"]["title"], "X");
    assert_eq!(body["searches"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_generate_concatenates_text_blocks() {
    let (state, _) = scripted_state(vec![
        text("{\"ti"),
        search("q"),
        text("tle\":\"Joined\"}"),
    ]);

    let req = make_request("POST", "/api/generate", Some(generate_body()));
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["report"]["title"], "Joined");
}

#[tokio::test]
async fn test_generate_no_json_yields_500_generic() {
    let (state, _) = scripted_state(vec![text("I was unable to compile a report.")]);

    let req = make_request("POST", "/api/generate", Some(generate_body()));
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Could not parse report data");
}

#[tokio::test]
async fn test_generate_malformed_json_yields_500_generic() {
    let (state, _) = scripted_state(vec![text("Report follows: {title: unquoted}")]);

    let req = make_request("POST", "/api/generate", Some(generate_body()));
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Could not parse report data");
    // Raw model output never reaches the client
    assert!(!body["error"].as_str().unwrap().contains("unquoted"));
}

#[tokio::test]
async fn test_generate_empty_query_yields_400_without_upstream_call() {
    let (state, calls) = scripted_state(vec![text("{}")]);

    let req = make_request("POST", "/api/generate", Some(json!({ "query": "" })));
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("query"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_generate_missing_fields_are_tolerated() {
    let (state, _) = scripted_state(vec![text("{\"title\":\"Sparse\"}")]);

    // Only query present; the other fields default to empty strings
    let req = make_request("POST", "/api/generate", Some(json!({ "query": "noodles" })));
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_options_yields_200_with_cors_headers() {
    let (state, _) = scripted_state(vec![]);

    let req = axum::http::Request::builder()
        .method("OPTIONS")
        .uri("/api/generate")
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").map(|v| v.to_str().unwrap()),
        Some("*")
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_preflight_yields_200_with_cors_headers() {
    let (state, _) = scripted_state(vec![]);

    let req = axum::http::Request::builder()
        .method("OPTIONS")
        .uri("/api/generate")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("access-control-allow-origin"));
    assert!(response.headers().contains_key("access-control-allow-methods"));
}

#[tokio::test]
async fn test_other_methods_yield_405_without_upstream_call() {
    for method in ["GET", "PUT", "DELETE", "PATCH"] {
        let (state, calls) = scripted_state(vec![text("{}")]);
        let req = make_request(method, "/api/generate", None);
        let response = build_router(state).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "method {}", method);

        let body = response_json(response).await;
        assert_eq!(body["error"], "Method not allowed");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn test_strict_schema_rejects_incomplete_report() {
    let calls = Arc::new(AtomicUsize::new(0));
    let state = AppState {
        provider: Arc::new(ScriptedProvider {
            blocks: vec![text("{\"title\":\"X\"}")],
            calls: calls.clone(),
        }),
        strict_schema: true,
    };

    let req = make_request("POST", "/api/generate", Some(generate_body()));
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Report failed validation");
}

#[tokio::test]
async fn test_upstream_success_over_the_wire() {
    let upstream = spawn_upstream(
        200,
        json!({
            "content": [
                {"type": "server_tool_use", "id": "srvtoolu_1", "name": "web_search",
                 "input": {"query": "noodle market Nigeria"}},
                {"type": "web_search_tool_result", "tool_use_id": "srvtoolu_1", "content": []},
                {"type": "text", "text": "Here is the report:\n{\"title\":\"Noodle Market\"}"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 1200, "output_tokens": 300}
        }),
    )
    .await;

    let req = make_request("POST", "/api/generate", Some(generate_body()));
    let response = build_router(wire_state(&upstream)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["report"]["title"], "Noodle Market");
    assert_eq!(body["searches"], json!(["noodle market Nigeria"]));
}

#[tokio::test]
async fn test_upstream_error_status_passes_through() {
    let upstream = spawn_upstream(
        529,
        json!({"type": "error", "error": {"type": "overloaded_error", "message": "overloaded"}}),
    )
    .await;

    let req = make_request("POST", "/api/generate", Some(generate_body()));
    let response = build_router(wire_state(&upstream)).oneshot(req).await.unwrap();
    assert_eq!(response.status().as_u16(), 529);

    let body = response_json(response).await;
    assert_eq!(body["error"], "overloaded");
}

#[tokio::test]
async fn test_upstream_error_without_envelope_gets_generic_message() {
    let upstream = spawn_upstream(500, json!({"unexpected": "shape"})).await;

    let req = make_request("POST", "/api/generate", Some(generate_body()));
    let response = build_router(wire_state(&upstream)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert_eq!(body["error"], "API request failed");
}

#[tokio::test]
async fn test_upstream_connection_refused_yields_502() {
    // Bind then drop to get a port nothing is listening on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let req = make_request("POST", "/api/generate", Some(generate_body()));
    let response = build_router(wire_state(&format!("http://{}", addr)))
        .oneshot(req)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("request failed"));
}
