//! End-to-end tests over the router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::assistant::{persona, AssistantService};
use crate::catalog::Catalog;
use crate::genai::{GenerationError, GenerationRequest, TextGenerator};
use crate::insight::InsightGenerator;
use crate::server::handlers::CONTACT_ACK;
use crate::server::{create_router, AppState};

enum Canned {
    Reply(&'static str),
    Fail,
}

struct CannedGenerator(Canned);

#[async_trait::async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        match &self.0 {
            Canned::Reply(text) => Ok((*text).to_string()),
            Canned::Fail => Err(GenerationError::Service {
                status: 503,
                body: "down".to_string(),
            }),
        }
    }
}

fn test_router(canned: Canned) -> axum::Router {
    let generator: Arc<dyn TextGenerator> = Arc::new(CannedGenerator(canned));
    let state = AppState {
        catalog: Arc::new(Catalog::load().expect("embedded catalog parses")),
        assistant: Arc::new(AssistantService::new(generator.clone())),
        insights: Arc::new(InsightGenerator::new(generator)),
    };
    create_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn status_reports_the_service() {
    let app = test_router(Canned::Reply("unused"));
    let response = app.oneshot(get("/api/status")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["service"], "whitewolf");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn services_list_serializes_for_the_site() {
    let app = test_router(Canned::Reply("unused"));
    let response = app.oneshot(get("/api/services")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let services = body.as_array().expect("array");
    assert_eq!(services.len(), 6);
    assert_eq!(services[0]["id"], "web-design-dev");
    assert!(services[0].get("shortDescription").is_some());
}

#[tokio::test]
async fn services_resolve_by_path_segment() {
    let app = test_router(Canned::Reply("unused"));
    let response = app
        .oneshot(get("/api/services/performance-optimization"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], "optimization");
    assert_eq!(body["title"], "Performance Optimization");
}

#[tokio::test]
async fn unknown_services_redirect_home() {
    let app = test_router(Canned::Reply("unused"));
    let response = app
        .oneshot(get("/api/services/quantum-blockchain"))
        .await
        .expect("response");
    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(header::LOCATION).map(|v| v.as_bytes()),
        Some("/".as_bytes())
    );
}

#[tokio::test]
async fn unknown_team_members_redirect_home() {
    let app = test_router(Canned::Reply("unused"));
    let response = app.oneshot(get("/api/team/unknown-id")).await.expect("response");
    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(header::LOCATION).map(|v| v.as_bytes()),
        Some("/".as_bytes())
    );
}

#[tokio::test]
async fn team_members_resolve_by_id() {
    let app = test_router(Canned::Reply("unused"));
    let response = app.oneshot(get("/api/team/saad-ali")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Saad Ali");
    assert_eq!(body["role"], "Founder & Creative Lead");
}

#[tokio::test]
async fn process_lists_the_five_steps() {
    let app = test_router(Canned::Reply("unused"));
    let response = app.oneshot(get("/api/process")).await.expect("response");
    let body = body_json(response).await;
    let steps = body.as_array().expect("array");
    assert_eq!(steps.len(), 5);
    assert_eq!(steps[0]["title"], "Discovery");
    assert_eq!(steps[4]["title"], "Evolution");
}

#[tokio::test]
async fn contact_acknowledges_complete_submissions() {
    let app = test_router(Canned::Reply("unused"));
    let response = app
        .oneshot(post_json(
            "/api/contact",
            json!({
                "name": "Jane Doe",
                "email": "jane@company.com",
                "service": "Web Design & Development",
                "brief": "We want a relaunch."
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], CONTACT_ACK);
}

#[tokio::test]
async fn contact_rejects_blank_fields() {
    let app = test_router(Canned::Reply("unused"));
    let response = app
        .oneshot(post_json(
            "/api/contact",
            json!({ "name": "  ", "email": "jane@company.com", "brief": "Relaunch." }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "name is required");
}

#[tokio::test]
async fn chat_round_trip_over_http() {
    let app = test_router(Canned::Reply("Certainly. Here is my advice."));

    let response = app
        .clone()
        .oneshot(post_empty("/api/chat/sessions"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let id = created["id"].as_str().expect("session id").to_string();
    assert_eq!(created["messages"].as_array().map(Vec::len), Some(1));
    assert_eq!(created["isOpen"], false);

    let response = app
        .clone()
        .oneshot(post_empty(&format!("/api/chat/sessions/{id}/open")))
        .await
        .expect("response");
    let opened = body_json(response).await;
    assert_eq!(opened["isOpen"], true);

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/chat/sessions/{id}/messages"),
            json!({ "text": "We need a new platform" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let after_turn = body_json(response).await;
    let messages = after_turn["messages"].as_array().expect("messages");
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[2]["role"], "assistant");
    assert_eq!(messages[2]["text"], "Certainly. Here is my advice.");
    assert_eq!(after_turn["isLoading"], false);

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/chat/sessions/{id}")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/chat/sessions/{id}")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_failure_shows_the_apology() {
    let app = test_router(Canned::Fail);

    let response = app
        .clone()
        .oneshot(post_empty("/api/chat/sessions"))
        .await
        .expect("response");
    let id = body_json(response).await["id"]
        .as_str()
        .expect("session id")
        .to_string();

    app.clone()
        .oneshot(post_empty(&format!("/api/chat/sessions/{id}/open")))
        .await
        .expect("response");

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/chat/sessions/{id}/messages"),
            json!({ "text": "Hello?" }),
        ))
        .await
        .expect("response");
    let snapshot = body_json(response).await;
    let messages = snapshot["messages"].as_array().expect("messages");
    assert_eq!(messages[2]["text"], persona::ERROR_FALLBACK);
}

#[tokio::test]
async fn insight_round_trip_over_http() {
    let app = test_router(Canned::Reply("Own the market."));

    let response = app
        .clone()
        .oneshot(get("/api/services/ecommerce/insight"))
        .await
        .expect("response");
    assert_eq!(body_json(response).await, json!({ "status": "unrequested" }));

    let response = app
        .clone()
        .oneshot(post_empty("/api/services/ecommerce/insight"))
        .await
        .expect("response");
    assert_eq!(
        body_json(response).await,
        json!({ "status": "ready", "text": "Own the market." })
    );

    let response = app
        .clone()
        .oneshot(get("/api/services/ecommerce/insight"))
        .await
        .expect("response");
    assert_eq!(
        body_json(response).await,
        json!({ "status": "ready", "text": "Own the market." })
    );

    let response = app
        .clone()
        .oneshot(post_empty("/api/services/not-a-service/insight"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
