//! Assistant gateway against an in-process stand-in for the Vapi API.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, patch},
    Router,
};
use hireflow::config::AssistantDefaults;
use hireflow::vapi::{AssistantGateway, AssistantTemplate, GatewayError, VapiClient};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const WEBHOOK_URL: &str = "https://hireflow.test/api/vapi-webhook";

#[derive(Debug, Clone)]
struct Recorded {
    method: &'static str,
    path: String,
    authorization: Option<String>,
    body: Option<Value>,
}

#[derive(Clone)]
struct MockVapi {
    status: StatusCode,
    reply: Value,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockVapi {
    fn record(&self, method: &'static str, path: String, headers: &HeaderMap, body: Option<Value>) {
        let authorization = headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            method,
            path,
            authorization,
            body,
        });
    }

    fn reply(&self) -> Response {
        (self.status, Json(self.reply.clone())).into_response()
    }
}

async fn list(State(mock): State<MockVapi>, headers: HeaderMap) -> Response {
    mock.record("GET", "/assistant".to_string(), &headers, None);
    mock.reply()
}

async fn create(
    State(mock): State<MockVapi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.record("POST", "/assistant".to_string(), &headers, Some(body));
    mock.reply()
}

async fn update(
    State(mock): State<MockVapi>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.record("PATCH", format!("/assistant/{}", id), &headers, Some(body));
    mock.reply()
}

/// Serve canned replies on a random local port.
async fn spawn_vapi(status: u16, reply: Value) -> (String, Arc<Mutex<Vec<Recorded>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let mock = MockVapi {
        status: StatusCode::from_u16(status).unwrap(),
        reply,
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/assistant", get(list).post(create))
        .route("/assistant/:id", patch(update))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), requests)
}

fn gateway(base_url: String) -> AssistantGateway {
    let client = VapiClient::new(
        "test-key".to_string(),
        Some(base_url),
        Duration::from_secs(5),
    )
    .unwrap();
    let template = AssistantTemplate::new(AssistantDefaults::default(), WEBHOOK_URL);
    AssistantGateway::new(Arc::new(client), template)
}

fn assistant_json(id: &str) -> Value {
    json!({
        "id": id,
        "orgId": "org-1",
        "name": "Interviewer",
        "firstMessage": "Hello",
        "maxDurationSeconds": 360,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn list_returns_assistants_with_bearer_auth() {
    let (url, requests) = spawn_vapi(200, json!([assistant_json("a1"), assistant_json("a2")])).await;

    let result = gateway(url).list().await;

    assert!(result.is_success());
    assert_eq!(result.status(), 200);
    let ids: Vec<&str> = result.data().unwrap().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2"]);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer test-key"));
}

#[tokio::test]
async fn create_sends_the_interview_configuration() {
    let (url, requests) = spawn_vapi(201, assistant_json("new-1")).await;

    let result = gateway(url).create("Backend Interviewer").await;

    assert_eq!(result.status(), 200);
    assert_eq!(result.data().unwrap().id, "new-1");

    let requests = requests.lock().unwrap();
    let body = requests[0].body.as_ref().unwrap();
    assert_eq!(body["name"], "Backend Interviewer");
    assert_eq!(body["voice"]["provider"], "vapi");
    assert_eq!(body["voice"]["voiceId"], "Elliot");
    assert_eq!(body["model"]["provider"], "openai");
    assert_eq!(body["model"]["model"], "gpt-4.1");
    assert_eq!(body["model"]["messages"][0]["role"], "system");
    assert_eq!(body["transcriber"]["provider"], "deepgram");
    assert_eq!(body["transcriber"]["keywords"].as_array().unwrap().len(), 5);
    assert_eq!(body["server"]["url"], WEBHOOK_URL);
    assert_eq!(body["maxDurationSeconds"], 360);
    assert_eq!(body["endCallFunctionEnabled"], true);
    assert_eq!(body["serverMessages"], json!([]));
}

#[tokio::test]
async fn create_with_rejected_credentials_is_auth_failure() {
    let (url, _) = spawn_vapi(401, json!({ "message": "Invalid Key" })).await;

    let result = gateway(url).create("Interviewer").await;

    assert_eq!(result.status(), 401);
    assert_eq!(result.error(), Some(GatewayError::AuthFailure));
    assert_eq!(
        result.message(),
        Some("Authentication failed. Please check your VAPI credentials.")
    );
}

#[tokio::test]
async fn create_with_bad_request_is_invalid_config() {
    let (url, _) = spawn_vapi(400, json!({ "message": ["voice must be an object"] })).await;

    let result = gateway(url).create("Interviewer").await;

    assert_eq!(result.status(), 400);
    assert_eq!(
        result.message(),
        Some("Invalid request. Please check your assistant configuration.")
    );
}

#[tokio::test]
async fn create_with_blank_name_never_reaches_the_provider() {
    let (url, requests) = spawn_vapi(200, assistant_json("unused")).await;

    let result = gateway(url).create("   ").await;

    assert_eq!(result.status(), 400);
    assert_eq!(result.error(), Some(GatewayError::InvalidConfig));
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn update_patches_overrides_onto_the_assistant() {
    let (url, requests) = spawn_vapi(200, assistant_json("a1")).await;

    let result = gateway(url)
        .update("a1", Some("Welcome back!"), Some(""))
        .await;

    assert!(result.is_success());
    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].method, "PATCH");
    assert_eq!(requests[0].path, "/assistant/a1");
    let body = requests[0].body.as_ref().unwrap();
    assert_eq!(body["firstMessage"], "Welcome back!");
    assert!(body.get("name").is_none());
    assert_eq!(
        body["model"]["messages"][0]["content"],
        AssistantDefaults::default().system_prompt
    );
}

#[tokio::test]
async fn update_sends_the_assistant_id_as_one_path_segment() {
    let (url, requests) = spawn_vapi(200, assistant_json("a1")).await;
    let gateway = gateway(url);

    for id in ["other?x=1", "a/b", "id#frag"] {
        let result = gateway.update(id, None, None).await;
        assert!(result.is_success(), "update of {:?} failed", id);
    }

    let paths: Vec<String> = requests
        .lock()
        .unwrap()
        .iter()
        .map(|request| request.path.clone())
        .collect();
    assert_eq!(
        paths,
        vec!["/assistant/other?x=1", "/assistant/a/b", "/assistant/id#frag"]
    );
}

#[tokio::test]
async fn update_with_rejected_credentials_is_auth_failure() {
    let (url, _) = spawn_vapi(401, json!({ "message": "Invalid Key" })).await;

    let result = gateway(url).update("a1", None, None).await;

    assert_eq!(result.status(), 401);
    assert_eq!(result.error(), Some(GatewayError::AuthFailure));
}

#[tokio::test]
async fn update_of_missing_assistant_is_not_found() {
    let (url, _) = spawn_vapi(404, json!({ "message": "Not Found" })).await;

    let result = gateway(url).update("missing", None, None).await;

    assert_eq!(result.status(), 404);
    assert_eq!(result.message(), Some("Assistant not found."));
}

#[tokio::test]
async fn list_server_error_is_generic_failure() {
    let (url, _) = spawn_vapi(503, json!({ "message": "unavailable" })).await;

    let result = gateway(url).list().await;

    assert_eq!(result.status(), 500);
    assert_eq!(
        result.message(),
        Some("Failed to fetch agents. Please try again.")
    );
}

#[tokio::test]
async fn list_against_unreachable_provider_is_generic_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = gateway(format!("http://{}", addr)).list().await;

    assert_eq!(result.status(), 500);
    assert_eq!(result.error(), Some(GatewayError::Unknown));
}

#[tokio::test]
async fn undecodable_reply_is_generic_failure() {
    let (url, _) = spawn_vapi(200, json!({ "unexpected": true })).await;

    let result = gateway(url).update("a1", None, None).await;

    assert_eq!(result.status(), 500);
    assert_eq!(
        result.message(),
        Some("Failed to update assistant. Please try again.")
    );
}
