//! Integration tests for the HTTP chat facade
//!
//! Spins the axum router up on an ephemeral port and exercises it with a
//! real HTTP client, with the LLM behind a wiremock server.

use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use diya_engine::agent::Agent;
use diya_engine::checkpoint::MemoryCheckpointStore;
use diya_engine::llm::{ollama::OllamaProvider, LLMProvider};
use diya_engine::server;
use diya_engine::store::RecordStore;

fn ollama_response(content: &str) -> Value {
    json!({
        "model": "llama3.1:8b",
        "message": {"role": "assistant", "content": content},
        "done": true
    })
}

/// Start a chat server backed by the given mock LLM; returns its base URL.
async fn spawn_server(llm_server: &MockServer, db: &TempDir) -> String {
    let llm: Arc<dyn LLMProvider> = Arc::new(OllamaProvider::new(llm_server.uri(), "llama3.1:8b"));
    let agent = Arc::new(Agent::new(
        llm,
        RecordStore::new(db.path()),
        Arc::new(MemoryCheckpointStore::new()),
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = server::router(agent);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn mount_happy_llm(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_string_contains("List only the relevant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ollama_response(r#"["Delegation"]"#)))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_string_contains("Answer the query."))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ollama_response("One task is pending.")),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_chat_generates_thread_id() {
    let llm_server = MockServer::start().await;
    mount_happy_llm(&llm_server).await;

    let db = TempDir::new().unwrap();
    std::fs::write(
        db.path().join("Delegation.json"),
        json!([{"Task ID": "T-1", "Status": "Pending"}]).to_string(),
    )
    .unwrap();

    let base = spawn_server(&llm_server, &db).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/chat", base))
        .json(&json!({"message": "How many delegation tasks are pending?"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["response"], "One task is pending.");

    // A fresh conversation gets a generated UUID thread id.
    let thread_id = body["thread_id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(thread_id).is_ok());
}

#[tokio::test]
async fn test_chat_preserves_thread_id() {
    let llm_server = MockServer::start().await;
    mount_happy_llm(&llm_server).await;

    let db = TempDir::new().unwrap();
    let base = spawn_server(&llm_server, &db).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/chat", base))
        .json(&json!({"message": "Anything pending?", "thread_id": "my-thread"}))
        .send()
        .await
        .unwrap();

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["thread_id"], "my-thread");
}

#[tokio::test]
async fn test_health_check() {
    let llm_server = MockServer::start().await;

    let db = TempDir::new().unwrap();
    let base = spawn_server(&llm_server, &db).await;

    let response = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_pipeline_failure_maps_to_500() {
    let llm_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&llm_server)
        .await;

    let db = TempDir::new().unwrap();
    let base = spawn_server(&llm_server, &db).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/chat", base))
        .json(&json!({"message": "Anything?"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);

    let body: Value = response.json().await.unwrap();
    assert!(body.get("error").is_some());
}
