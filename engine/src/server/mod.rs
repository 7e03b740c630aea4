//! HTTP chat facade
//!
//! A two-route axum server: `POST /chat` runs the pipeline for a thread
//! and `GET /` reports health. Callers without a thread id get a fresh
//! UUID so follow-up messages can continue the same conversation.
//!
//! # Endpoints
//!
//! - POST /chat - body `{message, thread_id?}` -> `{response, thread_id}`
//! - GET / - health check, returns `{"status": "ok"}`

use crate::agent::Agent;
use crate::config::ServerConfig;
use crate::error::EngineError;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Server state shared across handlers
#[derive(Clone)]
struct ServerState {
    agent: Arc<Agent>,
}

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message
    pub message: String,

    /// Existing conversation thread, if continuing one
    #[serde(default)]
    pub thread_id: Option<String>,
}

/// Chat response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The synthesized answer
    pub response: String,

    /// The thread id (caller-supplied or freshly generated)
    pub thread_id: String,
}

/// Build the router with both endpoints and permissive CORS.
pub fn router(agent: Arc<Agent>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(chat_handler))
        .route("/", get(health_handler))
        .layer(cors)
        .with_state(ServerState { agent })
}

/// Bind the configured address and serve until ctrl-c.
pub async fn serve(config: &ServerConfig, agent: Arc<Agent>) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| EngineError::Server(format!("failed to bind {}: {}", addr, e)))?;

    tracing::info!("chat server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(agent))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| EngineError::Server(e.to_string()))?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    tracing::info!("chat server shutting down gracefully");
}

/// Chat endpoint: run the pipeline for this thread and return the answer.
async fn chat_handler(
    State(state): State<ServerState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, Response> {
    // Use existing thread_id or create a new one for a new conversation
    let thread_id = request
        .thread_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    match state.agent.invoke(&thread_id, &request.message).await {
        Ok(answer) => Ok(Json(ChatResponse {
            response: answer,
            thread_id,
        })),
        Err(e) => {
            let err = format!("{:#}", e);
            tracing::error!(%thread_id, error = %err, "chat pipeline failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
                .into_response())
        }
    }
}

/// Health check endpoint
async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::MemoryCheckpointStore;
    use crate::llm::ollama::OllamaProvider;
    use crate::llm::LLMProvider;
    use crate::store::RecordStore;

    fn test_agent() -> Arc<Agent> {
        let llm: Arc<dyn LLMProvider> =
            Arc::new(OllamaProvider::new("http://localhost:11434", "llama3.1:8b"));
        Arc::new(Agent::new(
            llm,
            RecordStore::new("db"),
            Arc::new(MemoryCheckpointStore::new()),
        ))
    }

    #[tokio::test]
    async fn test_serve_reports_bind_failure() {
        // Occupy a port so serve cannot bind it.
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: taken.local_addr().unwrap().port(),
        };

        let err = serve(&config, test_agent()).await.unwrap_err();
        let rendered = format!("{:#}", err);
        assert!(rendered.contains("Server error"), "got: {}", rendered);
        assert!(rendered.contains("failed to bind"), "got: {}", rendered);
    }
}
