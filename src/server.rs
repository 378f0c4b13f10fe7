use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use crate::design::model::Design;
use crate::error::Result;
use crate::orchestrator::DesignService;

type ServerState = Arc<DesignService>;

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

pub fn router(service: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/generate", post(generate_handler))
        .layer(cors)
        .with_state(service)
}

/// Serves until Ctrl-C.
pub async fn serve(addr: SocketAddr, service: ServerState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

// --- Axum Handlers ---

async fn health_handler() -> &'static str {
    "ok"
}

async fn generate_handler(
    State(service): State<ServerState>,
    Json(req): Json<PromptRequest>,
) -> Json<Design> {
    Json(service.handle_request(&req.prompt).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::{json, Value};

    use crate::design::model::fallback_shape;
    use crate::llm::gemini::GeminiClient;

    async fn spawn(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    async fn spawn_bridge(model_reply: Value) -> SocketAddr {
        let model = Router::new().route(
            "/generate",
            post(move || {
                let reply = model_reply.clone();
                async move { Json(reply) }
            }),
        );
        let model_addr = spawn(model).await;
        let client = GeminiClient::new(
            format!("http://{model_addr}/generate"),
            "key",
            "system",
            Duration::from_secs(5),
        )
        .unwrap();
        spawn(router(Arc::new(DesignService::new(client)))).await
    }

    #[tokio::test]
    async fn generate_returns_design_array() {
        let text = r##"[{"type":"rect","left":0,"top":0,"width":100,"height":50,"fill":"#000"}]"##;
        let addr = spawn_bridge(json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        }))
        .await;

        let response = reqwest::Client::new()
            .post(format!("http://{addr}/generate"))
            .json(&json!({"prompt": "a black box"}))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!([{"type":"rect","left":0,"top":0,"width":100,"height":50,"fill":"#000"}])
        );
    }

    #[tokio::test]
    async fn model_error_is_not_an_http_error() {
        let addr = spawn_bridge(json!({"error": {"code": 429, "message": "quota exceeded"}})).await;

        let response = reqwest::Client::new()
            .post(format!("http://{addr}/generate"))
            .json(&json!({"prompt": "signup form"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!([fallback_shape()]));
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let addr = spawn_bridge(json!({"candidates": []})).await;

        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("http://{addr}/generate"))
            .header("Origin", "http://localhost:3000")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn health() {
        let addr = spawn_bridge(json!({})).await;
        let body = reqwest::get(format!("http://{addr}/health"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn missing_prompt_field_is_rejected() {
        let addr = spawn_bridge(json!({})).await;
        let response = reqwest::Client::new()
            .post(format!("http://{addr}/generate"))
            .json(&json!({"text": "no prompt here"}))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}
