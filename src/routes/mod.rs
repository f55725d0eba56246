use axum::{
    http::{HeaderName, Method, StatusCode},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::providers::{DeepSeekProvider, LanguageModelProvider},
};

pub mod recommendations;

/// Headers browsers may send on cross-origin recommendation calls
pub const ALLOWED_HEADERS: [&str; 4] = ["authorization", "x-client-info", "apikey", "content-type"];

/// Shared application state
///
/// Read-only after startup; handlers never mutate it.
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn LanguageModelProvider>,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn LanguageModelProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }

    /// State wired to the DeepSeek provider described by `config`
    pub fn from_config(config: Config) -> Self {
        let provider = Arc::new(DeepSeekProvider::from_config(&config));
        Self::new(config, provider)
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        // Path of the original hosted function, kept for existing frontends
        .route(
            "/get-movie-recommendations",
            post(recommendations::recommend),
        )
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/recommendations", post(recommendations::recommend))
}

/// Any origin may call the service; preflight requests are answered by the layer
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn test_router() -> Router {
        create_router(Arc::new(AppState::from_config(Config::default())))
    }

    #[tokio::test]
    async fn test_preflight_on_original_function_path() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/get-movie-recommendations")
            .header("origin", "https://moviematch.example")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[test]
    fn test_state_keeps_configuration_for_startup() {
        let config = Config {
            deepseek_model: "deepseek-reasoner".to_string(),
            port: 8081,
            ..Config::default()
        };

        let state = AppState::from_config(config);

        assert_eq!(state.config.deepseek_model, "deepseek-reasoner");
        assert_eq!(state.config.bind_addr(), "127.0.0.1:8081");
        assert_eq!(state.provider.name(), "deepseek");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let request = Request::builder()
            .uri("/api/v1/titles")
            .body(Body::empty())
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
