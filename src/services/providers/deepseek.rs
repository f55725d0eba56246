/// DeepSeek chat-completion provider
///
/// Talks to the OpenAI-compatible `/chat/completions` endpoint with bearer auth and
/// returns the content of the first choice.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionRequest},
    services::providers::LanguageModelProvider,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct DeepSeekProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl DeepSeekProvider {
    pub fn new(api_key: Option<String>, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.deepseek_api_key.clone(),
            config.deepseek_api_url.clone(),
            config.deepseek_model.clone(),
        )
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("DeepSeek API key not configured".to_string()))
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl LanguageModelProvider for DeepSeekProvider {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        let api_key = self.api_key()?;

        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(request.prompt)],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .http_client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                provider = "deepseek",
                "DeepSeek API error"
            );
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let response_text = response.text().await?;
        let completion: ChatCompletionResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                tracing::error!(
                    error = %e,
                    response = %response_text,
                    "Failed to deserialize DeepSeek response"
                );
                AppError::MalformedResponse(format!("Failed to parse DeepSeek response: {}", e))
            })?;

        completion.into_content().ok_or_else(|| {
            AppError::MalformedResponse("DeepSeek response contained no choices".to_string())
        })
    }

    fn name(&self) -> &'static str {
        "deepseek"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured {
        body: Arc<Mutex<Option<Value>>>,
        authorization: Arc<Mutex<Option<String>>>,
    }

    /// Starts a stand-in for the chat completions API that answers with a fixed reply
    async fn spawn_upstream(status: StatusCode, reply: Value) -> (String, Captured) {
        let captured = Captured::default();

        let app = Router::new()
            .route(
                "/chat/completions",
                post(
                    move |State(captured): State<Captured>,
                          headers: HeaderMap,
                          Json(body): Json<Value>| {
                        let reply = reply.clone();
                        async move {
                            *captured.body.lock().unwrap() = Some(body);
                            *captured.authorization.lock().unwrap() = headers
                                .get("authorization")
                                .and_then(|h| h.to_str().ok())
                                .map(str::to_string);
                            (status, Json(reply))
                        }
                    },
                ),
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), captured)
    }

    fn completion_request() -> CompletionRequest {
        CompletionRequest {
            prompt: "recommend something".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    #[tokio::test]
    async fn test_complete_sends_chat_request_and_returns_content() {
        let (url, captured) = spawn_upstream(
            StatusCode::OK,
            json!({"choices": [{"message": {"role": "assistant", "content": "[1, 2, 3]"}}]}),
        )
        .await;
        let provider = DeepSeekProvider::new(
            Some("sk-test".to_string()),
            url,
            "deepseek-chat".to_string(),
        );

        let content = provider.complete(completion_request()).await.unwrap();
        assert_eq!(content, "[1, 2, 3]");

        let body = captured.body.lock().unwrap().clone().unwrap();
        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "recommend something");
        assert_eq!(body["max_tokens"], 2000);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);

        let authorization = captured.authorization.lock().unwrap().clone();
        assert_eq!(authorization.as_deref(), Some("Bearer sk-test"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error_with_body() {
        let (url, _) = spawn_upstream(
            StatusCode::UNAUTHORIZED,
            json!({"error": {"message": "Authentication Fails"}}),
        )
        .await;
        let provider =
            DeepSeekProvider::new(Some("sk-bad".to_string()), url, "deepseek-chat".to_string());

        let err = provider.complete(completion_request()).await.unwrap_err();
        match err {
            AppError::Upstream { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Authentication Fails"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_malformed_response() {
        let (url, _) = spawn_upstream(StatusCode::OK, json!({"choices": []})).await;
        let provider =
            DeepSeekProvider::new(Some("sk-test".to_string()), url, "deepseek-chat".to_string());

        let err = provider.complete(completion_request()).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_any_request() {
        let (url, captured) = spawn_upstream(StatusCode::OK, json!({"choices": []})).await;
        let provider = DeepSeekProvider::new(None, url, "deepseek-chat".to_string());

        let err = provider.complete(completion_request()).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(captured.body.lock().unwrap().is_none());
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let provider = DeepSeekProvider::new(
            Some("   ".to_string()),
            "http://test.local".to_string(),
            "deepseek-chat".to_string(),
        );
        assert!(matches!(provider.api_key(), Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_completions_url_tolerates_trailing_slash() {
        let provider = DeepSeekProvider::new(
            None,
            "https://api.deepseek.com/".to_string(),
            "deepseek-chat".to_string(),
        );
        assert_eq!(
            provider.completions_url(),
            "https://api.deepseek.com/chat/completions"
        );
    }

    #[test]
    fn test_from_config_uses_configured_model() {
        let config = Config {
            deepseek_api_key: Some("sk-test".to_string()),
            deepseek_model: "deepseek-reasoner".to_string(),
            ..Config::default()
        };
        let provider = DeepSeekProvider::from_config(&config);
        assert_eq!(provider.model, "deepseek-reasoner");
        assert_eq!(provider.name(), "deepseek");
    }
}
