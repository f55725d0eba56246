/// Client side of the recommendation service contract
use reqwest::{Client as HttpClient, Url};

use crate::models::{ErrorResponse, Recommendation, RecommendationRequest, RecommendationsResponse};

/// Errors seen by a caller of the recommendation service
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service returned {status}: {error} ({details})")]
    Service {
        status: u16,
        error: String,
        details: String,
    },

    #[error("Unexpected response ({status}): {body}")]
    UnexpectedResponse { status: u16, body: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Anything that can turn a title into recommendations for the results view
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationService: Send + Sync {
    async fn fetch(&self, movie_title: &str) -> ClientResult<Vec<Recommendation>>;
}

/// Calls the recommendation endpoint over HTTP
#[derive(Clone)]
pub struct HttpRecommendationClient {
    http_client: HttpClient,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpRecommendationClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http_client: HttpClient::new(),
            endpoint,
            api_key: None,
        }
    }

    /// Sends `key` as both `apikey` and bearer token, as hosted function gateways expect
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

#[async_trait::async_trait]
impl RecommendationService for HttpRecommendationClient {
    async fn fetch(&self, movie_title: &str) -> ClientResult<Vec<Recommendation>> {
        let mut request = self
            .http_client
            .post(self.endpoint.clone())
            .json(&RecommendationRequest::new(movie_title));

        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let parsed: RecommendationsResponse = serde_json::from_str(&body).map_err(|e| {
                tracing::error!(error = %e, body = %body, "Failed to decode recommendations");
                ClientError::UnexpectedResponse {
                    status: status.as_u16(),
                    body: body.clone(),
                }
            })?;
            return Ok(parsed.recommendations);
        }

        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(envelope) => Err(ClientError::Service {
                status: status.as_u16(),
                error: envelope.error,
                details: envelope.details,
            }),
            Err(_) => Err(ClientError::UnexpectedResponse {
                status: status.as_u16(),
                body,
            }),
        }
    }
}
