use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;

/// Message returned to callers for every failed recommendation request
pub const FAILURE_MESSAGE: &str = "Failed to generate recommendations";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Upstream API error: {status} {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid recommendation shape{}: {reason}", at_index(.index))]
    InvalidRecommendationShape {
        index: Option<usize>,
        reason: String,
    },
}

fn at_index(index: &Option<usize>) -> String {
    index.map(|i| format!(" at index {}", i)).unwrap_or_default()
}

impl AppError {
    pub fn invalid_shape(reason: impl Into<String>) -> Self {
        Self::InvalidRecommendationShape {
            index: None,
            reason: reason.into(),
        }
    }

    pub fn invalid_shape_at(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecommendationShape {
            index: Some(index),
            reason: reason.into(),
        }
    }

    /// Short name of the error kind, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Configuration(_) => "configuration",
            AppError::HttpClient(_) => "http_client",
            AppError::Upstream { .. } => "upstream",
            AppError::MalformedResponse(_) => "malformed_response",
            AppError::InvalidRecommendationShape { .. } => "invalid_recommendation_shape",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every kind shares one status; the kind only shows up in logs.
        tracing::error!(kind = self.kind(), error = %self, "Recommendation request failed");

        let body = Json(ErrorResponse {
            error: FAILURE_MESSAGE.to_string(),
            details: self.to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
