use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of recommendations in every successful response
pub const RECOMMENDATION_COUNT: usize = 10;

/// A single similar title suggested for the searched movie or series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    /// 1-based position in the result list
    pub id: u32,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub genre: String,
    pub description: String,
    /// Always `null` from the service; filled in by the client
    pub poster: Option<String>,
}

/// Request body accepted by the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub movie_title: Option<Value>,
}

impl RecommendationRequest {
    pub fn new(movie_title: impl Into<String>) -> Self {
        Self {
            movie_title: Some(Value::String(movie_title.into())),
        }
    }

    /// Title as text; numeric titles such as 1917 are accepted as written
    pub fn title_text(&self) -> Option<String> {
        match self.movie_title.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Success envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}

/// Failure envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}
