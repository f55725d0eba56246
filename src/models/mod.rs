pub mod chat;
pub mod recommendation;

pub use chat::{
    ChatChoice, ChatChoiceMessage, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    CompletionRequest,
};
pub use recommendation::{
    ErrorResponse, Recommendation, RecommendationRequest, RecommendationsResponse,
    RECOMMENDATION_COUNT,
};
