/// Language-model provider abstraction
///
/// The recommendation service only needs "prompt in, text out". Keeping that behind a
/// trait lets the DeepSeek client be swapped for another chat-completion API, or for a
/// mock in tests, without touching prompt construction or validation.
use crate::{error::AppResult, models::CompletionRequest};

pub mod deepseek;

pub use deepseek::DeepSeekProvider;

/// Trait for chat-completion providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LanguageModelProvider: Send + Sync {
    /// Send one completion request and return the model's raw text reply
    ///
    /// Implementations make exactly one outbound call and never retry.
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
