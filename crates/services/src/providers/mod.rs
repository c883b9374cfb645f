//! Sources of raw quiz questions.

mod open_trivia;
mod static_list;

use async_trait::async_trait;

use quiz_core::model::RawQuestion;

use crate::error::ProviderError;

pub use open_trivia::{DEFAULT_BASE_URL, Difficulty, OpenTriviaConfig, OpenTriviaProvider};
pub use static_list::StaticProvider;

/// Contract for anything that can hand the quiz a batch of questions.
///
/// Implementations return a non-empty list on success. Text fields may still
/// contain HTML entities; decoding happens during normalization.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Fetch one batch of questions.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the source is unreachable, rejects the
    /// request, or has nothing to offer.
    async fn fetch_questions(&self) -> Result<Vec<RawQuestion>, ProviderError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
