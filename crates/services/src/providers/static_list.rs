use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use quiz_core::model::RawQuestion;

use super::QuestionProvider;
use crate::error::ProviderError;

/// Questions held in memory: the built-in set or a local JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticProvider {
    questions: Vec<RawQuestion>,
}

/// Accepted file shapes: a bare list, or a saved Open Trivia response.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionFile {
    List(Vec<RawQuestion>),
    Envelope { results: Vec<RawQuestion> },
}

impl StaticProvider {
    #[must_use]
    pub fn new(questions: Vec<RawQuestion>) -> Self {
        Self { questions }
    }

    /// General-knowledge set used when no remote source is wanted.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            RawQuestion::new(
                "Which planet is the largest in our solar system?",
                "Jupiter",
                ["Saturn", "Neptune", "Earth"],
            ),
            RawQuestion::new(
                "What is the capital of Japan?",
                "Tokyo",
                ["Kyoto", "Osaka", "Hiroshima"],
            ),
            RawQuestion::new(
                "Who wrote &quot;Romeo and Juliet&quot;?",
                "William Shakespeare",
                ["Charles Dickens", "Jane Austen", "Mark Twain"],
            ),
            RawQuestion::new(
                "What is the chemical symbol for gold?",
                "Au",
                ["Ag", "Gd", "Go"],
            ),
            RawQuestion::new(
                "How many continents are there on Earth?",
                "7",
                ["5", "6", "8"],
            ),
        ])
    }

    /// Parse questions from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Parse` if the text is not a question list or an
    /// Open Trivia response body.
    pub fn from_json_str(json: &str) -> Result<Self, ProviderError> {
        let questions = match serde_json::from_str::<QuestionFile>(json)? {
            QuestionFile::List(questions) | QuestionFile::Envelope { results: questions } => {
                questions
            }
        };
        Ok(Self::new(questions))
    }

    /// # Errors
    ///
    /// Returns `ProviderError::File` if the file cannot be read, or
    /// `ProviderError::Parse` if its contents are malformed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ProviderError::File {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[async_trait]
impl QuestionProvider for StaticProvider {
    async fn fetch_questions(&self) -> Result<Vec<RawQuestion>, ProviderError> {
        if self.questions.is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(self.questions.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builtin_set_has_five_multiple_choice_questions() {
        let provider = StaticProvider::builtin();
        let questions = provider.fetch_questions().await.unwrap();

        assert_eq!(questions.len(), 5);
        assert!(questions.iter().all(|q| q.answer_count() == 4));
    }

    #[tokio::test]
    async fn empty_list_is_a_provider_error() {
        let err = StaticProvider::new(Vec::new())
            .fetch_questions()
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Empty));
    }

    #[test]
    fn parses_plain_list() {
        let provider = StaticProvider::from_json_str(
            r#"[{"text": "Q", "correct_answer_text": "a", "incorrect_answer_texts": ["b"]}]"#,
        )
        .unwrap();
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn parses_saved_open_trivia_response() {
        let provider = StaticProvider::from_json_str(
            r#"{"response_code": 0, "results": [
                {"question": "Q1", "correct_answer": "a", "incorrect_answers": ["b", "c"]},
                {"question": "Q2", "correct_answer": "x", "incorrect_answers": ["y"]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(provider.len(), 2);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = StaticProvider::from_json_str(r#"{"questions": 3}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_file_error() {
        let err = StaticProvider::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ProviderError::File { .. }));
    }
}
