use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use quiz_core::model::RawQuestion;

use super::QuestionProvider;
use crate::error::ProviderError;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenTriviaConfig {
    pub base_url: String,
    /// Questions per request; the service accepts 1 to 50.
    pub amount: u8,
    pub category: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub timeout: Duration,
}

impl Default for OpenTriviaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            amount: 5,
            category: None,
            difficulty: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl OpenTriviaConfig {
    fn endpoint(&self) -> String {
        format!("{}/api.php", self.base_url.trim_end_matches('/'))
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("amount", self.amount.to_string()),
            ("type", "multiple".to_string()),
        ];
        if let Some(category) = self.category {
            query.push(("category", category.to_string()));
        }
        if let Some(difficulty) = self.difficulty {
            query.push(("difficulty", difficulty.as_str().to_string()));
        }
        query
    }
}

/// Multiple-choice questions from the Open Trivia Database.
#[derive(Clone)]
pub struct OpenTriviaProvider {
    client: Client,
    config: OpenTriviaConfig,
}

impl OpenTriviaProvider {
    /// # Errors
    ///
    /// Returns `ProviderError::Http` if the HTTP client cannot be built.
    pub fn new(config: OpenTriviaConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &OpenTriviaConfig {
        &self.config
    }
}

#[async_trait]
impl QuestionProvider for OpenTriviaProvider {
    async fn fetch_questions(&self) -> Result<Vec<RawQuestion>, ProviderError> {
        let url = self.config.endpoint();
        debug!(%url, amount = self.config.amount, "requesting questions");

        let response = self
            .client
            .get(url)
            .query(&self.config.query())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus(response.status()));
        }

        let body: TriviaResponse = response.json().await?;
        body.into_questions()
    }

    fn name(&self) -> &'static str {
        "open-trivia"
    }
}

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<RawQuestion>,
}

impl TriviaResponse {
    fn into_questions(self) -> Result<Vec<RawQuestion>, ProviderError> {
        if self.response_code != 0 {
            return Err(ProviderError::Api {
                code: self.response_code,
                message: describe_response_code(self.response_code),
            });
        }
        if self.results.is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(self.results)
    }
}

fn describe_response_code(code: u8) -> &'static str {
    match code {
        1 => "not enough questions for the query",
        2 => "invalid parameter",
        3 => "session token not found",
        4 => "session token exhausted",
        5 => "too many requests, wait a few seconds",
        _ => "unknown response code",
    }
}
