use serde::{Deserialize, Serialize};

/// Question as delivered by a provider, before decoding and shuffling.
///
/// Text fields may still carry HTML entities (`&quot;`, `&#039;`, ...).
/// Field aliases accept the Open Trivia DB names so the same JSON shape can be
/// used for local question files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    #[serde(alias = "question")]
    pub text: String,
    #[serde(alias = "correct_answer")]
    pub correct_answer_text: String,
    #[serde(alias = "incorrect_answers")]
    pub incorrect_answer_texts: Vec<String>,
}

impl RawQuestion {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        correct_answer_text: impl Into<String>,
        incorrect_answer_texts: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            text: text.into(),
            correct_answer_text: correct_answer_text.into(),
            incorrect_answer_texts: incorrect_answer_texts.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of answers once correct and incorrect are combined.
    #[must_use]
    pub fn answer_count(&self) -> usize {
        self.incorrect_answer_texts.len() + 1
    }
}
