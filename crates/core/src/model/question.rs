use serde::Serialize;
use thiserror::Error;

use crate::model::label::{LabelError, OptionLabel};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("option {label} has empty text")]
    EmptyOption { label: OptionLabel },

    #[error("a question needs at least 2 options, got {count}")]
    TooFewOptions { count: usize },

    #[error("a question supports at most {max} options, got {count}", max = OptionLabel::MAX_OPTIONS)]
    TooManyOptions { count: usize },

    #[error("option at position {position} is labelled {label}, expected sequential labels")]
    LabelOutOfOrder { position: usize, label: OptionLabel },

    #[error("correct label {0} is not among the options")]
    CorrectLabelMissing(OptionLabel),

    #[error(transparent)]
    Label(#[from] LabelError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("question set is empty")]
    Empty,

    #[error("question {number} is invalid: {source}", number = .index + 1)]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

//
// ─── ANSWER OPTION ─────────────────────────────────────────────────────────────
//

/// One selectable answer: a label plus its display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    label: OptionLabel,
    text: String,
}

impl AnswerOption {
    #[must_use]
    pub fn new(label: OptionLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn label(&self) -> OptionLabel {
        self.label
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question with exactly one correct option.
///
/// Options keep the order they were built with; that order is the display
/// order for the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    text: String,
    options: Vec<AnswerOption>,
    correct_label: OptionLabel,
}

impl Question {
    /// Build a question from labelled options.
    ///
    /// Labels must run `A, B, C, ...` in order, which also makes them unique.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt or an option is blank, when there
    /// are fewer than 2 or more than 26 options, when labels are not sequential,
    /// or when `correct_label` does not name an option.
    pub fn new(
        text: impl Into<String>,
        options: Vec<AnswerOption>,
        correct_label: OptionLabel,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }

        let count = options.len();
        if count < 2 {
            return Err(QuestionError::TooFewOptions { count });
        }
        if count > OptionLabel::MAX_OPTIONS {
            return Err(QuestionError::TooManyOptions { count });
        }

        for (position, option) in options.iter().enumerate() {
            if option.label.index() != position {
                return Err(QuestionError::LabelOutOfOrder {
                    position,
                    label: option.label,
                });
            }
            if option.text.trim().is_empty() {
                return Err(QuestionError::EmptyOption {
                    label: option.label,
                });
            }
        }

        if correct_label.index() >= count {
            return Err(QuestionError::CorrectLabelMissing(correct_label));
        }

        Ok(Self {
            text,
            options,
            correct_label,
        })
    }

    /// Build a question from option texts in display order, labelling them `A`, `B`, ...
    ///
    /// # Errors
    ///
    /// Same as [`Question::new`]; `correct_index` past the end yields
    /// `QuestionError::CorrectLabelMissing`.
    pub fn from_texts(
        text: impl Into<String>,
        option_texts: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        if option_texts.len() > OptionLabel::MAX_OPTIONS {
            return Err(QuestionError::TooManyOptions {
                count: option_texts.len(),
            });
        }
        let options = option_texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Ok(AnswerOption::new(OptionLabel::from_index(index)?, text)))
            .collect::<Result<Vec<_>, LabelError>>()?;
        let correct_label = OptionLabel::from_index(correct_index)?;
        Self::new(text, options, correct_label)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_label(&self) -> OptionLabel {
        self.correct_label
    }

    /// The option carrying `correct_label`.
    #[must_use]
    pub fn correct_option(&self) -> &AnswerOption {
        &self.options[self.correct_label.index()]
    }

    #[must_use]
    pub fn option(&self, label: OptionLabel) -> Option<&AnswerOption> {
        self.options.get(label.index())
    }

    #[must_use]
    pub fn has_option(&self, label: OptionLabel) -> bool {
        label.index() < self.options.len()
    }

    #[must_use]
    pub fn is_correct(&self, label: OptionLabel) -> bool {
        label == self.correct_label
    }
}

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// Non-empty ordered list of questions for one quiz run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// # Errors
    ///
    /// Returns `QuestionSetError::Empty` if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionSetError> {
        if questions.is_empty() {
            return Err(QuestionSetError::Empty);
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl TryFrom<Vec<Question>> for QuestionSet {
    type Error = QuestionSetError;

    fn try_from(questions: Vec<Question>) -> Result<Self, Self::Error> {
        Self::new(questions)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
