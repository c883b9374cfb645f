use chrono::{DateTime, Utc};
use std::time::Duration;

use quiz_core::model::{AnswerOption, OptionLabel};

use super::progress::{QuizProgress, rounded_percent};
use super::service::{Phase, QuizSession};

//
// ─── GRADING RESULTS ───────────────────────────────────────────────────────────
//

/// Outcome of submitting an answer, enough to render feedback immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub question_index: usize,
    pub is_correct: bool,
    pub selected_label: OptionLabel,
    pub correct_label: OptionLabel,
    pub correct_text: String,
}

/// Coarse rating of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PerformanceTier {
    NeedsPractice,
    Fair,
    Good,
    Excellent,
}

impl PerformanceTier {
    #[must_use]
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::NeedsPractice,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! You're a quiz master!",
            Self::Good => "Good job! You did well!",
            Self::Fair => "Not bad! Keep practicing!",
            Self::NeedsPractice => "Keep studying! You'll get better!",
        }
    }
}

/// Final result of a completed quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalSummary {
    pub final_score: usize,
    pub total: usize,
    pub percentage: u8,
    pub tier: PerformanceTier,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl FinalSummary {
    pub(crate) fn new(
        final_score: usize,
        total: usize,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let percentage = rounded_percent(final_score, total);
        Self {
            final_score,
            total,
            percentage,
            tier: PerformanceTier::from_percentage(percentage),
            started_at,
            completed_at,
        }
    }
}

//
// ─── PACING ────────────────────────────────────────────────────────────────────
//

/// Suggested pauses after grading, before the presenter reveals the next control.
///
/// Purely cosmetic; the session accepts `advance` as soon as an answer is graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingHints {
    pub next_delay: Duration,
    pub completion_delay: Duration,
}

impl Default for PacingHints {
    fn default() -> Self {
        Self {
            next_delay: Duration::from_millis(1000),
            completion_delay: Duration::from_millis(1500),
        }
    }
}

impl PacingHints {
    #[must_use]
    pub fn none() -> Self {
        Self {
            next_delay: Duration::ZERO,
            completion_delay: Duration::ZERO,
        }
    }
}

//
// ─── READ MODEL ────────────────────────────────────────────────────────────────
//

/// The question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub index: usize,
    /// One-based position for display ("Question 2 of 5").
    pub number: usize,
    pub text: String,
    pub options: Vec<AnswerOption>,
    pub is_last: bool,
}

/// Read-only snapshot of a session, produced after every operation.
///
/// Owns its data so a presenter can keep it while the session moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub phase: Phase,
    pub question: Option<QuestionView>,
    pub selected_label: Option<OptionLabel>,
    pub submitted: bool,
    pub feedback: Option<Feedback>,
    pub score: usize,
    pub total: usize,
    pub progress: QuizProgress,
    pub final_summary: Option<FinalSummary>,
    pub error: Option<String>,
}

impl SessionView {
    pub(crate) fn from_session(session: &QuizSession) -> Self {
        let question = session.current_index().zip(session.current_question()).map(
            |(index, question)| QuestionView {
                index,
                number: index + 1,
                text: question.text().to_owned(),
                options: question.options().to_vec(),
                is_last: index + 1 == session.total(),
            },
        );

        Self {
            phase: session.phase(),
            question,
            selected_label: session.selected_label(),
            submitted: session.is_submitted(),
            feedback: session.feedback().cloned(),
            score: session.score(),
            total: session.total(),
            progress: session.progress(),
            final_summary: session.final_summary().cloned(),
            error: session.error_reason().map(str::to_owned),
        }
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.progress.percent
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        match &self.question {
            Some(question) => question.options.as_slice(),
            None => &[],
        }
    }

    #[must_use]
    pub fn has_option(&self, label: OptionLabel) -> bool {
        self.options().iter().any(|option| option.label() == label)
    }

    /// Options may be chosen (answer buttons enabled).
    #[must_use]
    pub fn can_select(&self) -> bool {
        self.phase == Phase::InProgress && !self.submitted
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.can_select() && self.selected_label.is_some()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.phase == Phase::InProgress && self.submitted
    }

    /// Pause the presenter should take before showing the next control, if any.
    #[must_use]
    pub fn pacing_delay(&self, hints: &PacingHints) -> Option<Duration> {
        if !self.can_advance() {
            return None;
        }
        let is_last = self.question.as_ref().is_some_and(|q| q.is_last);
        Some(if is_last {
            hints.completion_delay
        } else {
            hints.next_delay
        })
    }
}
