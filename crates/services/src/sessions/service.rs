use chrono::{DateTime, Utc};
use std::fmt;
use tracing::debug;

use quiz_core::Clock;
use quiz_core::model::{OptionLabel, Question, QuestionSet};

use super::progress::QuizProgress;
use super::view::{Feedback, FinalSummary, SessionView};
use crate::error::SessionError;

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Top-level status of a quiz run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Loading,
    Error,
    InProgress,
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Phase::Loading => "loading",
            Phase::Error => "in an error state",
            Phase::InProgress => "in progress",
            Phase::Completed => "completed",
        };
        f.write_str(text)
    }
}

/// Where the current question is within its select/submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStep {
    Presenting,
    Selected,
    Graded,
}

/// Result of a successful `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    NextQuestion { index: usize },
    Completed(FinalSummary),
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
struct Round {
    questions: QuestionSet,
    current: usize,
    selected: Option<OptionLabel>,
    feedback: Option<Feedback>,
    score: usize,
    started_at: DateTime<Utc>,
}

impl Round {
    fn question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }
}

#[derive(Debug, Clone)]
enum State {
    Loading,
    Failed { reason: String },
    InProgress(Round),
    Completed(FinalSummary),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz run: owns the questions, the current position, the selection and the score.
///
/// All transitions go through the methods below. Each either applies fully or
/// returns an error and leaves the session untouched, so an out-of-order call
/// from a presenter can never change the score or the position.
pub struct QuizSession {
    clock: Clock,
    state: State,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(Clock::default())
    }
}

impl QuizSession {
    /// A fresh session waiting for questions.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            state: State::Loading,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.state {
            State::Loading => Phase::Loading,
            State::Failed { .. } => Phase::Error,
            State::InProgress(_) => Phase::InProgress,
            State::Completed(_) => Phase::Completed,
        }
    }

    #[must_use]
    pub fn score(&self) -> usize {
        match &self.state {
            State::InProgress(round) => round.score,
            State::Completed(summary) => summary.final_score,
            State::Loading | State::Failed { .. } => 0,
        }
    }

    /// Number of questions in the run; 0 before questions are loaded.
    #[must_use]
    pub fn total(&self) -> usize {
        match &self.state {
            State::InProgress(round) => round.questions.len(),
            State::Completed(summary) => summary.total,
            State::Loading | State::Failed { .. } => 0,
        }
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            State::InProgress(round) => Some(round.current),
            _ => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match &self.state {
            State::InProgress(round) => round.question(),
            _ => None,
        }
    }

    #[must_use]
    pub fn selected_label(&self) -> Option<OptionLabel> {
        match &self.state {
            State::InProgress(round) => round.selected,
            _ => None,
        }
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        matches!(&self.state, State::InProgress(round) if round.feedback.is_some())
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        match &self.state {
            State::InProgress(round) => round.feedback.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn step(&self) -> Option<QuestionStep> {
        let State::InProgress(round) = &self.state else {
            return None;
        };
        Some(match (round.selected, &round.feedback) {
            (_, Some(_)) => QuestionStep::Graded,
            (Some(_), None) => QuestionStep::Selected,
            (None, None) => QuestionStep::Presenting,
        })
    }

    #[must_use]
    pub fn final_summary(&self) -> Option<&FinalSummary> {
        match &self.state {
            State::Completed(summary) => Some(summary),
            _ => None,
        }
    }

    #[must_use]
    pub fn error_reason(&self) -> Option<&str> {
        match &self.state {
            State::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        match &self.state {
            State::InProgress(round) => {
                let graded = usize::from(round.feedback.is_some());
                QuizProgress::new(round.current + graded, round.questions.len())
            }
            State::Completed(summary) => QuizProgress::new(summary.total, summary.total),
            State::Loading | State::Failed { .. } => QuizProgress::empty(),
        }
    }

    /// Snapshot for the presenter.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView::from_session(self)
    }

    fn invalid(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            operation,
            phase: self.phase(),
        }
    }

    /// Begin the quiz with the given questions.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is loading.
    /// Returns `SessionError::InvalidQuestionSet` if `questions` is empty.
    pub fn start(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        if self.phase() != Phase::Loading {
            return Err(self.invalid("start"));
        }
        self.start_set(QuestionSet::new(questions)?)
    }

    /// Begin the quiz with an already validated set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is loading.
    pub fn start_set(&mut self, questions: QuestionSet) -> Result<(), SessionError> {
        if self.phase() != Phase::Loading {
            return Err(self.invalid("start"));
        }
        debug!(total = questions.len(), "quiz started");
        self.state = State::InProgress(Round {
            questions,
            current: 0,
            selected: None,
            feedback: None,
            score: 0,
            started_at: self.clock.now(),
        });
        Ok(())
    }

    /// Record that questions could not be loaded.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is loading.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), SessionError> {
        if self.phase() != Phase::Loading {
            return Err(self.invalid("fail"));
        }
        let reason = reason.into();
        debug!(%reason, "quiz failed to load");
        self.state = State::Failed { reason };
        Ok(())
    }

    /// Choose an option for the current question, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `InProgress` or after the
    /// answer was submitted, and `SessionError::UnknownOption` if the question
    /// has no option with that label.
    pub fn select_option(&mut self, label: OptionLabel) -> Result<(), SessionError> {
        let phase = self.phase();
        let State::InProgress(round) = &mut self.state else {
            return Err(SessionError::InvalidTransition {
                operation: "select an option",
                phase,
            });
        };
        if round.feedback.is_some() {
            return Err(SessionError::InvalidTransition {
                operation: "change the answer after submitting",
                phase,
            });
        }
        if !round.question().is_some_and(|q| q.has_option(label)) {
            return Err(SessionError::UnknownOption(label));
        }

        debug!(index = round.current, %label, "option selected");
        round.selected = Some(label);
        Ok(())
    }

    /// Grade the selected option for the current question.
    ///
    /// The score increases by one when the selection is correct. A question can
    /// be graded only once.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` on a second submit for the same
    /// question, `SessionError::NoSelection` if nothing is selected, and
    /// `SessionError::InvalidTransition` outside `InProgress`.
    pub fn submit(&mut self) -> Result<Feedback, SessionError> {
        let phase = self.phase();
        let State::InProgress(round) = &mut self.state else {
            return Err(SessionError::InvalidTransition {
                operation: "submit",
                phase,
            });
        };
        if round.feedback.is_some() {
            return Err(SessionError::AlreadySubmitted);
        }
        let selected = round.selected.ok_or(SessionError::NoSelection)?;
        let question = round
            .questions
            .get(round.current)
            .ok_or(SessionError::InvalidTransition {
                operation: "submit",
                phase,
            })?;

        let correct = question.correct_option();
        let feedback = Feedback {
            question_index: round.current,
            is_correct: question.is_correct(selected),
            selected_label: selected,
            correct_label: correct.label(),
            correct_text: correct.text().to_owned(),
        };

        if feedback.is_correct {
            round.score += 1;
        }
        debug!(
            index = round.current,
            label = %selected,
            correct = feedback.is_correct,
            score = round.score,
            "answer graded"
        );
        round.feedback = Some(feedback.clone());
        Ok(feedback)
    }

    /// Move past a graded question: to the next one, or to `Completed` after the last.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` before the current answer is
    /// submitted or when the session is not in progress.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        let phase = self.phase();
        let now = self.clock.now();
        let State::InProgress(round) = &mut self.state else {
            return Err(SessionError::InvalidTransition {
                operation: "advance",
                phase,
            });
        };
        if round.feedback.is_none() {
            return Err(SessionError::InvalidTransition {
                operation: "advance before submitting",
                phase,
            });
        }

        if round.current >= round.questions.last_index() {
            let summary =
                FinalSummary::new(round.score, round.questions.len(), round.started_at, now);
            debug!(
                score = summary.final_score,
                total = summary.total,
                percentage = summary.percentage,
                "quiz completed"
            );
            self.state = State::Completed(summary.clone());
            return Ok(Advance::Completed(summary));
        }

        round.current += 1;
        round.selected = None;
        round.feedback = None;
        debug!(index = round.current, "next question");
        Ok(Advance::NextQuestion {
            index: round.current,
        })
    }

    /// Throw the run away and wait for a new `start`.
    pub fn restart(&mut self) {
        debug!(previous = %self.phase(), "quiz restarted");
        self.state = State::Loading;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase())
            .field("current", &self.current_index())
            .field("selected", &self.selected_label())
            .field("submitted", &self.is_submitted())
            .field("score", &self.score())
            .field("total", &self.total())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
