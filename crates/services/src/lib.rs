#![forbid(unsafe_code)]

pub mod error;
pub mod providers;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::{ProviderError, SessionError};
pub use providers::{
    Difficulty, OpenTriviaConfig, OpenTriviaProvider, QuestionProvider, StaticProvider,
};

pub use sessions::{
    Advance, Feedback, FinalSummary, LoadOutcome, PacingHints, PerformanceTier, Phase,
    QuestionStep, QuestionView, QuizLoopService, QuizProgress, QuizSession, SessionView,
};
