mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::{QuizProgress, rounded_percent};
pub use service::{Advance, Phase, QuestionStep, QuizSession};
pub use view::{FinalSummary, Feedback, PacingHints, PerformanceTier, QuestionView, SessionView};
pub use workflow::{LoadOutcome, QuizLoopService};
