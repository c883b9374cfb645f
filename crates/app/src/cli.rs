//! Command-line flags for the quiz binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use services::{Difficulty, OpenTriviaConfig, PacingHints};

/// Where questions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Source {
    /// Open Trivia Database over HTTP
    Remote,
    /// Built-in set, or `--questions-file` when given
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "quiz")]
#[command(version, about = "Multiple-choice trivia quiz in the terminal")]
#[command(long_about = r#"
Plays a short multiple-choice quiz.

Controls while a question is shown:
  a, b, c, d     select an option
  <enter>        submit the selection, or continue after feedback
  submit, next   same as <enter>, spelled out
  restart        fetch a new batch and start over
  quit           leave

Example:
  quiz --amount 10 --difficulty easy
  quiz --source static --questions-file saved.json
"#)]
pub struct Cli {
    /// Question source
    #[arg(long, value_enum, default_value = "remote", env = "QUIZ_SOURCE")]
    pub source: Source,

    /// Questions per quiz (remote source only)
    #[arg(
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(u8).range(1..=50),
        env = "QUIZ_AMOUNT"
    )]
    pub amount: u8,

    /// Open Trivia category id
    #[arg(long, value_name = "ID", env = "QUIZ_CATEGORY")]
    pub category: Option<u32>,

    #[arg(long, value_enum, env = "QUIZ_DIFFICULTY")]
    pub difficulty: Option<DifficultyArg>,

    /// Base URL of the Open Trivia service
    #[arg(
        long,
        value_name = "URL",
        default_value = services::providers::DEFAULT_BASE_URL,
        env = "QUIZ_API_BASE_URL"
    )]
    pub base_url: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10, env = "QUIZ_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// JSON file of questions for the static source
    #[arg(long, value_name = "PATH", env = "QUIZ_QUESTIONS_FILE")]
    pub questions_file: Option<PathBuf>,

    /// Skip the pauses after grading
    #[arg(long)]
    pub no_pacing: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    #[must_use]
    pub fn open_trivia_config(&self) -> OpenTriviaConfig {
        OpenTriviaConfig {
            base_url: self.base_url.clone(),
            amount: self.amount,
            category: self.category,
            difficulty: self.difficulty.map(Difficulty::from),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    #[must_use]
    pub fn pacing(&self) -> PacingHints {
        if self.no_pacing {
            PacingHints::none()
        } else {
            PacingHints::default()
        }
    }
}
