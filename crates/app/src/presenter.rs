//! Line-oriented terminal front end for a quiz session.
//!
//! The presenter only reads `SessionView` snapshots and calls session
//! operations; it never keeps its own copy of score or position.

use std::io::{self, Write};
use std::str::FromStr;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error};

use quiz_core::model::OptionLabel;
use services::{
    FinalSummary, PacingHints, Phase, QuizLoopService, QuizSession, SessionError,
    SessionView,
};

const BAR_WIDTH: usize = 20;

#[derive(Debug, Error)]
pub enum PresenterError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Select(OptionLabel),
    /// Bare enter: submit or continue, whichever is allowed.
    Proceed,
    Submit,
    Next,
    Restart,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Self::Proceed,
            "submit" => Self::Submit,
            "next" => Self::Next,
            "restart" => Self::Restart,
            "quit" | "exit" => Self::Quit,
            _ => OptionLabel::from_str(trimmed)
                .map_or_else(|_| Self::Unknown(trimmed.to_owned()), Self::Select),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

pub struct TerminalPresenter<R, W> {
    service: QuizLoopService,
    pacing: PacingHints,
    input: R,
    output: W,
}

impl<R, W> TerminalPresenter<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    #[must_use]
    pub fn new(service: QuizLoopService, pacing: PacingHints, input: R, output: W) -> Self {
        Self {
            service,
            pacing,
            input,
            output,
        }
    }

    /// Play until the user quits or input ends.
    ///
    /// Returns the most recent final summary, if a quiz was finished.
    ///
    /// # Errors
    ///
    /// Returns `PresenterError::Io` when the terminal cannot be read or written.
    pub async fn run(&mut self) -> Result<Option<FinalSummary>, PresenterError> {
        writeln!(self.output, "Loading questions...")?;
        let (mut session, _) = self.service.start_session().await?;
        let mut last_summary = None;

        loop {
            let view = session.view();
            if let Some(summary) = &view.final_summary {
                last_summary = Some(summary.clone());
            }
            self.render(&view)?;

            let Some(line) = self.read_line().await? else {
                break;
            };
            let command = Command::parse(&line);
            debug!(?command, phase = %view.phase, "input");

            let flow = match view.phase {
                Phase::Loading => {
                    self.service.load(&mut session).await?;
                    Flow::Continue
                }
                Phase::Error | Phase::Completed => {
                    self.handle_finished(&mut session, command).await?
                }
                Phase::InProgress => self.handle_question(&mut session, &view, command).await?,
            };
            if matches!(flow, Flow::Quit) {
                break;
            }
        }

        writeln!(self.output, "Bye!")?;
        Ok(last_summary)
    }

    async fn handle_finished(
        &mut self,
        session: &mut QuizSession,
        command: Command,
    ) -> Result<Flow, PresenterError> {
        match command {
            Command::Restart | Command::Proceed => {
                writeln!(self.output, "Loading questions...")?;
                self.service.reload(session).await?;
            }
            Command::Quit => return Ok(Flow::Quit),
            _ => writeln!(self.output, "Type restart to play again, or quit.")?,
        }
        Ok(Flow::Continue)
    }

    async fn handle_question(
        &mut self,
        session: &mut QuizSession,
        view: &SessionView,
        command: Command,
    ) -> Result<Flow, PresenterError> {
        match command {
            Command::Select(label) if view.can_select() => {
                let result = session.select_option(label);
                self.report(result)?;
            }
            Command::Select(_) => {
                writeln!(self.output, "Answer already submitted. Press enter to continue.")?;
            }
            Command::Submit | Command::Proceed if view.can_submit() => {
                self.submit(session).await?;
            }
            Command::Next | Command::Proceed if view.can_advance() => {
                let result = session.advance().map(|_| ());
                self.report(result)?;
            }
            Command::Submit | Command::Proceed if view.can_select() => {
                writeln!(self.output, "Pick an option first.")?;
            }
            Command::Submit => writeln!(self.output, "Answer already submitted.")?,
            Command::Next => writeln!(self.output, "Submit an answer first.")?,
            Command::Proceed => {}
            Command::Restart => {
                writeln!(self.output, "Loading questions...")?;
                self.service.reload(session).await?;
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(raw) => {
                writeln!(self.output, "Unrecognized input: {raw}")?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn submit(&mut self, session: &mut QuizSession) -> Result<(), PresenterError> {
        let feedback = match session.submit() {
            Ok(feedback) => feedback,
            Err(err) => return self.report(Err(err)),
        };

        if feedback.is_correct {
            writeln!(self.output, "Correct!")?;
        } else {
            writeln!(
                self.output,
                "Wrong. The answer was {}) {}.",
                feedback.correct_label, feedback.correct_text
            )?;
        }
        self.output.flush()?;

        let view = session.view();
        if let Some(delay) = view.pacing_delay(&self.pacing) {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        let is_last = view.question.as_ref().is_some_and(|q| q.is_last);
        if is_last {
            let result = session.advance().map(|_| ());
            return self.report(result);
        }
        Ok(())
    }

    /// Session misuse is shown and logged, never fatal.
    fn report(&mut self, result: Result<(), SessionError>) -> Result<(), PresenterError> {
        if let Err(err) = result {
            error!(error = %err, "session rejected input");
            writeln!(self.output, "{err}")?;
        }
        Ok(())
    }

    async fn read_line(&mut self) -> Result<Option<String>, PresenterError> {
        self.output.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).await?;
        Ok((read > 0).then_some(line))
    }

    //
    // ─── RENDERING ─────────────────────────────────────────────────────────────
    //

    fn render(&mut self, view: &SessionView) -> io::Result<()> {
        match view.phase {
            Phase::Loading => writeln!(self.output, "Loading questions..."),
            Phase::Error => {
                writeln!(
                    self.output,
                    "Could not load questions: {}",
                    view.error.as_deref().unwrap_or("unknown error")
                )?;
                write!(self.output, "Type restart to try again, or quit. > ")
            }
            Phase::Completed => self.render_summary(view),
            Phase::InProgress => self.render_question(view),
        }
    }

    fn render_question(&mut self, view: &SessionView) -> io::Result<()> {
        let Some(question) = &view.question else {
            return Ok(());
        };

        writeln!(self.output)?;
        writeln!(
            self.output,
            "Question {} of {}  {}  Score: {}/{}",
            question.number,
            view.total,
            progress_bar(view.progress_percent()),
            view.score,
            view.total
        )?;
        writeln!(self.output, "{}", question.text)?;
        for option in &question.options {
            let marker = if view.selected_label == Some(option.label()) {
                '>'
            } else {
                ' '
            };
            writeln!(self.output, " {marker} {}) {}", option.label(), option.text())?;
        }

        let prompt = if view.can_advance() {
            "Press enter for the next question"
        } else if view.can_submit() {
            "Press enter to submit, or pick another option"
        } else {
            "Pick an option"
        };
        write!(self.output, "{prompt} > ")
    }

    fn render_summary(&mut self, view: &SessionView) -> io::Result<()> {
        let Some(summary) = &view.final_summary else {
            return Ok(());
        };

        writeln!(self.output)?;
        writeln!(self.output, "Quiz complete!")?;
        writeln!(
            self.output,
            "You scored {} out of {} ({}%).",
            summary.final_score, summary.total, summary.percentage
        )?;
        writeln!(self.output, "{}", summary.tier.message())?;
        write!(self.output, "Type restart to play again, or quit. > ")
    }
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {percent:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}
