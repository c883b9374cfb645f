use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use quiz_core::Clock;
use quiz_core::model::RawQuestion;
use quiz_core::normalize::normalize_questions;

use super::service::{Phase, QuizSession};
use crate::error::{ProviderError, SessionError};
use crate::providers::QuestionProvider;

/// What a load attempt did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Started { total: usize },
    Failed { reason: String },
}

/// Orchestrates question loading: fetch, normalize, then `start` or `fail`.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    provider: Arc<dyn QuestionProvider>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, provider: Arc<dyn QuestionProvider>) -> Self {
        Self { clock, provider }
    }

    /// A session in `Loading`, bound to this service's clock.
    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        QuizSession::new(self.clock)
    }

    /// Create a session and load questions into it.
    ///
    /// # Errors
    ///
    /// Only session misuse errors; provider failures end up in the session's
    /// `Error` phase and are reported through `LoadOutcome::Failed`.
    pub async fn start_session(&self) -> Result<(QuizSession, LoadOutcome), SessionError> {
        let mut session = self.new_session();
        let outcome = self.load(&mut session).await?;
        Ok((session, outcome))
    }

    /// Fetch questions for a session that is still loading.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` if the session is not loading.
    pub async fn load(&self, session: &mut QuizSession) -> Result<LoadOutcome, SessionError> {
        ensure_loading(session)?;
        let fetched = self.provider.fetch_questions().await;
        let mut rng = rand::rng();
        self.apply(session, fetched, &mut rng)
    }

    /// Same as [`QuizLoopService::load`] with a caller-provided RNG for the shuffle.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` if the session is not loading.
    pub async fn load_with_rng<R: Rng + ?Sized + Send>(
        &self,
        session: &mut QuizSession,
        rng: &mut R,
    ) -> Result<LoadOutcome, SessionError> {
        ensure_loading(session)?;
        let fetched = self.provider.fetch_questions().await;
        self.apply(session, fetched, rng)
    }

    /// Discard the session's run and load a fresh batch.
    ///
    /// # Errors
    ///
    /// Only session misuse errors, as for [`QuizLoopService::load`].
    pub async fn reload(&self, session: &mut QuizSession) -> Result<LoadOutcome, SessionError> {
        session.restart();
        self.load(session).await
    }

    fn apply<R: Rng + ?Sized>(
        &self,
        session: &mut QuizSession,
        fetched: Result<Vec<RawQuestion>, ProviderError>,
        rng: &mut R,
    ) -> Result<LoadOutcome, SessionError> {
        let provider = self.provider.name();
        let raws = match fetched {
            Ok(raws) if raws.is_empty() => return fail(session, provider, &ProviderError::Empty),
            Ok(raws) => raws,
            Err(err) => return fail(session, provider, &err),
        };

        match normalize_questions(&raws, rng) {
            Ok(questions) => {
                let total = questions.len();
                session.start_set(questions)?;
                info!(provider, total, "questions loaded");
                Ok(LoadOutcome::Started { total })
            }
            Err(err) => {
                let reason = format!("invalid question data: {err}");
                warn!(provider, %reason, "rejecting question batch");
                session.fail(reason.clone())?;
                Ok(LoadOutcome::Failed { reason })
            }
        }
    }
}

fn ensure_loading(session: &QuizSession) -> Result<(), SessionError> {
    match session.phase() {
        Phase::Loading => Ok(()),
        phase => Err(SessionError::InvalidTransition {
            operation: "load questions",
            phase,
        }),
    }
}

fn fail(
    session: &mut QuizSession,
    provider: &'static str,
    err: &ProviderError,
) -> Result<LoadOutcome, SessionError> {
    let reason = err.to_string();
    warn!(provider, error = %reason, "question provider failed");
    session.fail(reason.clone())?;
    Ok(LoadOutcome::Failed { reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::StaticProvider;
    use quiz_core::time::fixed_clock;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn service(provider: StaticProvider) -> QuizLoopService {
        QuizLoopService::new(fixed_clock(), Arc::new(provider))
    }

    #[tokio::test]
    async fn load_starts_session_with_normalized_questions() {
        let svc = service(StaticProvider::builtin());
        let mut session = svc.new_session();

        let outcome = svc
            .load_with_rng(&mut session, &mut StdRng::seed_from_u64(1))
            .await
            .unwrap();

        assert_eq!(outcome, LoadOutcome::Started { total: 5 });
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.total(), 5);
    }

    #[tokio::test]
    async fn entities_are_decoded_before_display() {
        let svc = service(StaticProvider::new(vec![RawQuestion::new(
            "Who wrote &quot;Hamlet&quot;?",
            "Shakespeare",
            ["Marlowe"],
        )]));

        let (session, _) = svc.start_session().await.unwrap();

        assert_eq!(
            session.current_question().unwrap().text(),
            "Who wrote \"Hamlet\"?"
        );
    }

    #[tokio::test]
    async fn empty_provider_moves_session_to_error() {
        let svc = service(StaticProvider::new(Vec::new()));

        let (session, outcome) = svc.start_session().await.unwrap();

        assert_eq!(
            outcome,
            LoadOutcome::Failed {
                reason: "no questions were returned".into()
            }
        );
        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(session.error_reason(), Some("no questions were returned"));
    }

    #[tokio::test]
    async fn malformed_question_fails_the_load() {
        let svc = service(StaticProvider::new(vec![RawQuestion::new(
            "Lonely",
            "only answer",
            Vec::<String>::new(),
        )]));

        let (session, outcome) = svc.start_session().await.unwrap();

        assert!(matches!(outcome, LoadOutcome::Failed { .. }));
        assert_eq!(session.phase(), Phase::Error);
        assert!(session.error_reason().unwrap().starts_with("invalid question data"));
    }

    #[tokio::test]
    async fn load_requires_loading_phase() {
        let svc = service(StaticProvider::builtin());
        let (mut session, _) = svc.start_session().await.unwrap();

        let err = svc.load(&mut session).await.unwrap_err();

        assert_eq!(
            err,
            SessionError::InvalidTransition {
                operation: "load questions",
                phase: Phase::InProgress
            }
        );
    }

    #[tokio::test]
    async fn reload_recovers_from_error() {
        let svc = service(StaticProvider::builtin());
        let mut session = svc.new_session();
        session.fail("offline").unwrap();

        let outcome = svc.reload(&mut session).await.unwrap();

        assert_eq!(outcome, LoadOutcome::Started { total: 5 });
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), Some(0));
    }
}
