use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quiz_core::model::{OptionLabel, Question, RawQuestion};
use quiz_core::time::fixed_clock;
use services::{
    Advance, LoadOutcome, Phase, ProviderError, QuestionProvider, QuizLoopService, QuizSession,
    SessionError, StaticProvider,
};

fn question(text: &str, options: &[&str], correct: usize) -> Question {
    let options = options.iter().map(|s| (*s).to_owned()).collect();
    Question::from_texts(text, options, correct).expect("valid question")
}

fn planets_and_capitals() -> Vec<Question> {
    vec![
        question(
            "Which planet is the largest in our solar system?",
            &["Saturn", "Jupiter", "Neptune", "Earth"],
            1,
        ),
        question(
            "What is the capital of Japan?",
            &["Kyoto", "Osaka", "Tokyo", "Hiroshima"],
            2,
        ),
    ]
}

fn numbered_questions(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| question(&format!("Question {i}?"), &["w", "x", "y", "z"], i % 4))
        .collect()
}

#[test]
fn jupiter_and_tokyo_scenario() {
    let mut session = QuizSession::new(fixed_clock());
    session.start(planets_and_capitals()).expect("start");

    session.select_option(OptionLabel::B).expect("select B");
    let feedback = session.submit().expect("submit first");
    assert!(feedback.is_correct);
    assert_eq!(feedback.correct_text, "Jupiter");
    assert_eq!(session.score(), 1);

    assert_eq!(session.advance().expect("advance"), Advance::NextQuestion { index: 1 });

    session.select_option(OptionLabel::A).expect("select A");
    let feedback = session.submit().expect("submit second");
    assert!(!feedback.is_correct);
    assert_eq!(feedback.correct_text, "Tokyo");
    assert_eq!(session.score(), 1);

    let Advance::Completed(summary) = session.advance().expect("complete") else {
        panic!("expected the quiz to complete");
    };
    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(summary.final_score, 1);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.percentage, 50);

    let view = session.view();
    assert_eq!(view.final_summary, Some(summary));
    assert_eq!(view.progress_percent(), 100);
    assert!(view.question.is_none());
}

#[test]
fn exactly_n_advances_complete_the_quiz() {
    for n in 1..=6 {
        let mut session = QuizSession::new(fixed_clock());
        session.start(numbered_questions(n)).expect("start");

        for step in 0..n {
            assert_eq!(session.phase(), Phase::InProgress);
            assert_eq!(session.current_index(), Some(step));
            session.select_option(OptionLabel::A).expect("select");
            session.submit().expect("submit");
            session.advance().expect("advance");
        }

        assert_eq!(session.phase(), Phase::Completed, "n = {n}");
        assert_eq!(session.total(), n);
    }
}

#[test]
fn score_counts_correct_submissions_only() {
    let questions = numbered_questions(8);
    let correct_labels: Vec<OptionLabel> = questions.iter().map(Question::correct_label).collect();
    let mut session = QuizSession::new(fixed_clock());
    session.start(questions).expect("start");

    let mut expected = 0;
    let mut last_score = 0;
    for (i, correct) in correct_labels.iter().enumerate() {
        let label = if i % 3 == 0 {
            *correct
        } else {
            OptionLabel::from_index((correct.index() + 1) % 4).expect("label")
        };
        // Changing the mind first must not matter; only the submitted label counts.
        session.select_option(*correct).expect("select");
        session.select_option(label).expect("reselect");
        let feedback = session.submit().expect("submit");
        if feedback.is_correct {
            expected += 1;
        }
        assert!(session.score() >= last_score);
        last_score = session.score();
        session.advance().expect("advance");
    }

    assert_eq!(session.score(), expected);
    assert_eq!(expected, 3);
    assert!(session.score() <= session.total());
}

#[test]
fn double_submit_fails_and_keeps_score() {
    let mut session = QuizSession::new(fixed_clock());
    session.start(planets_and_capitals()).expect("start");
    session.select_option(OptionLabel::B).expect("select");
    session.submit().expect("submit");

    for _ in 0..3 {
        assert_eq!(session.submit().unwrap_err(), SessionError::AlreadySubmitted);
    }
    assert_eq!(session.score(), 1);
}

#[test]
fn advance_before_submit_fails_and_keeps_index() {
    let mut session = QuizSession::new(fixed_clock());
    session.start(planets_and_capitals()).expect("start");

    assert!(matches!(
        session.advance(),
        Err(SessionError::InvalidTransition { .. })
    ));
    assert_eq!(session.current_index(), Some(0));

    session.select_option(OptionLabel::C).expect("select");
    assert!(matches!(
        session.advance(),
        Err(SessionError::InvalidTransition { .. })
    ));
    assert_eq!(session.current_index(), Some(0));
}

#[test]
fn operations_before_start_are_rejected() {
    let mut session = QuizSession::new(fixed_clock());

    assert!(matches!(
        session.select_option(OptionLabel::A),
        Err(SessionError::InvalidTransition {
            phase: Phase::Loading,
            ..
        })
    ));
    assert!(matches!(
        session.submit(),
        Err(SessionError::InvalidTransition { .. })
    ));
    assert!(matches!(
        session.advance(),
        Err(SessionError::InvalidTransition { .. })
    ));
}

#[test]
fn restart_after_completion_starts_clean() {
    let mut session = QuizSession::new(fixed_clock());
    session.start(planets_and_capitals()).expect("start");
    for label in [OptionLabel::B, OptionLabel::C] {
        session.select_option(label).expect("select");
        session.submit().expect("submit");
        session.advance().expect("advance");
    }
    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(session.score(), 2);

    session.restart();
    assert_eq!(session.phase(), Phase::Loading);

    session.start(planets_and_capitals()).expect("restart");
    assert_eq!(session.score(), 0);
    assert_eq!(session.current_index(), Some(0));
    assert_eq!(session.selected_label(), None);
    assert!(session.final_summary().is_none());
}

//
// ─── LOOP SERVICE WITH FAKE PROVIDERS ──────────────────────────────────────────
//

/// Fails on the first fetch, then serves questions.
struct FlakyProvider {
    calls: AtomicUsize,
    questions: Vec<RawQuestion>,
}

#[async_trait]
impl QuestionProvider for FlakyProvider {
    async fn fetch_questions(&self) -> Result<Vec<RawQuestion>, ProviderError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(ProviderError::Api {
                code: 5,
                message: "too many requests, wait a few seconds",
            });
        }
        Ok(self.questions.clone())
    }

    fn name(&self) -> &'static str {
        "flaky"
    }
}

#[tokio::test]
async fn provider_error_then_restart_refetches() {
    let provider = Arc::new(FlakyProvider {
        calls: AtomicUsize::new(0),
        questions: vec![RawQuestion::new(
            "What is the capital of Japan?",
            "Tokyo",
            ["Kyoto", "Osaka", "Hiroshima"],
        )],
    });
    let svc = QuizLoopService::new(fixed_clock(), provider.clone());

    let (mut session, outcome) = svc.start_session().await.expect("load");
    assert!(matches!(outcome, LoadOutcome::Failed { .. }));
    assert_eq!(session.phase(), Phase::Error);
    assert!(session.error_reason().unwrap().contains("code 5"));

    let outcome = svc.reload(&mut session).await.expect("reload");
    assert_eq!(outcome, LoadOutcome::Started { total: 1 });
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);

    let question = session.current_question().expect("question").clone();
    session
        .select_option(question.correct_label())
        .expect("select");
    assert!(session.submit().expect("submit").is_correct);
    assert!(matches!(
        session.advance().expect("advance"),
        Advance::Completed(_)
    ));
    assert_eq!(session.final_summary().unwrap().percentage, 100);
}

#[tokio::test]
async fn builtin_quiz_can_be_played_to_the_end() {
    let svc = QuizLoopService::new(fixed_clock(), Arc::new(StaticProvider::builtin()));
    let (mut session, _) = svc.start_session().await.expect("load");

    while session.phase() == Phase::InProgress {
        let correct = session.current_question().expect("question").correct_label();
        session.select_option(correct).expect("select");
        session.submit().expect("submit");
        session.advance().expect("advance");
    }

    let summary = session.final_summary().expect("summary");
    assert_eq!(summary.final_score, 5);
    assert_eq!(summary.percentage, 100);
    assert_eq!(
        summary.tier.message(),
        "Excellent! You're a quiz master!"
    );
}
