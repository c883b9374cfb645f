//! Turns provider output into validated, shuffled, labelled questions.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{Question, QuestionError, QuestionSet, QuestionSetError, RawQuestion};

/// Decode HTML character references (`&amp;`, `&quot;`, `&#039;`, `&#x27;`, ...).
#[must_use]
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Normalize one raw question.
///
/// Every text is decoded first, then the correct and incorrect answers are
/// shuffled together and labelled `A`, `B`, ... in the shuffled order. The
/// correct answer is tracked by position through the shuffle, so duplicate
/// answer texts cannot confuse which label is correct.
///
/// # Errors
///
/// Returns `QuestionError` if the decoded question breaks a `Question` invariant
/// (blank text, fewer than 2 or more than 26 answers).
pub fn normalize_question<R: Rng + ?Sized>(
    raw: &RawQuestion,
    rng: &mut R,
) -> Result<Question, QuestionError> {
    let text = decode_entities(&raw.text);

    let mut answers: Vec<(bool, String)> = Vec::with_capacity(raw.answer_count());
    answers.push((true, decode_entities(&raw.correct_answer_text)));
    answers.extend(
        raw.incorrect_answer_texts
            .iter()
            .map(|answer| (false, decode_entities(answer))),
    );

    answers.shuffle(rng);

    let correct_index = answers
        .iter()
        .position(|(is_correct, _)| *is_correct)
        .unwrap_or_default();
    let option_texts = answers.into_iter().map(|(_, text)| text).collect();

    Question::from_texts(text, option_texts, correct_index)
}

/// Normalize a whole provider batch into a `QuestionSet`.
///
/// # Errors
///
/// Returns `QuestionSetError::Empty` for an empty batch, or
/// `QuestionSetError::InvalidQuestion` naming the first question that fails.
pub fn normalize_questions<R: Rng + ?Sized>(
    raws: &[RawQuestion],
    rng: &mut R,
) -> Result<QuestionSet, QuestionSetError> {
    let questions = raws
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            normalize_question(raw, rng)
                .map_err(|source| QuestionSetError::InvalidQuestion { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    QuestionSet::new(questions)
}
