#![forbid(unsafe_code)]

pub mod model;
pub mod normalize;
pub mod time;

pub use model::{
    AnswerOption, LabelError, OptionLabel, Question, QuestionError, QuestionSet,
    QuestionSetError, RawQuestion,
};
pub use normalize::{decode_entities, normalize_question, normalize_questions};
pub use time::Clock;
