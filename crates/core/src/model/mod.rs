mod label;
mod question;
mod raw;

pub use label::{LabelError, OptionLabel};
pub use question::{AnswerOption, Question, QuestionError, QuestionSet, QuestionSetError};
pub use raw::RawQuestion;
