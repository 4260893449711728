pub mod cli;
pub mod question;
pub mod question_set;
pub mod storage;

pub use question::{Answer, Question, QuestionType};
pub use question_set::OptionSlot;
