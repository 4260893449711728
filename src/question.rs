use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoiceQuestion,
    ShortAnswerQuestion,
}

impl Display for QuestionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoiceQuestion => write!(f, "multiple_choice_question"),
            QuestionType::ShortAnswerQuestion => write!(f, "short_answer_question"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub expected: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub published: bool,
}

impl Question {
    /// A question is empty when it has no body, no expected answer and no options.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.expected.is_empty() && self.options.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: i64,
    pub text: String,
    pub submitted: bool,
    pub correct: bool,
}

impl Answer {
    pub fn blank(question_id: i64) -> Self {
        Answer {
            question_id,
            text: String::new(),
            submitted: false,
            correct: false,
        }
    }
}

pub fn make_blank_question(id: i64, name: &str, question_type: QuestionType) -> Question {
    Question {
        id,
        name: name.to_string(),
        question_type,
        body: String::new(),
        expected: String::new(),
        options: Vec::new(),
        points: 0,
        published: false,
    }
}

/// Copies `source` under a new id. Every other field is kept as is.
pub fn duplicate_question(new_id: i64, source: &Question) -> Question {
    Question {
        id: new_id,
        ..source.clone()
    }
}
