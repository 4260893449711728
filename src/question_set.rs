//! Pure transformations over an ordered set of questions.
//!
//! Every function borrows its input and hands back a freshly owned value, so
//! callers keep their own sequence untouched.

use log::warn;

use crate::question::{duplicate_question, make_blank_question, Answer, Question, QuestionType};

pub const CSV_HEADER: &str = "id,name,options,points,published";

/// Where `edit_option` writes the new option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSlot {
    Append,
    At(usize),
}

impl OptionSlot {
    /// `-1` appends, any other non-negative index replaces in place.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            -1 => Some(OptionSlot::Append),
            i if i >= 0 => usize::try_from(i).ok().map(OptionSlot::At),
            _ => None,
        }
    }
}

pub fn get_published_questions(questions: &[Question]) -> Vec<Question> {
    questions.iter().filter(|q| q.published).cloned().collect()
}

pub fn get_non_empty_questions(questions: &[Question]) -> Vec<Question> {
    questions.iter().filter(|q| !q.is_empty()).cloned().collect()
}

pub fn find_question(questions: &[Question], id: i64) -> Option<Question> {
    questions.iter().find(|q| q.id == id).cloned()
}

/// Drops every question carrying `id`, not only the first.
pub fn remove_question(questions: &[Question], id: i64) -> Vec<Question> {
    questions.iter().filter(|q| q.id != id).cloned().collect()
}

pub fn get_names(questions: &[Question]) -> Vec<String> {
    questions.iter().map(|q| q.name.clone()).collect()
}

/// Totals are widened to `u64` so summing `u32` points cannot overflow.
pub fn sum_points(questions: &[Question]) -> u64 {
    questions.iter().map(|q| u64::from(q.points)).sum()
}

pub fn sum_published_points(questions: &[Question]) -> u64 {
    questions
        .iter()
        .filter(|q| q.published)
        .map(|q| u64::from(q.points))
        .sum()
}

/// Renders `id,name,options,points,published` rows, `options` as a count.
/// Fields are not quoted.
pub fn to_csv(questions: &[Question]) -> String {
    std::iter::once(CSV_HEADER.to_string())
        .chain(questions.iter().map(|q| {
            format!(
                "{},{},{},{},{}",
                q.id,
                q.name,
                q.options.len(),
                q.points,
                q.published
            )
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn make_answers(questions: &[Question]) -> Vec<Answer> {
    questions.iter().map(|q| Answer::blank(q.id)).collect()
}

pub fn publish_all(questions: &[Question]) -> Vec<Question> {
    questions
        .iter()
        .map(|q| Question {
            published: true,
            ..q.clone()
        })
        .collect()
}

/// True when every question shares the first one's type. An empty set is
/// trivially uniform.
pub fn same_type(questions: &[Question]) -> bool {
    match questions.first() {
        Some(first) => questions
            .iter()
            .all(|q| q.question_type == first.question_type),
        None => true,
    }
}

pub fn add_new_question(
    questions: &[Question],
    id: i64,
    name: &str,
    question_type: QuestionType,
) -> Vec<Question> {
    let mut result = Vec::with_capacity(questions.len() + 1);
    result.extend_from_slice(questions);
    result.push(make_blank_question(id, name, question_type));
    result
}

fn update_matching<F>(questions: &[Question], target_id: i64, update: F) -> Vec<Question>
where
    F: Fn(&Question) -> Question,
{
    questions
        .iter()
        .map(|q| {
            if q.id == target_id {
                update(q)
            } else {
                q.clone()
            }
        })
        .collect()
}

pub fn rename_question_by_id(
    questions: &[Question],
    target_id: i64,
    new_name: &str,
) -> Vec<Question> {
    update_matching(questions, target_id, |q| Question {
        name: new_name.to_string(),
        ..q.clone()
    })
}

/// Switching away from multiple choice clears the options.
pub fn change_question_type_by_id(
    questions: &[Question],
    target_id: i64,
    new_type: QuestionType,
) -> Vec<Question> {
    update_matching(questions, target_id, |q| {
        let options = if new_type == QuestionType::MultipleChoiceQuestion {
            q.options.clone()
        } else {
            Vec::new()
        };
        Question {
            question_type: new_type,
            options,
            ..q.clone()
        }
    })
}

/// Appends or replaces one option on the matching question. An index past
/// the end leaves that question as it was.
pub fn edit_option(
    questions: &[Question],
    target_id: i64,
    slot: OptionSlot,
    new_option: &str,
) -> Vec<Question> {
    update_matching(questions, target_id, |q| {
        let mut options = q.options.clone();
        let count = options.len();
        match slot {
            OptionSlot::Append => options.push(new_option.to_string()),
            OptionSlot::At(index) => match options.get_mut(index) {
                Some(option) => *option = new_option.to_string(),
                None => {
                    warn!(
                        "Option index {} out of range for question {} ({} options)",
                        index, q.id, count
                    );
                }
            },
        }
        Question {
            options,
            ..q.clone()
        }
    })
}

/// Inserts a copy of the last question with `target_id` right after it,
/// under `new_id`. Returns the input unchanged when `target_id` is absent.
pub fn duplicate_question_in_array(
    questions: &[Question],
    target_id: i64,
    new_id: i64,
) -> Vec<Question> {
    let mut result = questions.to_vec();
    if let Some(position) = questions.iter().rposition(|q| q.id == target_id) {
        let copy = duplicate_question(new_id, &questions[position]);
        result.insert(position + 1, copy);
    }
    result
}
