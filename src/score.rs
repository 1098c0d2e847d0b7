use std::collections::HashMap;

use serde::Serialize;

use crate::error::QuizError;
use crate::model::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub correct_count: u32,
    pub total: u32,
    pub percentage: u32,
}

/// Counts questions whose recorded answer equals the correct option.
/// Unanswered questions count as wrong.
pub fn score(questions: &[Question], answers: &HashMap<String, usize>) -> Result<Score, QuizError> {
    if questions.is_empty() {
        return Err(QuizError::EmptyQuestionSet);
    }

    let correct_count = questions
        .iter()
        .filter(|q| is_correct(q, answers))
        .count() as u32;
    let total = questions.len() as u32;
    let percentage = (100.0 * f64::from(correct_count) / f64::from(total)).round() as u32;

    Ok(Score {
        correct_count,
        total,
        percentage,
    })
}

pub fn is_correct(question: &Question, answers: &HashMap<String, usize>) -> bool {
    answers.get(&question.id) == Some(&question.correct_option)
}
