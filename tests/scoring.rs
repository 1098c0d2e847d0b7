mod common;

use std::collections::HashMap;

use studyquiz::{score, QuizError};

use common::{correct_option, quiz, wrong_option};

#[test]
fn test_counts_only_matching_answers() {
    let def = quiz(5, 10);
    let mut answers = HashMap::new();
    answers.insert("q1".to_string(), correct_option(1));
    answers.insert("q2".to_string(), wrong_option(2));
    answers.insert("q4".to_string(), correct_option(4));

    let s = score(&def.questions, &answers).unwrap();
    assert_eq!(s.correct_count, 2);
    assert_eq!(s.total, 5);
    assert_eq!(s.percentage, 40);
}

#[test]
fn test_unanswered_questions_are_wrong() {
    let def = quiz(3, 10);
    let s = score(&def.questions, &HashMap::new()).unwrap();
    assert_eq!(s.correct_count, 0);
    assert_eq!(s.percentage, 0);
}

#[test]
fn test_percentage_is_rounded() {
    let def = quiz(3, 10);
    let mut answers = HashMap::new();
    answers.insert("q1".to_string(), correct_option(1));
    assert_eq!(score(&def.questions, &answers).unwrap().percentage, 33);

    answers.insert("q2".to_string(), correct_option(2));
    assert_eq!(score(&def.questions, &answers).unwrap().percentage, 67);

    let def = quiz(8, 10);
    let mut answers = HashMap::new();
    answers.insert("q1".to_string(), correct_option(1));
    // 12.5 rounds up
    assert_eq!(score(&def.questions, &answers).unwrap().percentage, 13);
}

#[test]
fn test_answers_for_unknown_questions_are_ignored() {
    let def = quiz(2, 10);
    let mut answers = HashMap::new();
    answers.insert("q99".to_string(), 0);
    answers.insert("q2".to_string(), correct_option(2));
    assert_eq!(score(&def.questions, &answers).unwrap().correct_count, 1);
}

#[test]
fn test_empty_question_set_is_rejected() {
    let err = score(&[], &HashMap::new()).unwrap_err();
    assert!(matches!(err, QuizError::EmptyQuestionSet));
}

#[test]
fn test_score_is_pure_and_order_independent() {
    let def = quiz(6, 10);
    let pairs: Vec<(String, usize)> = (1..=6)
        .map(|i| {
            let option = if i % 2 == 0 { correct_option(i) } else { wrong_option(i) };
            (format!("q{}", i), option)
        })
        .collect();

    let forward: HashMap<String, usize> = pairs.iter().cloned().collect();
    let backward: HashMap<String, usize> = pairs.iter().rev().cloned().collect();

    let a = score(&def.questions, &forward).unwrap();
    let b = score(&def.questions, &forward).unwrap();
    let c = score(&def.questions, &backward).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_eq!(a.correct_count, 3);
}
