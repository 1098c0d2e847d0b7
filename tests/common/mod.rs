#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use studyquiz::error::ListenerError;
use studyquiz::{Clock, Difficulty, Question, QuizDefinition, QuizResult, QuizSession, SessionListener};

/// Listener that records every notification it receives.
#[derive(Debug, Default)]
pub struct Recorder {
    pub completed: Vec<(String, u32, u64)>,
    pub cancelled: usize,
    pub fail: bool,
}

impl SessionListener for Recorder {
    fn on_complete(&mut self, result: &QuizResult) -> Result<(), ListenerError> {
        self.completed.push((
            result.quiz_id.clone(),
            result.correct_count(),
            result.elapsed_seconds,
        ));
        if self.fail {
            return Err("results service unavailable".into());
        }
        Ok(())
    }

    fn on_cancel(&mut self) {
        self.cancelled += 1;
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
}

/// Quiz with `n` four-option questions `q1..qn`; the correct option of
/// question i is `i % 4`.
pub fn quiz(n: usize, duration_minutes: u32) -> QuizDefinition {
    let questions = (1..=n)
        .map(|i| Question {
            id: format!("q{}", i),
            prompt: format!("Question {}", i),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_option: i % 4,
        })
        .collect();
    QuizDefinition {
        id: "quiz-1".to_string(),
        title: "Sample".to_string(),
        subject: "Maths".to_string(),
        topic: "Arithmetic".to_string(),
        difficulty: Difficulty::Easy,
        duration_minutes,
        total_marks: n as u32,
        questions,
        preamble: Vec::new(),
    }
}

pub fn correct_option(question_number: usize) -> usize {
    question_number % 4
}

pub fn wrong_option(question_number: usize) -> usize {
    (question_number + 1) % 4
}

/// Starts a session on a manual clock.
pub fn started(n: usize, duration_minutes: u32) -> (QuizSession<Recorder>, Clock) {
    let clock = Clock::manual(epoch());
    let mut session = QuizSession::with_clock(Recorder::default(), clock.clone());
    session.start(quiz(n, duration_minutes)).unwrap();
    (session, clock)
}

/// Lets `secs` seconds of wall-clock time pass, one tick per second.
pub fn advance<L: SessionListener>(session: &mut QuizSession<L>, clock: &Clock, secs: u64) {
    for _ in 0..secs {
        clock.advance_secs(1);
        let _ = session.tick();
    }
}
