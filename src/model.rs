use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(s)
    }
}

/// Options are picked with the letter keys `a`-`z`.
pub const MAX_OPTIONS: usize = 26;

/// A quiz as handed over by the content side. Never mutated by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub topic: String,
    pub difficulty: Difficulty,
    pub duration_minutes: u32,
    #[serde(default)]
    pub total_marks: u32,
    pub questions: Vec<Question>,
    /// Free text shown before the quiz starts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preamble: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: usize,
}

impl QuizDefinition {
    pub fn duration_seconds(&self) -> u64 {
        u64::from(self.duration_minutes) * 60
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Checks the shape a session relies on: at least one question, unique
    /// ids, and a correct option that points into each option list.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::InvalidQuizDefinition(format!(
                "quiz '{}' has no questions",
                self.id
            )));
        }

        let mut seen = HashSet::new();
        for q in &self.questions {
            if !seen.insert(q.id.as_str()) {
                return Err(QuizError::InvalidQuizDefinition(format!(
                    "duplicate question id '{}'",
                    q.id
                )));
            }
            if q.options.is_empty() {
                return Err(QuizError::InvalidQuizDefinition(format!(
                    "question '{}' has no options",
                    q.id
                )));
            }
            if q.options.len() > MAX_OPTIONS {
                return Err(QuizError::InvalidQuizDefinition(format!(
                    "question '{}' has {} options, at most {} are allowed",
                    q.id,
                    q.options.len(),
                    MAX_OPTIONS
                )));
            }
            if q.correct_option >= q.options.len() {
                return Err(QuizError::InvalidQuizDefinition(format!(
                    "question '{}' marks option {} correct but has {} options",
                    q.id,
                    q.correct_option,
                    q.options.len()
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptStatus {
    NotStarted,
    InProgress,
    Submitting,
    Completed,
    Cancelled,
}

impl AttemptStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, AttemptStatus::Completed | AttemptStatus::Cancelled)
    }
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttemptStatus::NotStarted => "not started",
            AttemptStatus::InProgress => "in progress",
            AttemptStatus::Submitting => "submitting",
            AttemptStatus::Completed => "completed",
            AttemptStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// One pass through a quiz. Owned by the session that created it.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub quiz_id: String,
    pub current_index: usize,
    /// Question id to selected option index. Absent means unanswered.
    pub answers: HashMap<String, usize>,
    pub status: AttemptStatus,
    pub started_at: DateTime<Utc>,
    pub elapsed_seconds: Option<u64>,
}

impl Attempt {
    pub fn new(quiz_id: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            quiz_id: quiz_id.to_string(),
            current_index: 0,
            answers: HashMap::new(),
            status: AttemptStatus::InProgress,
            started_at,
            elapsed_seconds: None,
        }
    }
}
