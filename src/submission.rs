//! Single-winner resolution of an attempt.
//!
//! A manual submit, a timer expiry and a cancel can all try to close the
//! same attempt, in any order. The first trigger that finds the attempt in
//! progress claims it; every later trigger is absorbed without side effects.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::clock::elapsed_secs;
use crate::error::{ListenerError, QuizError};
use crate::model::{Attempt, AttemptStatus, Question};
use crate::score::{score, Score};
use crate::timer::CountdownTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Manual,
    Timeout,
    Cancel,
}

/// Final outcome handed to the listener once per attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub quiz_id: String,
    pub score: Score,
    pub elapsed_seconds: u64,
    pub trigger: Trigger,
    pub submitted_at: DateTime<Utc>,
    /// Answers as they stood when the attempt was claimed.
    pub answers: HashMap<String, usize>,
}

impl QuizResult {
    pub fn correct_count(&self) -> u32 {
        self.score.correct_count
    }
}

/// Receives the end of a session.
pub trait SessionListener {
    fn on_complete(&mut self, result: &QuizResult) -> Result<(), ListenerError>;

    fn on_cancel(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Completed(QuizResult),
    /// Another trigger got there first. Nothing changed.
    AlreadyResolved,
}

#[derive(Debug, Default)]
pub struct SubmissionCoordinator {
    resolved_by: Option<Trigger>,
    delivered: Option<QuizResult>,
}

impl SubmissionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true for the first trigger only.
    pub fn claim(&mut self, trigger: Trigger) -> bool {
        if self.resolved_by.is_some() {
            return false;
        }
        self.resolved_by = Some(trigger);
        true
    }

    pub fn resolved_by(&self) -> Option<Trigger> {
        self.resolved_by
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_by.is_some()
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.delivered.as_ref()
    }

    /// Scores and completes the attempt if `trigger` wins the race.
    ///
    /// The attempt is left `Completed` with the timer stopped even when the
    /// listener fails; the listener error is returned afterwards.
    pub fn complete<L: SessionListener>(
        &mut self,
        trigger: Trigger,
        attempt: &mut Attempt,
        timer: &mut CountdownTimer,
        questions: &[Question],
        now: DateTime<Utc>,
        listener: &mut L,
    ) -> Result<SubmitOutcome, QuizError> {
        if attempt.status != AttemptStatus::InProgress || self.is_resolved() {
            debug!(?trigger, status = %attempt.status, "attempt already resolved, trigger ignored");
            return Ok(SubmitOutcome::AlreadyResolved);
        }

        let score = score(questions, &attempt.answers)?;

        self.claim(trigger);
        attempt.status = AttemptStatus::Submitting;
        timer.stop();

        let elapsed = elapsed_secs(attempt.started_at, now);
        attempt.elapsed_seconds = Some(elapsed);
        attempt.status = AttemptStatus::Completed;

        let result = QuizResult {
            quiz_id: attempt.quiz_id.clone(),
            score,
            elapsed_seconds: elapsed,
            trigger,
            submitted_at: now,
            answers: attempt.answers.clone(),
        };
        self.delivered = Some(result.clone());

        info!(
            quiz_id = %result.quiz_id,
            ?trigger,
            correct = score.correct_count,
            total = score.total,
            elapsed_seconds = elapsed,
            "attempt completed"
        );

        if let Err(e) = listener.on_complete(&result) {
            warn!(quiz_id = %result.quiz_id, error = %e, "result listener failed");
            return Err(QuizError::Listener(e));
        }

        Ok(SubmitOutcome::Completed(result))
    }

    /// Cancels the attempt if nothing has resolved it yet. Returns whether
    /// this call did the cancelling.
    pub fn cancel<L: SessionListener>(
        &mut self,
        attempt: &mut Attempt,
        timer: &mut CountdownTimer,
        listener: &mut L,
    ) -> bool {
        let open = matches!(
            attempt.status,
            AttemptStatus::InProgress | AttemptStatus::Submitting
        );
        if !open || !self.claim(Trigger::Cancel) {
            debug!(status = %attempt.status, "cancel ignored, attempt already resolved");
            return false;
        }

        timer.stop();
        attempt.status = AttemptStatus::Cancelled;
        info!(quiz_id = %attempt.quiz_id, "attempt cancelled");
        listener.on_cancel();
        true
    }
}
