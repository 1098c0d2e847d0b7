//! Timed quiz session state machine.
//!
//! `NotStarted -> InProgress -> Submitting -> Completed`, or `Cancelled`
//! from `InProgress`/`Submitting`. Every mutation goes through one method
//! here; the attempt and the countdown are private to the session.

use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::QuizError;
use crate::model::{Attempt, AttemptStatus, Question, QuizDefinition};
use crate::submission::{QuizResult, SessionListener, SubmissionCoordinator, SubmitOutcome, Trigger};
use crate::timer::{CountdownTimer, TimerEvent, Urgency};

pub struct QuizSession<L: SessionListener> {
    clock: Clock,
    listener: L,
    quiz: Option<QuizDefinition>,
    attempt: Option<Attempt>,
    /// Status once the attempt has been released.
    closed_status: AttemptStatus,
    timer: CountdownTimer,
    coordinator: SubmissionCoordinator,
}

impl<L: SessionListener> QuizSession<L> {
    pub fn new(listener: L) -> Self {
        Self::with_clock(listener, Clock::System)
    }

    pub fn with_clock(listener: L, clock: Clock) -> Self {
        Self {
            clock,
            listener,
            quiz: None,
            attempt: None,
            closed_status: AttemptStatus::NotStarted,
            timer: CountdownTimer::new(),
            coordinator: SubmissionCoordinator::new(),
        }
    }

    /// Begins an attempt and arms the countdown. A rejected definition leaves
    /// the session untouched.
    pub fn start(&mut self, definition: QuizDefinition) -> Result<(), QuizError> {
        self.require(AttemptStatus::NotStarted, "start")?;
        definition.validate()?;

        let attempt = Attempt::new(&definition.id, self.clock.now());
        self.timer.start(definition.duration_seconds());

        info!(
            quiz_id = %definition.id,
            questions = definition.questions.len(),
            duration_minutes = definition.duration_minutes,
            "session started"
        );

        self.attempt = Some(attempt);
        self.quiz = Some(definition);
        Ok(())
    }

    /// Records `option` for `question_id`, replacing any earlier choice.
    pub fn select_answer(&mut self, question_id: &str, option: usize) -> Result<(), QuizError> {
        self.require(AttemptStatus::InProgress, "select an answer")?;

        let question = self
            .quiz
            .as_ref()
            .and_then(|q| q.question(question_id))
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_string()))?;
        if option >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                question_id: question_id.to_string(),
                index: option,
                count: question.options.len(),
            });
        }

        if let Some(attempt) = self.attempt.as_mut() {
            attempt.answers.insert(question_id.to_string(), option);
        }
        debug!(question_id, option, "answer selected");
        Ok(())
    }

    /// Selects `option` on the question currently shown.
    pub fn select_current(&mut self, option: usize) -> Result<(), QuizError> {
        self.require(AttemptStatus::InProgress, "select an answer")?;
        let id = match self.current_question() {
            Some(q) => q.id.clone(),
            None => return Err(QuizError::EmptyQuestionSet),
        };
        self.select_answer(&id, option)
    }

    pub fn next(&mut self) -> Result<usize, QuizError> {
        let index = self.current_index().saturating_add(1);
        self.go_to(index)
    }

    pub fn previous(&mut self) -> Result<usize, QuizError> {
        let index = self.current_index().saturating_sub(1);
        self.go_to(index)
    }

    /// Moves to `index`, clamped to the question range. Answers are untouched.
    pub fn go_to(&mut self, index: usize) -> Result<usize, QuizError> {
        self.require(AttemptStatus::InProgress, "navigate")?;
        let last = self.question_count().saturating_sub(1);
        let clamped = index.min(last);
        if let Some(attempt) = self.attempt.as_mut() {
            attempt.current_index = clamped;
        }
        debug!(index = clamped, "navigated");
        Ok(clamped)
    }

    pub fn submit(&mut self) -> Result<SubmitOutcome, QuizError> {
        self.resolve(Trigger::Manual)
    }

    /// Expiry takes exactly the same path as a manual submit.
    pub fn on_timer_expired(&mut self) -> Result<SubmitOutcome, QuizError> {
        self.resolve(Trigger::Timeout)
    }

    /// Advances the countdown by one second. An expiry is routed into the
    /// submission path before the event is returned.
    pub fn tick(&mut self) -> Result<Option<TimerEvent>, QuizError> {
        let event = self.timer.tick();
        match event {
            Some(TimerEvent::Expired) => {
                info!("time expired");
                self.on_timer_expired()?;
            }
            Some(TimerEvent::LowTime(remaining)) => {
                info!(remaining, "low time");
            }
            _ => {}
        }
        Ok(event)
    }

    /// Abandons the attempt without scoring it. Returns false when the
    /// attempt had already been resolved.
    pub fn cancel(&mut self) -> Result<bool, QuizError> {
        let Some(attempt) = self.attempt.as_mut() else {
            if self.closed_status == AttemptStatus::NotStarted {
                return Err(QuizError::InvalidOperation {
                    operation: "cancel",
                    status: AttemptStatus::NotStarted,
                });
            }
            return Ok(false);
        };

        let cancelled = self
            .coordinator
            .cancel(attempt, &mut self.timer, &mut self.listener);
        if cancelled {
            self.release_attempt();
        }
        Ok(cancelled)
    }

    pub fn status(&self) -> AttemptStatus {
        self.attempt
            .as_ref()
            .map_or(self.closed_status, |a| a.status)
    }

    pub fn quiz(&self) -> Option<&QuizDefinition> {
        self.quiz.as_ref()
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        self.attempt.as_ref()
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.coordinator.result()
    }

    pub fn resolved_by(&self) -> Option<Trigger> {
        self.coordinator.resolved_by()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn question_count(&self) -> usize {
        self.quiz.as_ref().map_or(0, |q| q.questions.len())
    }

    pub fn current_index(&self) -> usize {
        self.attempt.as_ref().map_or(0, |a| a.current_index)
    }

    pub fn current_question(&self) -> Option<&Question> {
        let quiz = self.quiz.as_ref()?;
        quiz.questions.get(self.current_index())
    }

    pub fn selected_option(&self, question_id: &str) -> Option<usize> {
        self.attempt
            .as_ref()
            .and_then(|a| a.answers.get(question_id).copied())
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.selected_option(question_id).is_some()
    }

    pub fn answered_count(&self) -> usize {
        self.attempt.as_ref().map_or(0, |a| a.answers.len())
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.timer.remaining_seconds()
    }

    pub fn total_seconds(&self) -> u64 {
        self.timer.total_seconds()
    }

    pub fn urgency(&self) -> Urgency {
        self.timer.urgency()
    }

    pub fn remaining_display(&self) -> String {
        self.timer.display()
    }

    pub fn timer_active(&self) -> bool {
        self.timer.is_active()
    }

    fn resolve(&mut self, trigger: Trigger) -> Result<SubmitOutcome, QuizError> {
        let (Some(attempt), Some(quiz)) = (self.attempt.as_mut(), self.quiz.as_ref()) else {
            if self.closed_status == AttemptStatus::NotStarted {
                return Err(QuizError::InvalidOperation {
                    operation: "submit",
                    status: AttemptStatus::NotStarted,
                });
            }
            debug!(?trigger, status = %self.closed_status, "attempt already closed, trigger ignored");
            return Ok(SubmitOutcome::AlreadyResolved);
        };

        let now = self.clock.now();
        let outcome = self.coordinator.complete(
            trigger,
            attempt,
            &mut self.timer,
            &quiz.questions,
            now,
            &mut self.listener,
        );

        if self.status() == AttemptStatus::Completed {
            self.release_attempt();
        }
        outcome
    }

    fn release_attempt(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            self.closed_status = attempt.status;
        }
    }

    fn require(&self, expected: AttemptStatus, operation: &'static str) -> Result<(), QuizError> {
        let status = self.status();
        if status == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidOperation { operation, status })
        }
    }
}

impl<L: SessionListener> Drop for QuizSession<L> {
    fn drop(&mut self) {
        if self.timer.is_active() {
            debug!(status = %self.status(), "session dropped with countdown running");
        }
        self.timer.stop();
    }
}
