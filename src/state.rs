use tracing::{debug, warn};

use crate::error::QuizError;
use crate::model::{AttemptStatus, Question, QuizDefinition};
use crate::report::ReportWriter;
use crate::session::QuizSession;
use crate::submission::SubmitOutcome;
use crate::timer::TimerEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Preamble,
    Working,
    Result,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ConfirmSubmit,
    ConfirmCancel,
    LowTime,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuestionStatus {
    Unanswered,
    Answered,
}

#[derive(Debug, Default)]
pub struct StatusCounts {
    pub answered: usize,
    pub unanswered: usize,
}

pub struct AppState {
    pub screen: Screen,
    pub quiz: QuizDefinition,
    pub session: QuizSession<ReportWriter>,
    pub dialog_stack: Vec<Dialog>,
    pub choice_cursor: usize,
    pub sidebar_scroll: usize,
    pub should_quit: bool,
    /// Low-time warning that arrived while another dialog was open.
    pub low_time_pending: bool,
    /// Set when the result listener failed after the quiz was scored.
    pub report_error: Option<String>,
}

impl AppState {
    pub fn new(quiz: QuizDefinition, session: QuizSession<ReportWriter>) -> Self {
        Self {
            screen: Screen::Preamble,
            quiz,
            session,
            dialog_stack: Vec::new(),
            choice_cursor: 0,
            sidebar_scroll: 0,
            should_quit: false,
            low_time_pending: false,
            report_error: None,
        }
    }

    /// Leaves the preamble and starts the countdown.
    pub fn begin(&mut self) -> Result<(), String> {
        self.session
            .start(self.quiz.clone())
            .map_err(|e| e.to_string())?;
        self.screen = Screen::Working;
        self.sync_cursor();
        Ok(())
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current_index())
    }

    pub fn question_status(&self, question_id: &str) -> QuestionStatus {
        if self.session.is_answered(question_id) {
            QuestionStatus::Answered
        } else {
            QuestionStatus::Unanswered
        }
    }

    pub fn status_counts(&self) -> StatusCounts {
        let answered = self.session.answered_count();
        StatusCounts {
            answered,
            unanswered: self.quiz.questions.len().saturating_sub(answered),
        }
    }

    pub fn select_choice(&mut self, idx: usize) {
        let outcome = self.session.select_current(idx);
        if absorb(outcome, "select").is_some() {
            self.choice_cursor = idx;
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.current_question().map_or(0, |q| q.options.len());
        if count == 0 {
            return;
        }
        let next = self.choice_cursor as isize + delta;
        self.choice_cursor = next.clamp(0, count as isize - 1) as usize;
    }

    pub fn navigate_next(&mut self) {
        absorb(self.session.next(), "next");
        self.sync_cursor();
    }

    pub fn navigate_prev(&mut self) {
        absorb(self.session.previous(), "previous");
        self.sync_cursor();
    }

    pub fn navigate_to(&mut self, idx: usize) {
        absorb(self.session.go_to(idx), "go to");
        self.sync_cursor();
    }

    /// Puts the option cursor on the stored answer of the current question.
    fn sync_cursor(&mut self) {
        self.choice_cursor = self
            .current_question()
            .and_then(|q| self.session.selected_option(&q.id))
            .unwrap_or(0);
    }

    pub fn submit(&mut self) {
        let outcome = self.session.submit();
        self.settle(outcome);
    }

    /// Feeds one timer beat into the session.
    pub fn on_beat(&mut self) {
        match self.session.tick() {
            Ok(Some(TimerEvent::LowTime(_))) => {
                if self.has_dialog() {
                    self.low_time_pending = true;
                } else if self.screen == Screen::Working {
                    self.push_dialog(Dialog::LowTime);
                }
            }
            Ok(Some(TimerEvent::Expired)) => self.show_result_if_completed(),
            Ok(_) => {}
            Err(e) => self.settle(Err(e)),
        }
    }

    pub fn cancel(&mut self) {
        if absorb(self.session.cancel(), "cancel") == Some(true) {
            self.dialog_stack.clear();
            self.screen = Screen::Cancelled;
        }
    }

    fn settle(&mut self, outcome: Result<SubmitOutcome, QuizError>) {
        match outcome {
            Ok(_) => {}
            Err(QuizError::Listener(e)) => {
                self.report_error = Some(e.to_string());
            }
            Err(e) => {
                warn!(error = %e, "submission failed");
                return;
            }
        }
        self.show_result_if_completed();
    }

    /// Moves to the result screen once the session has completed, whichever
    /// trigger completed it.
    fn show_result_if_completed(&mut self) {
        if self.session.status() == AttemptStatus::Completed {
            self.dialog_stack.clear();
            self.low_time_pending = false;
            self.screen = Screen::Result;
        }
    }

    /// First row of the question list to show in a sidebar `visible` rows
    /// tall, keeping the current question in view.
    pub fn sidebar_offset(&self, visible: usize) -> usize {
        let current = self.current_index();
        if visible == 0 {
            current
        } else if current >= self.sidebar_scroll + visible {
            current + 1 - visible
        } else if current < self.sidebar_scroll {
            current
        } else {
            self.sidebar_scroll
        }
    }

    pub fn follow_sidebar(&mut self, visible: usize) {
        self.sidebar_scroll = self.sidebar_offset(visible);
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    /// Closes the top dialog. A low-time warning held back by it is shown
    /// once the stack is empty.
    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        let popped = self.dialog_stack.pop();
        if self.dialog_stack.is_empty() && self.low_time_pending && self.screen == Screen::Working {
            self.low_time_pending = false;
            self.dialog_stack.push(Dialog::LowTime);
        }
        popped
    }
}

/// Operations refused by the session state are expected races with the
/// timer; log them and carry on.
fn absorb<T>(outcome: Result<T, QuizError>, operation: &str) -> Option<T> {
    match outcome {
        Ok(v) => Some(v),
        Err(e) if e.is_invalid_operation() => {
            debug!(operation, error = %e, "operation ignored");
            None
        }
        Err(e) => {
            warn!(operation, error = %e, "operation failed");
            None
        }
    }
}
