mod common;

use studyquiz::{AttemptStatus, Clock, QuizError, QuizSession, SubmitOutcome, TimerEvent, Trigger, Urgency};

use common::{advance, correct_option, epoch, quiz, started, wrong_option, Recorder};

#[test]
fn test_manual_submit_with_all_correct() {
    let (mut session, clock) = started(5, 30);
    for i in 1..=5 {
        session
            .select_answer(&format!("q{}", i), correct_option(i))
            .unwrap();
    }
    advance(&mut session, &clock, 12);

    let result = match session.submit().unwrap() {
        SubmitOutcome::Completed(result) => result,
        other => panic!("expected completion, got {:?}", other),
    };
    assert_eq!(result.score.correct_count, 5);
    assert_eq!(result.score.percentage, 100);
    assert_eq!(result.elapsed_seconds, 12);
    assert_eq!(result.trigger, Trigger::Manual);

    assert_eq!(session.status(), AttemptStatus::Completed);
    assert!(!session.timer_active());
    assert_eq!(
        session.listener().completed,
        vec![("quiz-1".to_string(), 5, 12)]
    );
}

#[test]
fn test_timer_expiry_submits_partial_answers() {
    let (mut session, clock) = started(5, 1);
    session.select_answer("q1", correct_option(1)).unwrap();
    session.select_answer("q2", wrong_option(2)).unwrap();

    advance(&mut session, &clock, 59);
    assert_eq!(session.status(), AttemptStatus::InProgress);
    assert_eq!(session.remaining_display(), "00:01");

    advance(&mut session, &clock, 1);
    assert_eq!(session.status(), AttemptStatus::Completed);
    assert_eq!(session.resolved_by(), Some(Trigger::Timeout));
    assert_eq!(session.remaining_seconds(), 0);
    assert_eq!(
        session.listener().completed,
        vec![("quiz-1".to_string(), 1, 60)]
    );

    // further time does nothing
    advance(&mut session, &clock, 30);
    assert_eq!(session.listener().completed.len(), 1);
}

#[test]
fn test_urgency_follows_remaining_share() {
    let (mut session, clock) = started(5, 1);
    assert_eq!(session.urgency(), Urgency::Normal);

    advance(&mut session, &clock, 44);
    assert_eq!(session.remaining_seconds(), 16);
    assert_eq!(session.urgency(), Urgency::Normal);

    advance(&mut session, &clock, 2);
    assert_eq!(session.remaining_seconds(), 14);
    assert_eq!(session.urgency(), Urgency::Warning);
}

#[test]
fn test_low_time_event_reported_once() {
    let (mut session, clock) = started(2, 1);
    let mut low = 0;
    for _ in 0..59 {
        clock.advance_secs(1);
        if let Ok(Some(TimerEvent::LowTime(_))) = session.tick() {
            low += 1;
        }
    }
    assert_eq!(low, 1);
}

#[test]
fn test_empty_quiz_is_rejected() {
    let mut session = QuizSession::with_clock(Recorder::default(), Clock::manual(epoch()));
    let err = session.start(quiz(0, 10)).unwrap_err();

    assert!(matches!(err, QuizError::InvalidQuizDefinition(_)));
    assert_eq!(session.status(), AttemptStatus::NotStarted);
    assert!(session.attempt().is_none());
    assert!(!session.timer_active());
    assert_eq!(session.tick().unwrap(), None);
}

#[test]
fn test_submit_then_expiry_in_same_tick() {
    let (mut session, clock) = started(3, 1);
    session.select_answer("q1", correct_option(1)).unwrap();
    advance(&mut session, &clock, 59);

    let first = session.submit().unwrap();
    assert!(matches!(first, SubmitOutcome::Completed(_)));

    // the tick that would have expired the quiz arrives afterwards
    clock.advance_secs(1);
    assert_eq!(session.tick().unwrap(), None);
    assert_eq!(session.on_timer_expired().unwrap(), SubmitOutcome::AlreadyResolved);

    assert_eq!(
        session.listener().completed,
        vec![("quiz-1".to_string(), 1, 59)]
    );
    assert_eq!(session.resolved_by(), Some(Trigger::Manual));
}

#[test]
fn test_expiry_then_submit_in_same_tick() {
    let (mut session, clock) = started(3, 1);
    session.select_answer("q1", correct_option(1)).unwrap();
    advance(&mut session, &clock, 60);

    assert_eq!(session.submit().unwrap(), SubmitOutcome::AlreadyResolved);
    assert_eq!(
        session.listener().completed,
        vec![("quiz-1".to_string(), 1, 60)]
    );
    assert_eq!(session.resolved_by(), Some(Trigger::Timeout));
}

#[test]
fn test_double_submit_completes_once() {
    let (mut session, _clock) = started(2, 5);
    assert!(matches!(session.submit().unwrap(), SubmitOutcome::Completed(_)));
    assert_eq!(session.submit().unwrap(), SubmitOutcome::AlreadyResolved);
    assert_eq!(session.on_timer_expired().unwrap(), SubmitOutcome::AlreadyResolved);
    assert_eq!(session.listener().completed.len(), 1);
}

#[test]
fn test_result_reflects_answers_at_resolution() {
    let (mut session, _clock) = started(2, 5);
    session.select_answer("q1", correct_option(1)).unwrap();
    session.submit().unwrap();

    let err = session.select_answer("q2", correct_option(2)).unwrap_err();
    assert!(err.is_invalid_operation());

    let result = session.result().unwrap();
    assert_eq!(result.score.correct_count, 1);
    assert_eq!(result.answers.len(), 1);
}

#[test]
fn test_navigation_preserves_answers() {
    let (mut session, _clock) = started(4, 5);
    session.select_current(2).unwrap();
    assert_eq!(session.next().unwrap(), 1);
    session.select_current(3).unwrap();
    assert_eq!(session.next().unwrap(), 2);

    assert_eq!(session.previous().unwrap(), 1);
    assert_eq!(session.previous().unwrap(), 0);
    assert_eq!(session.selected_option("q1"), Some(2));
    assert_eq!(session.selected_option("q2"), Some(3));
    assert_eq!(session.selected_option("q3"), None);
    assert_eq!(session.answered_count(), 2);
}

#[test]
fn test_navigation_is_clamped() {
    let (mut session, _clock) = started(3, 5);
    assert_eq!(session.previous().unwrap(), 0);
    assert_eq!(session.go_to(99).unwrap(), 2);
    assert_eq!(session.next().unwrap(), 2);
    assert_eq!(session.current_question().unwrap().id, "q3");
}

#[test]
fn test_last_answer_wins() {
    let (mut session, _clock) = started(1, 5);
    session.select_answer("q1", 0).unwrap();
    session.select_answer("q1", 3).unwrap();
    session.select_answer("q1", 1).unwrap();
    assert_eq!(session.selected_option("q1"), Some(1));
    assert_eq!(session.answered_count(), 1);
}

#[test]
fn test_answer_validation() {
    let (mut session, _clock) = started(2, 5);

    let err = session.select_answer("q1", 4).unwrap_err();
    assert!(matches!(err, QuizError::OptionOutOfRange { index: 4, count: 4, .. }));

    let err = session.select_answer("nope", 0).unwrap_err();
    assert!(matches!(err, QuizError::UnknownQuestion(_)));

    assert!(!session.is_answered("q1"));
}

#[test]
fn test_operations_before_start_are_rejected() {
    let mut session = QuizSession::with_clock(Recorder::default(), Clock::manual(epoch()));
    assert!(session.select_answer("q1", 0).unwrap_err().is_invalid_operation());
    assert!(session.next().unwrap_err().is_invalid_operation());
    assert!(session.submit().unwrap_err().is_invalid_operation());
    assert!(session.cancel().unwrap_err().is_invalid_operation());
}

#[test]
fn test_operations_after_completion_are_rejected() {
    let (mut session, _clock) = started(2, 5);
    session.submit().unwrap();

    assert!(session.select_answer("q1", 0).unwrap_err().is_invalid_operation());
    assert!(session.next().unwrap_err().is_invalid_operation());
    assert!(session.previous().unwrap_err().is_invalid_operation());
    assert!(session.start(quiz(2, 5)).unwrap_err().is_invalid_operation());
}

#[test]
fn test_start_twice_is_rejected() {
    let (mut session, _clock) = started(2, 5);
    let err = session.start(quiz(2, 5)).unwrap_err();
    assert!(err.is_invalid_operation());
    assert_eq!(session.status(), AttemptStatus::InProgress);
}

#[test]
fn test_cancel_discards_attempt() {
    let (mut session, clock) = started(3, 1);
    session.select_answer("q1", correct_option(1)).unwrap();

    assert!(session.cancel().unwrap());
    assert_eq!(session.status(), AttemptStatus::Cancelled);
    assert!(session.attempt().is_none());
    assert!(session.result().is_none());
    assert_eq!(session.listener().cancelled, 1);

    // the countdown is gone: no expiry, no late submission
    advance(&mut session, &clock, 120);
    assert_eq!(session.submit().unwrap(), SubmitOutcome::AlreadyResolved);
    assert!(!session.cancel().unwrap());
    assert!(session.listener().completed.is_empty());
    assert_eq!(session.listener().cancelled, 1);
}

#[test]
fn test_cancel_after_completion_is_ignored() {
    let (mut session, _clock) = started(2, 5);
    session.submit().unwrap();
    assert!(!session.cancel().unwrap());
    assert_eq!(session.status(), AttemptStatus::Completed);
    assert_eq!(session.listener().cancelled, 0);
}

#[test]
fn test_failing_listener_still_completes() {
    let (mut session, clock) = started(2, 5);
    session.listener_mut().fail = true;
    session.select_answer("q2", correct_option(2)).unwrap();

    let err = session.submit().unwrap_err();
    assert!(matches!(err, QuizError::Listener(_)));
    assert_eq!(session.status(), AttemptStatus::Completed);
    assert!(!session.timer_active());
    assert_eq!(session.result().unwrap().score.correct_count, 1);

    advance(&mut session, &clock, 400);
    assert_eq!(session.submit().unwrap(), SubmitOutcome::AlreadyResolved);
    assert_eq!(session.listener().completed.len(), 1);
}

#[test]
fn test_zero_duration_expires_on_first_tick() {
    let (mut session, _clock) = started(2, 0);
    assert_eq!(session.status(), AttemptStatus::InProgress);
    assert!(session.listener().completed.is_empty());

    assert_eq!(session.tick().unwrap(), Some(TimerEvent::Expired));
    assert_eq!(session.status(), AttemptStatus::Completed);
    assert_eq!(
        session.listener().completed,
        vec![("quiz-1".to_string(), 0, 0)]
    );
}

#[test]
fn test_more_options_than_letters_is_rejected() {
    let mut def = quiz(2, 5);
    def.questions[1].options = (0..27).map(|i| format!("option {}", i)).collect();

    let mut session = QuizSession::with_clock(Recorder::default(), Clock::manual(epoch()));
    let err = session.start(def).unwrap_err();
    assert!(matches!(err, QuizError::InvalidQuizDefinition(_)));
    assert!(err.to_string().contains("at most 26"));
    assert_eq!(session.status(), AttemptStatus::NotStarted);

    let mut def = quiz(1, 5);
    def.questions[0].options = (0..26).map(|i| format!("option {}", i)).collect();
    session.start(def).unwrap();
    session.select_answer("q1", 25).unwrap();
}
