use std::sync::Arc;

use quizbank::check::{CheckState, InlineCheck, SelectOutcome};
use quizbank::error::{AuthoringError, CheckError};
use quizbank::grading::OptionMark;
use quizbank::model::{Question, QuestionId};

fn ohm() -> Arc<Question> {
    Arc::new(Question {
        id: QuestionId::from("ohm"),
        question: "Which expression is Ohm's law?".to_string(),
        options: vec![
            "V=I×R".to_string(),
            "P=I×V".to_string(),
            "R=V+I".to_string(),
            "I=V+R".to_string(),
        ],
        correct_answer: 0,
        explanation: "Voltage equals current times resistance.".to_string(),
        section: None,
        difficulty: None,
        topic: None,
        category: None,
    })
}

#[test]
fn correct_selection_reveals_explanation() {
    let mut check = InlineCheck::new(ohm());
    assert_eq!(check.state(), &CheckState::Unanswered);
    assert!(check.feedback().is_none());

    let outcome = check.select(0).unwrap();
    assert_eq!(outcome, SelectOutcome::Revealed { is_correct: true });

    let fb = check.feedback().unwrap();
    assert!(fb.is_correct);
    assert_eq!(fb.explanation, "Voltage equals current times resistance.");
    assert_eq!(check.option_mark(0), OptionMark::Correct);
    assert_eq!(check.option_mark(1), OptionMark::Plain);
}

#[test]
fn wrong_selection_highlights_correct_option() {
    let mut check = InlineCheck::new(ohm());
    let outcome = check.select(2).unwrap();
    assert_eq!(outcome, SelectOutcome::Revealed { is_correct: false });

    let fb = check.feedback().unwrap();
    assert!(!fb.is_correct);
    assert_eq!(fb.correct, 0);
    assert!(!fb.explanation.is_empty());
    assert_eq!(check.option_mark(2), OptionMark::ChosenWrong);
    assert_eq!(check.option_mark(0), OptionMark::Correct);
}

#[test]
fn grading_matches_correct_index_for_every_option() {
    let q = ohm();
    for i in 0..q.options.len() {
        let mut check = InlineCheck::new(q.clone());
        let outcome = check.select(i).unwrap();
        assert_eq!(
            outcome,
            SelectOutcome::Revealed {
                is_correct: i == q.correct_answer
            }
        );
    }
}

#[test]
fn first_answer_locks_the_check() {
    let mut check = InlineCheck::new(ohm());
    check.select(3).unwrap();
    let again = check.select(0).unwrap();
    assert_eq!(again, SelectOutcome::Locked { selected: 3 });
    assert_eq!(check.selected(), Some(3));
    assert!(!check.feedback().unwrap().is_correct);
}

#[test]
fn out_of_range_option_is_rejected_without_revealing() {
    let mut check = InlineCheck::new(ohm());
    let err = check.select(4).unwrap_err();
    assert_eq!(err, CheckError::OptionOutOfRange { index: 4, len: 4 });
    assert!(!check.is_revealed());
}

#[test]
fn malformed_question_is_degraded() {
    let mut q = (*ohm()).clone();
    q.correct_answer = 7;
    let mut check = InlineCheck::new(Arc::new(q));
    assert!(check.is_degraded());

    let err = check.select(0).unwrap_err();
    assert!(matches!(
        err,
        CheckError::Degraded(AuthoringError::CorrectIndexOutOfRange { index: 7, len: 4, .. })
    ));
    assert_eq!(check.option_mark(0), OptionMark::Plain);
    assert!(check.feedback().is_none());
}

#[test]
fn more_options_than_letters_is_degraded() {
    let mut q = (*ohm()).clone();
    q.options = (0..27).map(|i| format!("option {}", i)).collect();
    let mut check = InlineCheck::new(Arc::new(q));
    assert!(check.is_degraded());
    assert!(matches!(
        check.select(0).unwrap_err(),
        CheckError::Degraded(AuthoringError::TooManyOptions { count: 27, .. })
    ));

    let mut q = (*ohm()).clone();
    q.options = (0..26).map(|i| format!("option {}", i)).collect();
    assert!(!InlineCheck::new(Arc::new(q)).is_degraded());
}

#[test]
fn check_never_mutates_the_question() {
    let q = ohm();
    let before = (*q).clone();
    let mut check = InlineCheck::new(q.clone());
    check.select(1).unwrap();
    check.select(0).unwrap();
    assert_eq!(*q, before);
    assert_eq!(check.question(), &before);
}
