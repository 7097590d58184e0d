use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use quizbank::error::{AuthoringError, QuizError};
use quizbank::grading::{OptionMark, Score};
use quizbank::model::{Question, QuestionId};
use quizbank::quiz::{Phase, Quiz, QuizConfig};

fn question(id: u64, options: &[&str], correct: usize) -> Question {
    Question {
        id: QuestionId::from(id),
        question: format!("Question {}", id),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct_answer: correct,
        explanation: format!("Explanation {}", id),
        section: None,
        difficulty: None,
        topic: None,
        category: None,
    }
}

fn three() -> Arc<[Question]> {
    vec![
        question(1, &["a", "b", "c"], 0),
        question(2, &["a", "b", "c"], 1),
        question(3, &["a", "b", "c"], 2),
    ]
    .into()
}

#[test]
fn submit_with_unanswered_question_stays_in_progress() {
    let mut quiz = Quiz::new(QuizConfig::new(three()).title("Review"));
    assert_eq!(quiz.phase(), Phase::NotStarted);

    quiz.answer(0, 0).unwrap();
    quiz.answer(1, 0).unwrap();
    assert_eq!(quiz.phase(), Phase::InProgress);

    let err = quiz.submit().unwrap_err();
    assert_eq!(err, QuizError::Incomplete { unanswered: vec![2] });
    assert_eq!(quiz.phase(), Phase::InProgress);
    assert_eq!(quiz.missing(), &[2]);
    assert!(quiz.score().is_none());
    assert!(quiz.feedback(0).is_none());
}

#[test]
fn complete_submit_scores_two_of_three() {
    let mut quiz = Quiz::new(QuizConfig::new(three()));
    quiz.answer(0, 0).unwrap();
    quiz.answer(1, 0).unwrap();
    assert!(quiz.submit().is_err());

    quiz.answer(2, 2).unwrap();
    assert!(quiz.missing().is_empty());

    let score = quiz.submit().unwrap();
    assert_eq!(score, Score { correct: 2, total: 3 });
    assert_eq!(quiz.phase(), Phase::Completed(score));
    assert!((score.percentage() - 0.667).abs() < 0.001);
    assert_eq!(score.percent(), 67);

    assert!(quiz.feedback(0).unwrap().is_correct);
    assert!(!quiz.feedback(1).unwrap().is_correct);
    assert_eq!(quiz.option_mark(1, 0), OptionMark::ChosenWrong);
    assert_eq!(quiz.option_mark(1, 1), OptionMark::Correct);
}

#[test]
fn reset_clears_answers_and_allows_independent_retake() {
    let mut quiz = Quiz::new(QuizConfig::new(three()));
    for (q, a) in [(0, 0), (1, 0), (2, 2)] {
        quiz.answer(q, a).unwrap();
    }
    quiz.submit().unwrap();

    quiz.reset();
    assert_eq!(quiz.phase(), Phase::NotStarted);
    assert!((0..quiz.len()).all(|i| quiz.answer_of(i).is_none()));
    assert!(quiz.score().is_none());

    for (q, a) in [(0, 0), (1, 1), (2, 2)] {
        quiz.answer(q, a).unwrap();
    }
    let score = quiz.submit().unwrap();
    assert_eq!(score, Score { correct: 3, total: 3 });
}

#[test]
fn score_stays_within_bounds_and_is_idempotent() {
    let mut quiz = Quiz::new(QuizConfig::new(three()));
    for choice in 0..3 {
        quiz.reset();
        for q in 0..3 {
            quiz.answer(q, choice).unwrap();
        }
        let first = quiz.compute_score();
        let second = quiz.compute_score();
        assert_eq!(first, second);
        assert!(first.correct <= first.total);
        assert_eq!(first.total, 3);
        assert!((first.percentage() - first.correct as f64 / 3.0).abs() < f64::EPSILON);
    }
}

#[test]
fn answering_can_change_until_submitted() {
    let mut quiz = Quiz::new(QuizConfig::new(three()));
    quiz.answer(0, 2).unwrap();
    quiz.answer(0, 0).unwrap();
    assert_eq!(quiz.answer_of(0), Some(0));
    assert_eq!(quiz.option_mark(0, 0), OptionMark::Selected);
}

#[test]
fn answering_after_completion_is_refused() {
    let mut quiz = Quiz::new(QuizConfig::new(three()));
    for q in 0..3 {
        quiz.answer(q, 0).unwrap();
    }
    quiz.submit().unwrap();
    assert_eq!(quiz.answer(0, 1), Err(QuizError::Finished));
    assert_eq!(quiz.answer_of(0), Some(0));
}

#[test]
fn out_of_range_answers_are_rejected() {
    let mut quiz = Quiz::new(QuizConfig::new(three()));
    assert_eq!(
        quiz.answer(5, 0),
        Err(QuizError::QuestionOutOfRange { index: 5, len: 3 })
    );
    assert_eq!(
        quiz.answer(0, 3),
        Err(QuizError::OptionOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(quiz.phase(), Phase::NotStarted);
}

#[test]
fn observer_fires_once_per_completion() {
    let seen: Rc<RefCell<Vec<Score>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let mut quiz = Quiz::new(
        QuizConfig::new(three()).on_complete(move |s: &Score| sink.borrow_mut().push(*s)),
    );

    for q in 0..3 {
        quiz.answer(q, 0).unwrap();
    }
    quiz.submit().unwrap();
    quiz.submit().unwrap();
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0], Score { correct: 1, total: 3 });

    quiz.reset();
    for q in 0..3 {
        quiz.answer(q, q).unwrap();
    }
    quiz.submit().unwrap();
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(seen.borrow()[1], Score { correct: 3, total: 3 });
}

#[test]
fn expiry_scores_unanswered_as_incorrect() {
    let mut quiz = Quiz::new(QuizConfig::new(three()));
    quiz.answer(0, 0).unwrap();
    let score = quiz.expire();
    assert_eq!(score, Score { correct: 1, total: 3 });
    assert_eq!(quiz.phase(), Phase::Expired(score));

    let fb = quiz.feedback(2).unwrap();
    assert_eq!(fb.selected, None);
    assert!(!fb.is_correct);

    // A later submit reports the same result.
    assert_eq!(quiz.submit(), Ok(score));
}

#[test]
fn degraded_questions_are_excluded_from_the_total() {
    let questions: Arc<[Question]> = vec![
        question(1, &["a", "b"], 0),
        question(2, &["only"], 0),
        question(3, &["a", "b"], 9),
        question(1, &["a", "b"], 1),
        question(4, &["a", "b"], 1),
    ]
    .into();
    let mut quiz = Quiz::new(QuizConfig::new(questions));

    assert_eq!(quiz.gradable_count(), 2);
    assert!(matches!(
        quiz.degraded_reason(1),
        Some(AuthoringError::TooFewOptions { count: 1, .. })
    ));
    assert!(matches!(
        quiz.degraded_reason(2),
        Some(AuthoringError::CorrectIndexOutOfRange { .. })
    ));
    assert!(matches!(
        quiz.degraded_reason(3),
        Some(AuthoringError::DuplicateId { .. })
    ));
    assert!(matches!(
        quiz.answer(1, 0),
        Err(QuizError::Degraded { index: 1, .. })
    ));

    quiz.answer(0, 0).unwrap();
    quiz.answer(4, 0).unwrap();
    let score = quiz.submit().unwrap();
    assert_eq!(score, Score { correct: 1, total: 2 });
    assert!(quiz.feedback(1).is_none());
    assert_eq!(quiz.option_mark(2, 0), OptionMark::Plain);
}

#[test]
fn quiz_without_gradable_questions_cannot_be_submitted() {
    let mut empty = Quiz::new(QuizConfig::new(Vec::<Question>::new()));
    assert_eq!(empty.submit(), Err(QuizError::NothingToGrade));
    assert_eq!(empty.phase(), Phase::NotStarted);

    let broken: Arc<[Question]> = vec![question(1, &[], 0)].into();
    let mut quiz = Quiz::new(QuizConfig::new(broken));
    assert_eq!(quiz.submit(), Err(QuizError::NothingToGrade));
}

#[test]
fn full_interaction_leaves_question_data_untouched() {
    let questions = three();
    let before: Vec<Question> = questions.to_vec();

    let mut quiz = Quiz::new(QuizConfig::new(questions.clone()));
    quiz.answer(0, 1).unwrap();
    let _ = quiz.submit();
    quiz.answer(1, 1).unwrap();
    quiz.answer(2, 0).unwrap();
    quiz.submit().unwrap();
    quiz.reset();
    quiz.answer(0, 0).unwrap();
    quiz.expire();

    assert_eq!(&*questions, before.as_slice());
    assert_eq!(quiz.questions(), before.as_slice());
}
