use std::fs;
use std::sync::Arc;

use chrono::{TimeZone, Utc};

use quizbank::error::ReportError;
use quizbank::model::Question;
use quizbank::parser::parse_lesson;
use quizbank::quiz::{Quiz, QuizConfig};
use quizbank::report::{build_report, write_report, SessionInfo};

fn lesson_quiz() -> Quiz {
    let content = fs::read_to_string("fixtures/sample_lesson.md").expect("Cannot read fixture");
    let lesson = parse_lesson(&content).unwrap();
    let questions: Arc<[Question]> = lesson.quiz.into();
    Quiz::new(QuizConfig::new(questions).title("Ohm's Law review"))
}

fn session() -> SessionInfo {
    SessionInfo {
        source: "fixtures/sample_lesson.md".to_string(),
        fingerprint: Some("sha256:abc123".to_string()),
        pass_threshold: Some(75),
        started_at: Utc.with_ymd_and_hms(2025, 1, 2, 10, 1, 23).unwrap(),
        finished_at: Utc.with_ymd_and_hms(2025, 1, 2, 10, 13, 45).unwrap(),
    }
}

#[test]
fn test_write_completed_report() {
    let mut quiz = lesson_quiz();
    quiz.answer(0, 2).unwrap();
    quiz.answer(1, 0).unwrap();
    quiz.answer(2, 0).unwrap();
    quiz.submit().unwrap();

    let report = build_report(&quiz, &session()).unwrap();
    assert_eq!(report.result.outcome, "completed");
    assert_eq!(report.result.correct, 2);
    assert_eq!(report.result.total, 3);
    assert_eq!(report.result.percent, 67);
    assert_eq!(report.result.passed, Some(false));
    assert_eq!(report.quiz.duration, "00:12:22");

    let tmp_dir = std::env::temp_dir().join("quizbank_test_report");
    let _ = fs::remove_dir_all(&tmp_dir);
    let path = tmp_dir.join("nested/result.yaml");
    write_report(&report, &path).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());

    let yaml = fs::read_to_string(&path).unwrap();
    assert!(yaml.contains("quiz:"));
    assert!(yaml.contains("Law review"));
    assert!(yaml.contains("sha256:abc123"));
    assert!(yaml.contains("2025-01-02T10:01:23+00:00"));
    assert!(yaml.contains("outcome: completed"));
    assert!(yaml.contains("pass_threshold: 75"));
    assert!(yaml.contains("id: q1"));
    assert!(yaml.contains("is_correct: false"));
    assert!(!yaml.contains("degraded:"));

    let _ = fs::remove_dir_all(&tmp_dir);
}

#[test]
fn test_expired_report_marks_unanswered() {
    let mut quiz = lesson_quiz();
    quiz.answer(0, 2).unwrap();
    quiz.expire();

    let report = build_report(&quiz, &session()).unwrap();
    assert_eq!(report.result.outcome, "expired");
    assert_eq!(report.result.correct, 1);
    assert_eq!(report.result.total, 3);
    assert_eq!(report.questions[1].selected, None);
    assert!(!report.questions[1].is_correct);
}

#[test]
fn test_unfinished_quiz_has_no_report() {
    let mut quiz = lesson_quiz();
    quiz.answer(0, 2).unwrap();
    let err = build_report(&quiz, &session()).unwrap_err();
    assert!(matches!(err, ReportError::NotFinished));
}
