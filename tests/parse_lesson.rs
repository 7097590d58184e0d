use std::fs;

use quizbank::error::ParseError;
use quizbank::model::{BodyElement, LessonBlock, QuestionId};
use quizbank::parser::parse_lesson;

#[test]
fn test_parse_sample_lesson() {
    let content = fs::read_to_string("fixtures/sample_lesson.md").expect("Cannot read fixture");
    let lesson = parse_lesson(&content).unwrap();

    assert_eq!(lesson.title, "Ohm's Law");
    assert_eq!(lesson.quiz_title.as_deref(), Some("Ohm's Law review"));
    assert_eq!(lesson.pass_threshold, Some(75));

    // Inline checks, in page order
    assert_eq!(lesson.checks.len(), 2);
    let c1 = &lesson.checks[0];
    assert_eq!(c1.id, QuestionId::Text("ohm-1".to_string()));
    assert!(c1.question.contains("10 Ω resistor"));
    assert_eq!(c1.options, vec!["5 V", "20 V", "12 V", "0.2 V"]);
    assert_eq!(c1.correct_answer, 1);
    assert_eq!(c1.explanation, "V = I × R = 2 A × 10 Ω = 20 V.");

    let c2 = &lesson.checks[1];
    assert_eq!(c2.options.len(), 1);

    // Closing quiz
    assert_eq!(lesson.quiz.len(), 3);
    assert_eq!(lesson.quiz[0].id, QuestionId::Text("q1".to_string()));
    assert_eq!(lesson.quiz[0].correct_answer, 2);
    assert_eq!(lesson.quiz[0].explanation, "Resistance is measured in ohms (Ω).");
    assert_eq!(lesson.quiz[1].correct_answer, 0);
    assert_eq!(lesson.quiz[1].explanation, "");
    assert_eq!(lesson.quiz[2].correct_answer, 2);

    // Prose and check positions
    assert!(matches!(
        &lesson.blocks[0],
        LessonBlock::Body(BodyElement::Text(t)) if t.contains("**V = I × R**")
    ));
    match &lesson.blocks[1] {
        LessonBlock::Body(BodyElement::Table { header, rows }) => {
            assert_eq!(header, &vec!["Quantity", "Symbol", "Unit"]);
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[2], vec!["Resistance", "R", "ohm"]);
        }
        other => panic!("Expected table, got {:?}", other),
    }
    assert_eq!(lesson.blocks[2], LessonBlock::Check(0));
    assert!(matches!(
        &lesson.blocks[3],
        LessonBlock::Body(BodyElement::Text(t)) if t.starts_with("Rearranging")
    ));
    assert!(matches!(
        &lesson.blocks[4],
        LessonBlock::Body(BodyElement::Code(c)) if c.contains("I = V / R")
    ));
    assert_eq!(lesson.blocks[5], LessonBlock::Check(1));
    assert_eq!(lesson.blocks.len(), 6);
}

#[test]
fn test_title_falls_back_to_heading() {
    let lesson = parse_lesson("# Fuses\n\nA fuse protects the cable.\n").unwrap();
    assert_eq!(lesson.title, "Fuses");
    assert!(lesson.checks.is_empty());
    assert!(lesson.quiz.is_empty());
    assert_eq!(lesson.blocks.len(), 1);
}

#[test]
fn test_numeric_question_ids() {
    let md = "## Quiz: 7\n\nPick one\n\n- [x] yes\n- [ ] no\n";
    let lesson = parse_lesson(md).unwrap();
    assert_eq!(lesson.quiz[0].id, QuestionId::Num(7));
    assert_eq!(lesson.title, "Untitled lesson");
}

#[test]
fn test_prompt_bullets_stay_with_question() {
    let md = "## Check: c\n\nWhich applies?\n\n- first fact\n- second fact\n\n- [ ] A\n- [x] B\n";
    let lesson = parse_lesson(md).unwrap();
    let q = &lesson.checks[0];
    assert!(q.question.contains("• first fact"));
    assert_eq!(q.options, vec!["A", "B"]);
    assert_eq!(q.correct_answer, 1);
}

#[test]
fn test_missing_correct_option() {
    let md = "## Check: c1\n\nPick\n\n- [ ] a\n- [ ] b\n";
    let err = parse_lesson(md).unwrap_err();
    assert!(matches!(err, ParseError::NoCorrectOption { .. }));
}

#[test]
fn test_multiple_correct_options() {
    let md = "## Quiz: q\n\nPick\n\n- [x] a\n- [x] b\n- [ ] c\n";
    let err = parse_lesson(md).unwrap_err();
    assert!(matches!(err, ParseError::MultipleCorrectOptions { count: 2, .. }));
}

#[test]
fn test_heading_without_id() {
    let err = parse_lesson("## Check:\n\nPick\n").unwrap_err();
    assert!(matches!(err, ParseError::MissingId(_)));
}

#[test]
fn test_unterminated_front_matter() {
    let err = parse_lesson("---\ntitle: x\n\n# Body\n").unwrap_err();
    assert!(matches!(err, ParseError::UnterminatedFrontMatter));
}

#[test]
fn test_plain_colon_heading_is_prose() {
    let lesson = parse_lesson("## Note: wiring colours\n\nBrown is live.\n").unwrap();
    assert_eq!(
        lesson.blocks[0],
        LessonBlock::Body(BodyElement::Heading("Note: wiring colours".to_string()))
    );
}
