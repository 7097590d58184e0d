use std::collections::HashSet;

use crate::error::AuthoringError;
use crate::model::{Bank, Question};

/// Options are picked by letter, `a` to `z`.
pub const MAX_OPTIONS: usize = 26;

/// Checks that a question can be graded: a prompt, at least two options
/// and a correct index inside the options.
pub fn validate_question(q: &Question) -> Result<(), AuthoringError> {
    if q.options.is_empty() {
        return Err(AuthoringError::EmptyOptions { id: q.id.clone() });
    }
    if q.options.len() < 2 {
        return Err(AuthoringError::TooFewOptions {
            id: q.id.clone(),
            count: q.options.len(),
        });
    }
    if q.options.len() > MAX_OPTIONS {
        return Err(AuthoringError::TooManyOptions {
            id: q.id.clone(),
            count: q.options.len(),
        });
    }
    if q.correct_answer >= q.options.len() {
        return Err(AuthoringError::CorrectIndexOutOfRange {
            id: q.id.clone(),
            index: q.correct_answer,
            len: q.options.len(),
        });
    }
    if q.question.trim().is_empty() {
        return Err(AuthoringError::EmptyPrompt { id: q.id.clone() });
    }
    Ok(())
}

/// Every authoring defect in a question set, in order. Duplicate ids are
/// reported once per repeated occurrence.
pub fn validate_questions(questions: &[Question]) -> Vec<AuthoringError> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();
    for q in questions {
        if let Err(e) = validate_question(q) {
            issues.push(e);
        }
        if !seen.insert(&q.id) {
            issues.push(AuthoringError::DuplicateId { id: q.id.clone() });
        }
    }
    issues
}

pub fn validate_bank(bank: &Bank) -> Vec<AuthoringError> {
    let issues = validate_questions(&bank.questions);
    if !issues.is_empty() {
        log::debug!("bank {}: {} authoring issue(s)", bank.id, issues.len());
    }
    issues
}
