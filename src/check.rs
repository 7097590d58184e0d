//! Single-question check embedded in lesson prose.
//!
//! The first valid selection reveals the answer and locks the check.
//! A malformed question never becomes gradable; it stays in
//! [`CheckState::Degraded`] so the host can show it without a working
//! answer-check.

use std::sync::Arc;

use crate::error::{AuthoringError, CheckError};
use crate::grading::{self, Feedback, OptionMark};
use crate::model::Question;
use crate::validate::validate_question;

#[derive(Debug, Clone, PartialEq)]
pub enum CheckState {
    Unanswered,
    Revealed { selected: usize, is_correct: bool },
    Degraded(AuthoringError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Revealed { is_correct: bool },
    /// Already answered; the earlier choice stands.
    Locked { selected: usize },
}

#[derive(Debug, Clone)]
pub struct InlineCheck {
    question: Arc<Question>,
    state: CheckState,
}

impl InlineCheck {
    pub fn new(question: Arc<Question>) -> Self {
        let state = match validate_question(&question) {
            Ok(()) => CheckState::Unanswered,
            Err(e) => {
                log::warn!("inline check degraded: {}", e);
                CheckState::Degraded(e)
            }
        };
        Self { question, state }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn state(&self) -> &CheckState {
        &self.state
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, CheckState::Revealed { .. })
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.state, CheckState::Degraded(_))
    }

    pub fn select(&mut self, index: usize) -> Result<SelectOutcome, CheckError> {
        match &self.state {
            CheckState::Degraded(e) => Err(CheckError::Degraded(e.clone())),
            CheckState::Revealed { selected, .. } => Ok(SelectOutcome::Locked {
                selected: *selected,
            }),
            CheckState::Unanswered => {
                let len = self.question.options.len();
                if index >= len {
                    return Err(CheckError::OptionOutOfRange { index, len });
                }
                let is_correct = grading::is_correct(&self.question, index);
                log::debug!(
                    "check {}: option {} selected, correct={}",
                    self.question.id,
                    index,
                    is_correct
                );
                self.state = CheckState::Revealed {
                    selected: index,
                    is_correct,
                };
                Ok(SelectOutcome::Revealed { is_correct })
            }
        }
    }

    pub fn selected(&self) -> Option<usize> {
        match self.state {
            CheckState::Revealed { selected, .. } => Some(selected),
            _ => None,
        }
    }

    pub fn feedback(&self) -> Option<Feedback<'_>> {
        self.selected()
            .map(|sel| Feedback::new(&self.question, Some(sel)))
    }

    pub fn option_mark(&self, index: usize) -> OptionMark {
        if self.is_degraded() {
            return OptionMark::Plain;
        }
        grading::option_mark(&self.question, self.selected(), self.is_revealed(), index)
    }
}
