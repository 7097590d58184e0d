//! Multi-question scored assessment.
//!
//! `NotStarted -> InProgress -> Completed`, back to `NotStarted` on
//! [`Quiz::reset`]. Timed exams may also end in `Expired`. The question
//! slice is shared read-only; the only mutable state is the learner's
//! selections.

use std::fmt;
use std::sync::Arc;

use crate::error::{AuthoringError, QuizError};
use crate::grading::{self, Feedback, OptionMark, Score};
use crate::model::Question;
use crate::validate::validate_question;

/// Called once per transition into a finished phase.
pub type CompletionObserver = Box<dyn FnMut(&Score)>;

pub struct QuizConfig {
    pub questions: Arc<[Question]>,
    pub title: Option<String>,
    pub on_complete: Option<CompletionObserver>,
}

impl QuizConfig {
    pub fn new(questions: impl Into<Arc<[Question]>>) -> Self {
        Self {
            questions: questions.into(),
            title: None,
            on_complete: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn on_complete(mut self, observer: impl FnMut(&Score) + 'static) -> Self {
        self.on_complete = Some(Box::new(observer));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Completed(Score),
    /// Time ran out; unanswered questions scored as incorrect.
    Expired(Score),
}

impl Phase {
    pub fn is_finished(&self) -> bool {
        matches!(self, Phase::Completed(_) | Phase::Expired(_))
    }
}

pub struct Quiz {
    questions: Arc<[Question]>,
    title: Option<String>,
    answers: Vec<Option<usize>>,
    degraded: Vec<Option<AuthoringError>>,
    gradable: Vec<usize>,
    phase: Phase,
    missing: Vec<usize>,
    on_complete: Option<CompletionObserver>,
}

impl fmt::Debug for Quiz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quiz")
            .field("title", &self.title)
            .field("questions", &self.questions.len())
            .field("answers", &self.answers)
            .field("phase", &self.phase)
            .field("missing", &self.missing)
            .finish()
    }
}

impl Quiz {
    pub fn new(config: QuizConfig) -> Self {
        let QuizConfig {
            questions,
            title,
            on_complete,
        } = config;

        let mut seen = std::collections::HashSet::new();
        let degraded: Vec<Option<AuthoringError>> = questions
            .iter()
            .map(|q| {
                let issue = validate_question(q).err().or_else(|| {
                    (!seen.insert(q.id.clone()))
                        .then(|| AuthoringError::DuplicateId { id: q.id.clone() })
                });
                if let Some(e) = &issue {
                    log::warn!("quiz question degraded: {}", e);
                }
                issue
            })
            .collect();
        let gradable = degraded
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_none())
            .map(|(i, _)| i)
            .collect();

        Self {
            answers: vec![None; questions.len()],
            questions,
            title,
            degraded,
            gradable,
            phase: Phase::NotStarted,
            missing: Vec::new(),
            on_complete,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn answer_of(&self, index: usize) -> Option<usize> {
        self.answers.get(index).copied().flatten()
    }

    pub fn degraded_reason(&self, index: usize) -> Option<&AuthoringError> {
        self.degraded.get(index).and_then(|d| d.as_ref())
    }

    pub fn is_gradable(&self, index: usize) -> bool {
        index < self.questions.len() && self.degraded[index].is_none()
    }

    pub fn gradable_count(&self) -> usize {
        self.gradable.len()
    }

    pub fn answered_count(&self) -> usize {
        self.gradable
            .iter()
            .filter(|&&i| self.answers[i].is_some())
            .count()
    }

    /// Gradable questions still without an answer.
    pub fn unanswered(&self) -> Vec<usize> {
        self.gradable
            .iter()
            .copied()
            .filter(|&i| self.answers[i].is_none())
            .collect()
    }

    /// Questions flagged by the last failed submit that are still unanswered.
    pub fn missing(&self) -> &[usize] {
        &self.missing
    }

    pub fn answer(&mut self, question: usize, option: usize) -> Result<(), QuizError> {
        if self.phase.is_finished() {
            return Err(QuizError::Finished);
        }
        let q = self
            .questions
            .get(question)
            .ok_or(QuizError::QuestionOutOfRange {
                index: question,
                len: self.questions.len(),
            })?;
        if let Some(e) = &self.degraded[question] {
            return Err(QuizError::Degraded {
                index: question,
                source: e.clone(),
            });
        }
        if option >= q.options.len() {
            return Err(QuizError::OptionOutOfRange {
                index: option,
                len: q.options.len(),
            });
        }

        self.answers[question] = Some(option);
        self.missing.retain(|&i| i != question);
        if self.phase == Phase::NotStarted {
            log::debug!("quiz started");
            self.phase = Phase::InProgress;
        }
        Ok(())
    }

    /// Scores the quiz once every gradable question has an answer.
    ///
    /// Repeated calls after completion return the same score without
    /// notifying the observer again.
    pub fn submit(&mut self) -> Result<Score, QuizError> {
        match self.phase {
            Phase::Completed(score) | Phase::Expired(score) => return Ok(score),
            Phase::NotStarted | Phase::InProgress => {}
        }
        if self.gradable.is_empty() {
            return Err(QuizError::NothingToGrade);
        }
        let unanswered = self.unanswered();
        if !unanswered.is_empty() {
            log::debug!("submit refused, unanswered: {:?}", unanswered);
            self.missing = unanswered.clone();
            return Err(QuizError::Incomplete { unanswered });
        }

        let score = self.compute_score();
        self.finish(Phase::Completed(score));
        Ok(score)
    }

    /// Ends a timed quiz. Unanswered questions count as incorrect.
    pub fn expire(&mut self) -> Score {
        match self.phase {
            Phase::Completed(score) | Phase::Expired(score) => score,
            Phase::NotStarted | Phase::InProgress => {
                let score = self.compute_score();
                self.finish(Phase::Expired(score));
                score
            }
        }
    }

    pub fn reset(&mut self) {
        log::debug!("quiz reset");
        self.answers.iter_mut().for_each(|a| *a = None);
        self.missing.clear();
        self.phase = Phase::NotStarted;
    }

    /// Pure function of the recorded answers.
    pub fn compute_score(&self) -> Score {
        grading::score(&self.questions, &self.answers, &self.gradable)
    }

    pub fn score(&self) -> Option<Score> {
        match self.phase {
            Phase::Completed(score) | Phase::Expired(score) => Some(score),
            _ => None,
        }
    }

    /// Per-question feedback, available once the quiz is finished.
    pub fn feedback(&self, index: usize) -> Option<Feedback<'_>> {
        if !self.phase.is_finished() || !self.is_gradable(index) {
            return None;
        }
        Some(Feedback::new(&self.questions[index], self.answers[index]))
    }

    pub fn option_mark(&self, question: usize, option: usize) -> OptionMark {
        match self.questions.get(question) {
            Some(q) if self.is_gradable(question) => grading::option_mark(
                q,
                self.answers[question],
                self.phase.is_finished(),
                option,
            ),
            _ => OptionMark::Plain,
        }
    }

    fn finish(&mut self, phase: Phase) {
        self.phase = phase;
        self.missing.clear();
        if let Phase::Completed(score) | Phase::Expired(score) = phase {
            log::info!(
                "quiz {} with {}/{} correct",
                if matches!(phase, Phase::Expired(_)) {
                    "expired"
                } else {
                    "completed"
                },
                score.correct,
                score.total
            );
            if let Some(observer) = self.on_complete.as_mut() {
                observer(&score);
            }
        }
    }
}
