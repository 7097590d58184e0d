use serde::Serialize;

use crate::model::Question;

/// How one option should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    /// Chosen, answer not revealed yet.
    Selected,
    /// The correct option, once revealed. Chosen or not.
    Correct,
    /// The learner's choice, once revealed, when it was wrong.
    ChosenWrong,
}

pub fn is_correct(question: &Question, selected: usize) -> bool {
    selected == question.correct_answer
}

pub fn option_mark(
    question: &Question,
    selected: Option<usize>,
    revealed: bool,
    index: usize,
) -> OptionMark {
    let chosen = selected == Some(index);
    if !revealed {
        return if chosen {
            OptionMark::Selected
        } else {
            OptionMark::Plain
        };
    }
    if index == question.correct_answer {
        OptionMark::Correct
    } else if chosen {
        OptionMark::ChosenWrong
    } else {
        OptionMark::Plain
    }
}

/// Post-answer feedback for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback<'a> {
    pub selected: Option<usize>,
    pub correct: usize,
    pub is_correct: bool,
    pub explanation: &'a str,
}

impl<'a> Feedback<'a> {
    pub fn new(question: &'a Question, selected: Option<usize>) -> Self {
        Self {
            selected,
            correct: question.correct_answer,
            is_correct: selected.map(|s| is_correct(question, s)).unwrap_or(false),
            explanation: &question.explanation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// Fraction correct in `[0, 1]`. An empty quiz scores 0.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    pub fn percent(&self) -> u32 {
        (self.percentage() * 100.0).round() as u32
    }

    /// At least `threshold` percent correct, compared exactly.
    pub fn passed(&self, threshold: u32) -> bool {
        self.total > 0 && self.correct * 100 >= threshold as usize * self.total
    }
}

/// Scores `answers` against `questions`, skipping questions not in `gradable`.
/// Unanswered gradable questions count as incorrect.
pub fn score<'a, I>(questions: &[Question], answers: &[Option<usize>], gradable: I) -> Score
where
    I: IntoIterator<Item = &'a usize>,
{
    let mut total = 0;
    let mut correct = 0;
    for &i in gradable {
        let Some(q) = questions.get(i) else {
            continue;
        };
        total += 1;
        if let Some(Some(sel)) = answers.get(i) {
            if is_correct(q, *sel) {
                correct += 1;
            }
        }
    }
    Score { correct, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_mark_is_inclusive() {
        assert!(Score { correct: 29, total: 50 }.passed(58));
        assert!(!Score { correct: 28, total: 50 }.passed(58));
        assert!(Score { correct: 4, total: 5 }.passed(80));
        assert!(!Score { correct: 2, total: 3 }.passed(67));
        assert!(Score { correct: 0, total: 3 }.passed(0));
        assert!(!Score { correct: 0, total: 0 }.passed(0));
    }

    #[test]
    fn every_exact_percentage_passes_its_own_mark() {
        for total in 1..=100usize {
            for correct in 0..=total {
                if (correct * 100) % total == 0 {
                    let pct = (correct * 100 / total) as u32;
                    let score = Score { correct, total };
                    assert!(score.passed(pct), "{}/{} at {}%", correct, total, pct);
                    assert!(!score.passed(pct + 1), "{}/{} at {}%", correct, total, pct + 1);
                }
            }
        }
    }
}
