use std::sync::{mpsc, Arc};

use chrono::{DateTime, Utc};

use crate::check::InlineCheck;
use crate::error::QuizError;
use crate::model::{Lesson, LessonBlock, Question};
use crate::quiz::{Phase, Quiz, QuizConfig};
use crate::timer::{self, TimerEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Lesson,
    Quiz,
    Result,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ConfirmSubmit,
    /// Zero-based indices of the questions still unanswered.
    Incomplete(Vec<usize>),
    ConfirmReset,
    ConfirmQuit,
    TimeWarning,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivePanel {
    Sidebar,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuestionStatus {
    Unread,
    Seen,
    Answered,
    /// Left unanswered on a refused submit.
    Missing,
    Correct,
    Incorrect,
    Degraded,
}

#[derive(Debug, Default)]
pub struct StatusCounts {
    pub unread: usize,
    pub answered: usize,
    pub not_answered: usize,
    pub missing: usize,
    pub degraded: usize,
    pub correct: usize,
    pub incorrect: usize,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub title: String,
    pub source: String,
    pub blocks: Vec<LessonBlock>,
    pub checks: Vec<InlineCheck>,
    pub check_cursor: usize,
    pub lesson_scroll: usize,
    /// Scroll the lesson to keep the focused check in view.
    pub lesson_follow: bool,
    pub quiz: Quiz,
    pub current_question: usize,
    pub choice_cursor: usize,
    pub visited: Vec<bool>,
    pub dialog_stack: Vec<Dialog>,
    pub active_panel: ActivePanel,
    pub time_limit: Option<i64>,
    pub remaining_seconds: Option<i64>,
    /// Seconds left at which the countdown turns red and warns.
    pub warning_secs: i64,
    pub timer_rx: Option<mpsc::Receiver<TimerEvent>>,
    pub pass_threshold: Option<u32>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub message: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(quiz: Quiz, title: impl Into<String>, source: impl Into<String>) -> Self {
        let visited = vec![false; quiz.len()];
        let mut state = Self {
            screen: Screen::Quiz,
            title: title.into(),
            source: source.into(),
            blocks: Vec::new(),
            checks: Vec::new(),
            check_cursor: 0,
            lesson_scroll: 0,
            lesson_follow: true,
            quiz,
            current_question: 0,
            choice_cursor: 0,
            visited,
            dialog_stack: Vec::new(),
            active_panel: ActivePanel::Main,
            time_limit: None,
            remaining_seconds: None,
            warning_secs: 120,
            timer_rx: None,
            pass_threshold: None,
            started_at: Utc::now(),
            finished_at: None,
            message: None,
            should_quit: false,
        };
        state.mark_visited();
        state
    }

    /// A lesson page: prose and inline checks first, then the closing quiz.
    pub fn from_lesson(lesson: Lesson, on_complete: Option<crate::quiz::CompletionObserver>) -> Self {
        let Lesson {
            title,
            quiz_title,
            pass_threshold,
            blocks,
            checks,
            quiz,
        } = lesson;

        let questions: Arc<[Question]> = quiz.into();
        let mut config = QuizConfig::new(questions)
            .title(quiz_title.unwrap_or_else(|| format!("{} quiz", title)));
        config.on_complete = on_complete;

        let mut state = Self::new(Quiz::new(config), title.clone(), title);
        state.checks = checks
            .into_iter()
            .map(|q| InlineCheck::new(Arc::new(q)))
            .collect();
        state.blocks = blocks;
        state.pass_threshold = pass_threshold;
        state.screen = Screen::Lesson;
        state
    }

    pub fn has_lesson(&self) -> bool {
        !self.blocks.is_empty()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions().get(self.current_question)
    }

    pub fn current_option_count(&self) -> usize {
        match self.screen {
            Screen::Lesson => self
                .checks
                .get(self.check_cursor)
                .map(|c| c.question().options.len())
                .unwrap_or(0),
            _ => self.current_question().map(|q| q.options.len()).unwrap_or(0),
        }
    }

    fn mark_visited(&mut self) {
        if let Some(v) = self.visited.get_mut(self.current_question) {
            *v = true;
        }
    }

    pub fn question_status(&self, index: usize) -> QuestionStatus {
        if !self.quiz.is_gradable(index) {
            return QuestionStatus::Degraded;
        }
        if let Some(fb) = self.quiz.feedback(index) {
            return if fb.is_correct {
                QuestionStatus::Correct
            } else {
                QuestionStatus::Incorrect
            };
        }
        if self.quiz.answer_of(index).is_some() {
            QuestionStatus::Answered
        } else if self.quiz.missing().contains(&index) {
            QuestionStatus::Missing
        } else if self.visited.get(index).copied().unwrap_or(false) {
            QuestionStatus::Seen
        } else {
            QuestionStatus::Unread
        }
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for i in 0..self.quiz.len() {
            match self.question_status(i) {
                QuestionStatus::Unread => {
                    counts.unread += 1;
                    counts.not_answered += 1;
                }
                QuestionStatus::Seen => counts.not_answered += 1,
                QuestionStatus::Missing => {
                    counts.missing += 1;
                    counts.not_answered += 1;
                }
                QuestionStatus::Answered => counts.answered += 1,
                QuestionStatus::Correct => counts.correct += 1,
                QuestionStatus::Incorrect => counts.incorrect += 1,
                QuestionStatus::Degraded => counts.degraded += 1,
            }
        }
        counts
    }

    pub fn navigate_to(&mut self, idx: usize) {
        if idx < self.quiz.len() {
            self.current_question = idx;
            self.choice_cursor = self.quiz.answer_of(idx).unwrap_or(0);
            self.mark_visited();
        }
    }

    pub fn navigate_next(&mut self) {
        self.navigate_to(self.current_question + 1);
    }

    pub fn navigate_prev(&mut self) {
        if self.current_question > 0 {
            self.navigate_to(self.current_question - 1);
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let n = self.current_option_count();
        if n == 0 {
            return;
        }
        let cur = self.choice_cursor as isize + delta;
        self.choice_cursor = cur.clamp(0, n as isize - 1) as usize;
    }

    /// Answers the current quiz question, or the focused inline check.
    pub fn choose(&mut self, option: usize) {
        self.message = None;
        match self.screen {
            Screen::Lesson => {
                let Some(check) = self.checks.get_mut(self.check_cursor) else {
                    return;
                };
                if let Err(e) = check.select(option) {
                    self.message = Some(e.to_string());
                }
            }
            Screen::Quiz => match self.quiz.answer(self.current_question, option) {
                Ok(()) => self.choice_cursor = option,
                Err(QuizError::Finished) => {}
                Err(e) => self.message = Some(e.to_string()),
            },
            Screen::Result => {}
        }
    }

    pub fn focus_check(&mut self, idx: usize) {
        if idx < self.checks.len() {
            self.check_cursor = idx;
            self.lesson_follow = true;
            self.choice_cursor = self.checks[idx].selected().unwrap_or(0);
        }
    }

    pub fn scroll_lesson(&mut self, delta: isize) {
        self.lesson_follow = false;
        self.lesson_scroll = (self.lesson_scroll as isize + delta).max(0) as usize;
    }

    pub fn start_quiz(&mut self) {
        self.screen = if self.quiz.phase().is_finished() {
            Screen::Result
        } else {
            Screen::Quiz
        };
        self.choice_cursor = self.quiz.answer_of(self.current_question).unwrap_or(0);
        self.mark_visited();
    }

    /// Submits; an incomplete quiz opens a dialog listing what is missing.
    pub fn submit(&mut self) {
        match self.quiz.submit() {
            Ok(_) => {
                self.finished_at.get_or_insert_with(Utc::now);
                self.screen = Screen::Result;
            }
            Err(QuizError::Incomplete { unanswered }) => {
                self.push_dialog(Dialog::Incomplete(unanswered));
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    /// Starts a countdown of `limit` seconds, replacing any running one.
    pub fn start_timer(&mut self, limit: i64) {
        let deadline = Utc::now() + chrono::Duration::seconds(limit);
        self.time_limit = Some(limit);
        self.remaining_seconds = Some(limit);
        self.timer_rx = Some(timer::spawn_timer(deadline, self.warning_secs));
    }

    pub fn expire(&mut self) {
        let already = self.quiz.phase().is_finished();
        self.quiz.expire();
        if !already {
            self.finished_at = Some(Utc::now());
            self.dialog_stack.clear();
            self.screen = Screen::Result;
        }
        self.remaining_seconds = Some(0);
    }

    pub fn reset_quiz(&mut self) {
        self.quiz.reset();
        self.visited.iter_mut().for_each(|v| *v = false);
        self.started_at = Utc::now();
        self.finished_at = None;
        if let Some(limit) = self.time_limit {
            self.start_timer(limit);
        }
        self.message = None;
        self.screen = Screen::Quiz;
        self.navigate_to(0);
        self.choice_cursor = 0;
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.quiz.phase(), Phase::Completed(_) | Phase::Expired(_))
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

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }
}
