use std::fmt;

use serde::{Deserialize, Serialize};

/// Question identity. Banks use both numeric and slug ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Num(u64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Num(n) => write!(f, "{}", n),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        QuestionId::Num(n)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        match s.parse::<u64>() {
            Ok(n) => QuestionId::Num(n),
            Err(_) => QuestionId::Text(s.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Basic,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Difficulty::Basic),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!(
                "unknown difficulty '{}' (basic, intermediate, advanced)",
                other
            )),
        }
    }
}

/// One single-select question. Authored once, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub options: Vec<String>,
    #[serde(
        alias = "correctAnswer",
        alias = "correctIndex",
        alias = "correct_index"
    )]
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Question {
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(|s| s.as_str())
    }
}

/// Fractions of an exam drawn from each difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyMix {
    pub basic: f64,
    pub intermediate: f64,
    pub advanced: f64,
}

impl Default for DifficultyMix {
    fn default() -> Self {
        Self {
            basic: 0.4,
            intermediate: 0.4,
            advanced: 0.2,
        }
    }
}

impl DifficultyMix {
    pub fn weight(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Basic => self.basic,
            Difficulty::Intermediate => self.intermediate,
            Difficulty::Advanced => self.advanced,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamConfig {
    pub id: String,
    pub title: String,
    pub total_questions: usize,
    /// Seconds. `None` means untimed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u64>,
    pub pass_threshold: u32,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_mix: Option<DifficultyMix>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam: Option<ExamConfig>,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonFrontMatter {
    pub title: Option<String>,
    pub quiz_title: Option<String>,
    pub pass_threshold: Option<u32>,
}

/// A lesson page: prose with inline checks, and an optional closing quiz.
#[derive(Debug, Clone)]
pub struct Lesson {
    pub title: String,
    pub quiz_title: Option<String>,
    pub pass_threshold: Option<u32>,
    pub blocks: Vec<LessonBlock>,
    pub checks: Vec<Question>,
    pub quiz: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LessonBlock {
    Body(BodyElement),
    /// Index into `Lesson::checks`.
    Check(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyElement {
    Heading(String),
    Text(String),
    Code(String),
    ListItem(String),
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}
