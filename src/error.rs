use std::path::PathBuf;

use thiserror::Error;

use crate::model::QuestionId;

/// A defect in authored question content. Never caused by the learner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthoringError {
    #[error("question {id} has no options")]
    EmptyOptions { id: QuestionId },
    #[error("question {id} has {count} option(s), at least 2 are required")]
    TooFewOptions { id: QuestionId, count: usize },
    #[error("question {id} has {count} options, at most 26 are allowed")]
    TooManyOptions { id: QuestionId, count: usize },
    #[error("question {id} marks option {index} correct but only has {len} options")]
    CorrectIndexOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },
    #[error("question {id} has an empty prompt")]
    EmptyPrompt { id: QuestionId },
    #[error("question id {id} is used more than once")]
    DuplicateId { id: QuestionId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("question cannot be graded: {0}")]
    Degraded(AuthoringError),
    #[error("option {index} does not exist (question has {len} options)")]
    OptionOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// Learner tried to submit with questions left. Indices are zero-based.
    #[error("quiz incomplete: {} question(s) unanswered", unanswered.len())]
    Incomplete { unanswered: Vec<usize> },
    #[error("question {index} does not exist (quiz has {len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },
    #[error("option {index} does not exist (question has {len} options)")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("question {index} cannot be graded: {source}")]
    Degraded {
        index: usize,
        source: AuthoringError,
    },
    #[error("quiz is finished, reset it before answering again")]
    Finished,
    #[error("quiz has no gradable questions")]
    NothingToGrade,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid bank {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("no bank or file named '{0}'")]
    UnknownBank(String),
    #[error(transparent)]
    Authoring(#[from] AuthoringError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no closing --- for front matter")]
    UnterminatedFrontMatter,
    #[error("invalid front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
    #[error("question heading needs an id, got '{0}'")]
    MissingId(String),
    #[error("question {id} has no option marked [x]")]
    NoCorrectOption { id: QuestionId },
    #[error("question {id} marks {count} options [x], exactly one is allowed")]
    MultipleCorrectOptions { id: QuestionId, count: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write report {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot encode report: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("quiz is not finished, no result to report")]
    NotFinished,
}

/// Everything the command line can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("{}: {source}", path.display())]
    Lesson { path: PathBuf, source: ParseError },
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
    #[error("{0}")]
    Usage(String),
    #[error("{0} authoring error(s) found")]
    Invalid(usize),
}
