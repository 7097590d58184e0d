use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ReportError;
use crate::grading::Score;
use crate::model::QuestionId;
use crate::quiz::{Phase, Quiz};

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub quiz: ReportHeader,
    pub result: ReportResult,
    pub questions: Vec<ReportQuestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportHeader {
    pub title: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    pub started_at: String,
    pub finished_at: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportResult {
    pub outcome: &'static str,
    pub correct: usize,
    pub total: usize,
    pub percent: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportQuestion {
    pub id: QuestionId,
    pub selected: Option<usize>,
    pub correct: usize,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

/// Where the quiz came from and when it ran.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub source: String,
    pub fingerprint: Option<String>,
    pub pass_threshold: Option<u32>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

pub fn build_report(quiz: &Quiz, info: &SessionInfo) -> Result<Report, ReportError> {
    let (outcome, score): (&'static str, Score) = match quiz.phase() {
        Phase::Completed(s) => ("completed", s),
        Phase::Expired(s) => ("expired", s),
        _ => return Err(ReportError::NotFinished),
    };

    let questions = quiz
        .questions()
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let selected = quiz.answer_of(i);
            ReportQuestion {
                id: q.id.clone(),
                selected,
                correct: q.correct_answer,
                is_correct: quiz.feedback(i).map(|f| f.is_correct).unwrap_or(false),
                degraded: !quiz.is_gradable(i),
            }
        })
        .collect();

    Ok(Report {
        quiz: ReportHeader {
            title: quiz.title().unwrap_or("Quiz").to_string(),
            source: info.source.clone(),
            fingerprint: info.fingerprint.clone(),
            started_at: info.started_at.to_rfc3339(),
            finished_at: info.finished_at.to_rfc3339(),
            duration: format_elapsed((info.finished_at - info.started_at).num_seconds()),
        },
        result: ReportResult {
            outcome,
            correct: score.correct,
            total: score.total,
            percent: score.percent(),
            pass_threshold: info.pass_threshold,
            passed: info.pass_threshold.map(|t| score.passed(t)),
        },
        questions,
    })
}

pub fn write_report(report: &Report, path: &Path) -> Result<(), ReportError> {
    let yaml = serde_yaml::to_string(report)?;
    atomic_write(path, &yaml)?;
    log::info!("report written to {}", path.display());
    Ok(())
}

fn atomic_write(path: &Path, content: &str) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

fn format_elapsed(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
