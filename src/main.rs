use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use env_logger::Env;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizbank::bank::{Catalogue, QuestionFilter};
use quizbank::cli::{Cli, Command};
use quizbank::config::{self, Config};
use quizbank::error::{AppError, LoadError};
use quizbank::model::{Bank, Difficulty, Question};
use quizbank::quiz::{Phase, Quiz, QuizConfig};
use quizbank::report::{build_report, write_report, SessionInfo};
use quizbank::state::AppState;
use quizbank::{parser, select, tui, validate};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level.as_str())).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = config::load(cli.config.as_deref())?;
    let catalogue = Catalogue::load(&config);

    match cli.command {
        Command::List => {
            list(&catalogue);
            Ok(())
        }
        Command::Check { targets } => check(&catalogue, &targets),
        Command::Quiz {
            bank,
            section,
            category,
            topic,
            difficulty,
            title,
            report,
        } => {
            let bank = catalogue.resolve(&bank)?;
            let difficulty = difficulty
                .map(|d| d.parse::<Difficulty>())
                .transpose()
                .map_err(AppError::Usage)?;
            let filter = QuestionFilter {
                section,
                category,
                topic,
                difficulty,
            };
            let questions = bank.filter(&filter);
            if questions.is_empty() {
                return Err(AppError::Usage(format!(
                    "no questions in '{}' match the given filters",
                    bank.id
                )));
            }
            let title = title.unwrap_or_else(|| bank.title.clone());
            let quiz = Quiz::new(QuizConfig::new(questions).title(title.clone()));
            let mut state = AppState::new(quiz, title, bank.id.clone());
            state.pass_threshold = Some(config.pass_threshold);
            session(state, report.report.as_deref(), Some(bank.fingerprint()))
        }
        Command::Exam {
            bank,
            count,
            seed,
            report,
        } => {
            let bank = catalogue.resolve(&bank)?;
            let state = exam(&bank, count, seed, &config)?;
            session(state, report.report.as_deref(), Some(bank.fingerprint()))
        }
        Command::Lesson { file, report } => {
            let lesson = read_lesson(&file)?;
            let mut state = AppState::from_lesson(lesson, None);
            state.source = file.display().to_string();
            state.pass_threshold = state.pass_threshold.or(Some(config.pass_threshold));
            session(state, report.report.as_deref(), None)
        }
    }
}

fn list(catalogue: &Catalogue) {
    for bank in catalogue.banks() {
        let exam = match &bank.exam {
            Some(e) => format!("  exam: {} questions", e.total_questions),
            None => String::new(),
        };
        println!(
            "{:<20} {:>4} questions  {}{}",
            bank.id,
            bank.questions.len(),
            bank.title,
            exam
        );
    }
}

fn check(catalogue: &Catalogue, targets: &[String]) -> Result<(), AppError> {
    let mut issues = 0;
    let mut report = |name: &str, questions: &[Question]| {
        let errors = validate::validate_questions(questions);
        if errors.is_empty() {
            println!("ok      {} ({} questions)", name, questions.len());
        } else {
            println!("invalid {}", name);
            for e in &errors {
                println!("  - {}", e);
            }
            issues += errors.len();
        }
    };

    if targets.is_empty() {
        for bank in catalogue.banks() {
            report(bank.id.as_str(), bank.questions.as_slice());
        }
    } else {
        for target in targets {
            if target.ends_with(".md") {
                let lesson = read_lesson(Path::new(target))?;
                let mut all = lesson.checks.clone();
                all.extend(lesson.quiz.iter().cloned());
                report(target.as_str(), all.as_slice());
            } else {
                let bank = catalogue.resolve(target)?;
                report(bank.id.as_str(), bank.questions.as_slice());
            }
        }
    }

    if issues > 0 {
        return Err(AppError::Invalid(issues));
    }
    Ok(())
}

fn read_lesson(path: &Path) -> Result<quizbank::model::Lesson, AppError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parser::parse_lesson(&content).map_err(|source| AppError::Lesson {
        path: path.to_path_buf(),
        source,
    })
}

fn exam(
    bank: &Bank,
    count: Option<usize>,
    seed: Option<u64>,
    config: &Config,
) -> Result<AppState, AppError> {
    let exam = bank.exam.as_ref();
    let count = count
        .or(exam.map(|e| e.total_questions))
        .unwrap_or(config.exam_size);
    if count == 0 {
        return Err(AppError::Usage("exam needs at least one question".into()));
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let categories = exam.map(|e| e.categories.clone()).unwrap_or_default();
    let mix = exam.and_then(|e| e.difficulty_mix).unwrap_or_default();
    let questions = select::balanced(&bank.questions, count, &categories, &mix, &mut rng);
    log::info!(
        "exam drawn from {}: {} of {} questions",
        bank.id,
        questions.len(),
        bank.questions.len()
    );

    let title = exam
        .map(|e| e.title.clone())
        .unwrap_or_else(|| format!("{} exam", bank.title));
    let questions: Arc<[Question]> = questions.into();
    let quiz = Quiz::new(QuizConfig::new(questions).title(title.clone()));

    let mut state = AppState::new(quiz, title, bank.id.clone());
    state.pass_threshold = Some(exam.map(|e| e.pass_threshold).unwrap_or(config.pass_threshold));

    state.warning_secs = config.warning_secs;
    if let Some(limit) = exam.and_then(|e| e.time_limit) {
        state.start_timer(limit as i64);
    }
    Ok(state)
}

fn session(
    state: AppState,
    report_path: Option<&Path>,
    fingerprint: Option<String>,
) -> Result<(), AppError> {
    let state = tui::run_tui(state)?;

    let score = match state.quiz.phase() {
        Phase::Completed(s) | Phase::Expired(s) => s,
        _ => {
            if let Some(path) = report_path {
                log::warn!("quiz not finished, no report written to {}", path.display());
            }
            return Ok(());
        }
    };

    let verdict = match state.pass_threshold {
        Some(t) if score.passed(t) => "  PASS",
        Some(_) => "  FAIL",
        None => "",
    };
    println!(
        "Score: {}/{} ({}%){}",
        score.correct,
        score.total,
        score.percent(),
        verdict
    );

    if let Some(path) = report_path {
        let info = SessionInfo {
            source: state.source.clone(),
            fingerprint,
            pass_threshold: state.pass_threshold,
            started_at: state.started_at,
            finished_at: state.finished_at.unwrap_or_else(Utc::now),
        };
        let report = build_report(&state.quiz, &info)?;
        write_report(&report, path)?;
        println!("Report written to {}", display(path).display());
    }
    Ok(())
}

fn display(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
