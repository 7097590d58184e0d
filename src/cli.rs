use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quizbank", version, about = "Practice quizzes and lessons in the terminal")]
pub struct Cli {
    /// Config file [default: platform config dir]/config.yaml
    #[arg(long, global = true, value_name = "file")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG wins when set
    #[arg(long, global = true, value_name = "level", default_value = "error")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available banks with question counts
    List,
    /// Validate banks or lesson files; exits 1 on authoring errors
    Check {
        /// Bank ids, bank files or lesson files [default: every known bank]
        targets: Vec<String>,
    },
    /// Practise a bank, optionally narrowed to a section or category
    Quiz {
        /// Bank id or path to a bank file
        bank: String,
        #[arg(long)]
        section: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        /// Override the quiz title
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Timed exam drawn from a bank, balanced across categories
    Exam {
        /// Bank id or path to a bank file
        bank: String,
        /// Number of questions [default: bank exam size, else config]
        #[arg(long)]
        count: Option<usize>,
        /// Seed for a reproducible selection
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Read a Markdown lesson with inline checks and a closing quiz
    Lesson {
        file: PathBuf,
        #[command(flatten)]
        report: ReportArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Write a YAML result report here when the quiz finishes
    #[arg(long, value_name = "path")]
    pub report: Option<PathBuf>,
}
