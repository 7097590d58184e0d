//! Question banks, inline checks and graded quizzes for the terminal.

pub mod bank;
pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod grading;
pub mod model;
pub mod parser;
pub mod quiz;
pub mod report;
pub mod select;
pub mod state;
pub mod timer;
pub mod tui;
pub mod ui;
pub mod validate;
