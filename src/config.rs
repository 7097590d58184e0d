use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extra directories scanned for `*.yaml` banks.
    pub bank_dirs: Vec<PathBuf>,
    /// Pass mark in percent when neither the bank nor the lesson sets one.
    pub pass_threshold: u32,
    /// Exam length when the bank has no exam settings.
    pub exam_size: usize,
    /// Seconds before the deadline at which timed exams warn.
    pub warning_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bank_dirs: Vec::new(),
            pass_threshold: 80,
            exam_size: 20,
            warning_secs: 120,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "quizbank").map(|d| d.config_dir().join("config.yaml"))
}

/// Loads `path`, or the platform default location when `path` is `None`.
/// A missing file yields the defaults; a broken one is an error.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(Config::default()),
        },
    };
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config: Config = serde_yaml::from_str(&content)
        .map_err(|source| ConfigError::Yaml { path: path.clone(), source })?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}
