use std::path::{Path, PathBuf};

use quizbank::bank::Catalogue;
use quizbank::config::{self, Config};
use quizbank::error::ConfigError;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config = config::load(Some(&fixture("config.yaml"))).unwrap();
    assert_eq!(config.pass_threshold, 70);
    assert_eq!(config.bank_dirs, vec![PathBuf::from("fixtures")]);
    assert_eq!(config.exam_size, Config::default().exam_size);
    assert_eq!(config.warning_secs, Config::default().warning_secs);
}

#[test]
fn test_missing_config_gives_defaults() {
    let config = config::load(Some(&fixture("no_such_config.yaml"))).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_broken_config_is_an_error() {
    let err = config::load(Some(&fixture("broken_config.yaml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml { .. }));
    assert!(err.to_string().contains("broken_config.yaml"));
}

#[test]
fn test_catalogue_includes_bank_dirs() {
    let config = Config {
        bank_dirs: vec![Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")],
        ..Config::default()
    };
    let catalogue = Catalogue::load(&config);
    assert!(catalogue.get("sample").is_some());
    assert!(catalogue.banks().len() > quizbank::bank::embedded().len());
}
