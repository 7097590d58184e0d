use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::error::{AuthoringError, LoadError};
use crate::model::{Bank, Difficulty, Question};

const EMBEDDED_SOURCES: [(&str, &str); 4] = [
    (
        "electrical-theory.yaml",
        include_str!("../data/electrical-theory.yaml"),
    ),
    ("first-aid.yaml", include_str!("../data/first-aid.yaml")),
    ("mewp.yaml", include_str!("../data/mewp.yaml")),
    ("pasma.yaml", include_str!("../data/pasma.yaml")),
];

static EMBEDDED: OnceLock<Vec<Bank>> = OnceLock::new();

/// Built-in banks, parsed on first use and never modified afterwards.
pub fn embedded() -> &'static [Bank] {
    EMBEDDED.get_or_init(|| {
        EMBEDDED_SOURCES
            .iter()
            .filter_map(|(name, src)| match parse_bank(src, Path::new(name)) {
                Ok(bank) => Some(bank),
                Err(e) => {
                    log::error!("built-in bank {} is broken: {}", name, e);
                    None
                }
            })
            .collect()
    })
}

pub fn parse_bank(content: &str, origin: &Path) -> Result<Bank, LoadError> {
    serde_yaml::from_str(content).map_err(|source| LoadError::Yaml {
        path: origin.to_path_buf(),
        source,
    })
}

pub fn load_bank(path: &Path) -> Result<Bank, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bank = parse_bank(&content, path)?;
    log::debug!(
        "loaded bank {} ({} questions) from {}",
        bank.id,
        bank.questions.len(),
        path.display()
    );
    Ok(bank)
}

/// Every bank in `dir` with a `.yaml`/`.yml` extension, sorted by file name.
/// Unreadable or invalid files are logged and skipped.
pub fn load_dir(dir: &Path) -> Vec<Bank> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("cannot read bank directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| e == "yaml" || e == "yml")
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    paths
        .iter()
        .filter_map(|p| match load_bank(p) {
            Ok(bank) => Some(bank),
            Err(e) => {
                log::warn!("skipping {}", e);
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionFilter {
    pub section: Option<String>,
    pub category: Option<String>,
    pub topic: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl QuestionFilter {
    pub fn matches(&self, q: &Question) -> bool {
        fn field_matches(want: &Option<String>, have: &Option<String>) -> bool {
            match want {
                None => true,
                Some(w) => have
                    .as_deref()
                    .map(|h| h.eq_ignore_ascii_case(w))
                    .unwrap_or(false),
            }
        }

        field_matches(&self.section, &q.section)
            && field_matches(&self.category, &q.category)
            && field_matches(&self.topic, &q.topic)
            && self.difficulty.map(|d| q.difficulty == Some(d)).unwrap_or(true)
    }
}

impl Bank {
    /// Matching questions in bank order.
    pub fn filter(&self, filter: &QuestionFilter) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for c in self.questions.iter().filter_map(|q| q.category.as_deref()) {
            if !out.contains(&c) {
                out.push(c);
            }
        }
        out
    }

    /// SHA-256 over the bank's canonical YAML form.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_yaml::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        let digest = hasher.finalize();
        let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        format!("sha256:{}", hex)
    }
}

/// Joins question sets in order. Ids must stay unique across the result.
pub fn concat<'a, I>(sets: I) -> Result<Vec<Question>, AuthoringError>
where
    I: IntoIterator<Item = &'a [Question]>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for set in sets {
        for q in set {
            if !seen.insert(q.id.clone()) {
                return Err(AuthoringError::DuplicateId { id: q.id.clone() });
            }
            out.push(q.clone());
        }
    }
    Ok(out)
}

/// Built-in banks plus those found in the configured directories.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    banks: Vec<Bank>,
}

impl Catalogue {
    pub fn load(config: &Config) -> Self {
        let mut banks: Vec<Bank> = embedded().to_vec();
        for dir in &config.bank_dirs {
            for bank in load_dir(dir) {
                if banks.iter().any(|b| b.id == bank.id) {
                    log::warn!(
                        "bank id {} in {} shadows an earlier bank, skipping",
                        bank.id,
                        dir.display()
                    );
                    continue;
                }
                banks.push(bank);
            }
        }
        Self { banks }
    }

    pub fn banks(&self) -> &[Bank] {
        &self.banks
    }

    pub fn get(&self, id: &str) -> Option<&Bank> {
        self.banks.iter().find(|b| b.id == id)
    }

    /// A catalogue id, or else a path to a bank file.
    pub fn resolve(&self, name: &str) -> Result<Bank, LoadError> {
        if let Some(bank) = self.get(name) {
            return Ok(bank.clone());
        }
        let path = Path::new(name);
        if path.is_file() {
            return load_bank(path);
        }
        Err(LoadError::UnknownBank(name.to_string()))
    }
}
