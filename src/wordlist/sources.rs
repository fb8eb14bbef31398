use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;

use crate::config::WordlistConfig;
use crate::error::WordrunnerError;
use crate::utils::read_words;

/// Lowercase and drop a single leading slash.
pub fn normalize_priority_word(word: &str) -> String {
    let word = word.trim();
    word.strip_prefix('/').unwrap_or(word).to_lowercase()
}

/// Built-in priority words, normalized.
pub fn builtin_priority_words(cfg: &WordlistConfig) -> Vec<String> {
    cfg.priority_words
        .iter()
        .map(|w| normalize_priority_word(w))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Words from a user priority file. A missing file is fatal.
pub fn load_priority_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let words = read_words(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => anyhow::Error::new(WordrunnerError::PriorityWordlistMissing(path.to_path_buf())),
        _ => anyhow::Error::new(e).context(format!("reading priority wordlist {}", path.display())),
    })?;
    Ok(words
        .iter()
        .map(|w| normalize_priority_word(w))
        .filter(|w| !w.is_empty())
        .collect())
}

/// Raw words of a base wordlist. `missing` builds the error used when the file is absent.
pub fn load_base_words(
    path: &Path,
    missing: fn(std::path::PathBuf) -> WordrunnerError,
) -> anyhow::Result<Vec<String>> {
    match read_words(path) {
        Ok(words) => {
            tracing::debug!(path = %path.display(), words = words.len(), "Loaded wordlist");
            Ok(words)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(missing(path.to_path_buf()).into()),
        Err(e) => Err(e).with_context(|| format!("reading wordlist {}", path.display())),
    }
}

/// Base wordlist split into its three buckets, each de-duplicated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseBuckets {
    pub config: Vec<String>,
    pub env: Vec<String>,
    pub general: Vec<String>,
}

impl BaseBuckets {
    /// Drop entries ending in an excluded extension, then bucket by the config prefix,
    /// the env literals, and everything else.
    pub fn classify<I, S>(words: I, excluded_extensions: &[String], cfg: &WordlistConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buckets = BaseBuckets::default();
        let mut seen = ahash::AHashSet::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() || excluded_extensions.iter().any(|ext| word.ends_with(ext.as_str())) {
                continue;
            }
            if !seen.insert(word.clone()) {
                continue;
            }
            if word.starts_with(cfg.config_prefix.as_str()) {
                buckets.config.push(word);
            } else if cfg.env_words.iter().any(|e| *e == word) {
                buckets.env.push(word);
            } else {
                buckets.general.push(word);
            }
        }
        buckets
    }

    pub fn len(&self) -> usize {
        self.config.len() + self.env.len() + self.general.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
