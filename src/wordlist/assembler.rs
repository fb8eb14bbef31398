use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;

use super::sources::BaseBuckets;

/// Where a combined-wordlist entry came from. Variant order is scan priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Disallowed,
    Keyword,
    Priority,
    PriorityFile,
    Config,
    Env,
    General,
}

/// Words already queued for a target. Passed into and returned from every assembly.
#[derive(Debug, Clone, Default)]
pub struct SeenSet(AHashSet<String>);

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, word: &str) -> bool {
        self.0.insert(word.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub word: String,
    pub category: Category,
}

#[derive(Debug, Clone, Default)]
pub struct CombinedWordlist {
    entries: Vec<Entry>,
}

impl CombinedWordlist {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.word.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything that feeds one assembly pass.
#[derive(Debug, Clone, Copy)]
pub struct WordlistSources<'a> {
    pub disallowed: &'a [String],
    pub keywords: &'a [String],
    pub priority: &'a [String],
    pub priority_file: &'a [String],
    pub base: &'a BaseBuckets,
}

/// Merge all sources in category order, skipping anything already in `seen`.
/// The general bucket is shuffled before insertion.
pub fn assemble<R: Rng + ?Sized>(
    sources: WordlistSources<'_>,
    seen: SeenSet,
    rng: &mut R,
) -> (CombinedWordlist, SeenSet) {
    let mut builder = Builder { list: CombinedWordlist::default(), seen };

    builder.extend(Category::Disallowed, sources.disallowed);
    builder.extend(Category::Keyword, sources.keywords);
    builder.extend(Category::Priority, sources.priority);
    builder.extend(Category::PriorityFile, sources.priority_file);
    builder.extend(Category::Config, &sources.base.config);
    builder.extend(Category::Env, &sources.base.env);

    let mut general = sources.base.general.clone();
    general.shuffle(rng);
    builder.extend(Category::General, &general);

    tracing::debug!(
        words = builder.list.len(),
        seen = builder.seen.len(),
        "Assembled wordlist"
    );
    (builder.list, builder.seen)
}

struct Builder {
    list: CombinedWordlist,
    seen: SeenSet,
}

impl Builder {
    fn extend(&mut self, category: Category, words: &[String]) {
        for word in words {
            let word = word.trim().to_lowercase();
            if word.is_empty() || !self.seen.insert(&word) {
                continue;
            }
            self.list.entries.push(Entry { word, category });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WordlistConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn s(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn overlapping_sources_keep_first_category() {
        let base = BaseBuckets::classify(["admin", "api", "configx", "env"], &[], &WordlistConfig::default());
        let disallowed = s(&["admin"]);
        let keywords = s(&["api"]);
        let priority = s(&["api", "swagger"]);
        let sources = WordlistSources {
            disallowed: &disallowed,
            keywords: &keywords,
            priority: &priority,
            priority_file: &[],
            base: &base,
        };
        let (list, seen) = assemble(sources, SeenSet::new(), &mut StdRng::seed_from_u64(7));
        let words: Vec<_> = list.words().collect();
        assert_eq!(words, vec!["admin", "api", "swagger", "configx", "env"]);
        assert_eq!(list.entries()[1].category, Category::Keyword);
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn seen_insert_reports_new_words_only() {
        let mut seen = SeenSet::new();
        assert!(seen.insert("admin"));
        assert!(!seen.insert("admin"));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn seen_set_excludes_previous_pass() {
        let base = BaseBuckets::classify(["a", "b", "c"], &[], &WordlistConfig::default());
        let mut seen = SeenSet::new();
        seen.insert("b");
        let sources = WordlistSources {
            disallowed: &[],
            keywords: &[],
            priority: &[],
            priority_file: &[],
            base: &base,
        };
        let (list, seen) = assemble(sources, seen, &mut StdRng::seed_from_u64(1));
        let mut words: Vec<_> = list.words().collect();
        words.sort();
        assert_eq!(words, vec!["a", "c"]);
        assert!(seen.contains("a") && seen.contains("b") && seen.contains("c"));
    }

    #[test]
    fn empty_sources_give_empty_list() {
        let base = BaseBuckets::default();
        let sources = WordlistSources {
            disallowed: &[],
            keywords: &[],
            priority: &[],
            priority_file: &[],
            base: &base,
        };
        let (list, seen) = assemble(sources, SeenSet::new(), &mut rand::thread_rng());
        assert!(list.is_empty());
        assert!(seen.is_empty());
    }
}
