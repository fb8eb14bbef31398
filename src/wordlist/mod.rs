pub mod assembler;
pub mod sources;

pub use assembler::{assemble, Category, CombinedWordlist, Entry, SeenSet, WordlistSources};
pub use sources::{builtin_priority_words, load_base_words, load_priority_file, BaseBuckets};
