use std::path::PathBuf;

/// Fatal conditions that abort a run with a diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum WordrunnerError {
    #[error("wordlist file not found: {}", .0.display())]
    WordlistMissing(PathBuf),

    #[error("priority wordlist file not found: {}", .0.display())]
    PriorityWordlistMissing(PathBuf),

    #[error("larger wordlist file not found: {}", .0.display())]
    LargerWordlistMissing(PathBuf),

    #[error("URL list file not found: {}", .0.display())]
    TargetListMissing(PathBuf),

    #[error("could not resolve {0} with HTTP or HTTPS")]
    Unresolved(String),

    #[error("`{0}` not found in PATH")]
    ToolMissing(String),
}
