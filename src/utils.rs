use std::fs;
use std::io;
use std::path::Path;

pub fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Non-empty trimmed lines of a file. Invalid UTF-8 is replaced rather than rejected.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let data = fs::read(path)?;
    Ok(String::from_utf8_lossy(&data)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Like [`read_lines`] but lowercased, for wordlists.
pub fn read_words(path: &Path) -> io::Result<Vec<String>> {
    Ok(read_lines(path)?.into_iter().map(|w| w.to_lowercase()).collect())
}
