use std::fs;
use std::path::Path;

/// Write one entry per line, replacing the file.
pub fn write_lines(path: &Path, items: &[String]) -> anyhow::Result<()> {
    let mut body = items.join("\n");
    if !items.is_empty() {
        body.push('\n');
    }
    fs::write(path, body)?;
    Ok(())
}
