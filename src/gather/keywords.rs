use std::collections::BTreeSet;

/// Derive scan keywords from a hostname: every non-empty label, lowercased,
/// plus one archive variant per extension (`example`, `example.zip`, ...).
pub fn host_keywords(host: &str, archive_extensions: &[String]) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for label in host.split('.').filter(|l| !l.is_empty()) {
        let label = label.to_lowercase();
        for ext in archive_extensions {
            out.insert(format!("{}{}", label, ext));
        }
        out.insert(label);
    }
    out
}
