use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;

use crate::target::Target;

static DISALLOW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^disallow:(.*)$").expect("valid disallow regex"));

/// Fetch `<url>/robots.txt` and return its disallowed paths.
/// Any failure (transport or non-2xx) yields an empty list.
pub async fn fetch_disallowed(client: &Client, target: &Target) -> Vec<String> {
    let robots_url = target.robots_url();
    let resp = match client.get(&robots_url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(url = %robots_url, error = %e, "robots.txt fetch failed");
            return vec![];
        }
    };
    if !resp.status().is_success() {
        tracing::debug!(url = %robots_url, status = resp.status().as_u16(), "robots.txt not available");
        return vec![];
    }
    match resp.text().await {
        Ok(body) => parse_disallowed(&body),
        Err(e) => {
            tracing::debug!(url = %robots_url, error = %e, "robots.txt body unreadable");
            vec![]
        }
    }
}

/// Extract `Disallow:` paths in document order, lowercased, without comments or a leading slash.
pub fn parse_disallowed(body: &str) -> Vec<String> {
    body.lines()
        .filter_map(|line| {
            let caps = DISALLOW_RE.captures(line.trim())?;
            let value = caps.get(1)?.as_str();
            let value = value.split('#').next().unwrap_or_default().trim();
            let path = value.strip_prefix('/').unwrap_or(value).to_lowercase();
            (!path.is_empty()).then_some(path)
        })
        .collect()
}
