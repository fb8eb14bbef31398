use std::io::Write;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::runner::{capture_lines, require_tool};

/// Host/scheme and technology probing, backed by an external tool.
#[async_trait]
pub trait HostProber {
    /// Live URLs (with scheme) for the given hosts.
    async fn resolve(&self, hosts: &[String]) -> Result<Vec<String>>;

    /// Annotated `URL [title] [technologies]` lines for the given hosts.
    async fn detect_technologies(&self, hosts: &[String]) -> Result<Vec<String>>;
}

pub struct Httpx {
    binary: String,
}

impl Httpx {
    /// The binary is looked up on first use, so runs that never probe do not need it installed.
    pub fn new(binary: &str) -> Self {
        Self { binary: binary.to_string() }
    }

    async fn run_with_list(&self, hosts: &[String], flags: &[&str]) -> Result<Vec<String>> {
        require_tool(&self.binary)?;
        // Input list is removed when `list` drops
        let mut list = tempfile::Builder::new()
            .prefix("wordrunner-hosts-")
            .suffix(".txt")
            .tempfile()
            .context("creating host list file")?;
        for host in hosts {
            writeln!(list, "{}", host)?;
        }
        list.flush()?;

        let mut args: Vec<String> = flags.iter().map(|f| f.to_string()).collect();
        args.push("-l".to_string());
        args.push(list.path().display().to_string());
        capture_lines(&self.binary, &args).await
    }
}

#[async_trait]
impl HostProber for Httpx {
    async fn resolve(&self, hosts: &[String]) -> Result<Vec<String>> {
        self.run_with_list(hosts, &["-silent", "-nc"]).await
    }

    async fn detect_technologies(&self, hosts: &[String]) -> Result<Vec<String>> {
        self.run_with_list(hosts, &["-td", "-silent", "-nc"]).await
    }
}

/// Pick the resolved URL to scan, preferring HTTPS.
pub fn prefer_https(resolved: &[String]) -> Option<String> {
    resolved
        .iter()
        .find(|u| u.starts_with("https://"))
        .or_else(|| resolved.first())
        .cloned()
}
