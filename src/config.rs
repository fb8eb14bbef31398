use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Runtime tuning. Every field has a default so a partial TOML file is enough.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Timeout for the robots.txt fetch, in seconds
    pub robots_timeout_secs: u64,
    /// Length of the countdown before a prompt-gated larger scan
    pub countdown_secs: u64,
    pub engine: EngineConfig,
    pub probe: ProbeConfig,
    pub wordlist: WordlistConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub binary: String,
    /// Extensions passed to the engine with `-e` and dropped from the base wordlist
    pub extensions: Vec<String>,
    pub recursion_depth: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub binary: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WordlistConfig {
    pub archive_extensions: Vec<String>,
    pub priority_words: Vec<String>,
    pub config_prefix: String,
    pub env_words: Vec<String>,
    /// Larger pass skips words the first pass already queued
    pub skip_already_scanned: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub exclude_technologies: Vec<String>,
    pub priority_technologies: Vec<String>,
    /// Batches larger than this get `-se` on the first pass
    pub stop_on_error_threshold: usize,
    pub unprocessed_file: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            robots_timeout_secs: 5,
            countdown_secs: 5,
            engine: EngineConfig::default(),
            probe: ProbeConfig::default(),
            wordlist: WordlistConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: "ffuf".to_string(),
            extensions: strings(&[".php", ".aspx", ".jsp", ".html", ".js", ".json"]),
            recursion_depth: 1,
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { binary: "httpx".to_string() }
    }
}

impl Default for WordlistConfig {
    fn default() -> Self {
        Self {
            archive_extensions: strings(&[".zip", ".tar.gz", ".7z"]),
            priority_words: strings(&[
                "wp-backup.sh",
                "submit.sh",
                "stage-deploy.sh",
                "scripts/driverenv.sh",
                "s3.sh",
                "run-deploy.sh",
                "passwords.sh",
                "m/index.php",
                "library.sh",
                "installer.sh",
                "envvars.sh",
                "driverenv.sh",
                "driver.sh",
                "docker/startup.sh",
                "develop.sh",
                "bucket.sh",
                "aws_cli.sh",
                "aws-env.sh",
                "swagger.json",
                "swagger.yaml",
                "swagger-ui",
                "api-docs",
                "v2/api-docs",
                "v3/api-docs",
                "api",
                "services",
                "swagger",
                "swagger/v1/swagger.json",
            ]),
            config_prefix: "config".to_string(),
            env_words: strings(&["env", ".env"]),
            skip_already_scanned: true,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            exclude_technologies: strings(&["vpn", "checkpoint", "imperva", "cloudflare", "cisco"]),
            priority_technologies: strings(&["php", "tomcat", "iis:8.5"]),
            stop_on_error_threshold: 5,
            unprocessed_file: "unprocessed.txt".to_string(),
        }
    }
}

impl Config {
    /// Load from a TOML file, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            countdown_secs = 3
            [batch]
            priority_technologies = ["php", "jboss"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.countdown_secs, 3);
        assert_eq!(cfg.robots_timeout_secs, 5);
        assert_eq!(cfg.batch.priority_technologies, vec!["php", "jboss"]);
        assert_eq!(cfg.batch.stop_on_error_threshold, 5);
        assert_eq!(cfg.engine.binary, "ffuf");
    }

    #[test]
    fn missing_path_gives_defaults() {
        let cfg = Config::load(None).unwrap();
        assert_eq!(cfg.wordlist.priority_words.len(), 28);
        assert!(cfg.wordlist.skip_already_scanned);
    }
}
