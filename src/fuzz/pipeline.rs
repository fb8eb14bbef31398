use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::batch::{ScanOutcome, TargetScanner};
use crate::config::Config;
use crate::error::WordrunnerError;
use crate::external::{output_path, require_tool, run_interruptible, FfufInvocation, RunOutcome, ScanPass};
use crate::gather::{fetch_disallowed, host_keywords};
use crate::http_client::create_probe_client;
use crate::output::report_files;
use crate::prompt::{self, Countdown};
use crate::target::Target;
use crate::wordlist::{
    assemble, builtin_priority_words, load_base_words, load_priority_file, BaseBuckets, CombinedWordlist, SeenSet,
    WordlistSources,
};

/// When to follow the first pass with the larger wordlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    Skip,
    /// `--long-test`
    Always,
    /// `--countdown`: run unless a key is pressed before the timer runs out
    Countdown { secs: u64 },
}

#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub wordlist: PathBuf,
    pub larger_wordlist: PathBuf,
    pub priority_wordlist: Option<PathBuf>,
    pub escalation: Escalation,
    pub out_dir: PathBuf,
    pub engine_args: Vec<String>,
}

enum PassResult {
    Completed(Option<PathBuf>),
    Interrupted,
}

/// Per-target pipeline: robots + keywords + wordlists, then ffuf.
pub struct FfufScanner {
    config: Config,
    settings: ScanSettings,
    client: Client,
    priority: Vec<String>,
    priority_file: Vec<String>,
    base_words: Vec<String>,
    larger_words: Option<Vec<String>>,
}

impl FfufScanner {
    /// Validates the engine binary and every wordlist the run is certain to need.
    pub fn new(config: Config, settings: ScanSettings) -> Result<Self> {
        require_tool(&config.engine.binary)?;
        let client = create_probe_client(config.robots_timeout_secs)?;
        let priority = builtin_priority_words(&config.wordlist);
        let priority_file = match &settings.priority_wordlist {
            Some(path) => load_priority_file(path)?,
            None => Vec::new(),
        };
        let base_words = load_base_words(&settings.wordlist, WordrunnerError::WordlistMissing)?;
        let larger_words = match settings.escalation {
            Escalation::Always => Some(load_base_words(&settings.larger_wordlist, WordrunnerError::LargerWordlistMissing)?),
            _ => None,
        };
        crate::utils::ensure_dir(&settings.out_dir)?;
        Ok(Self { config, settings, client, priority, priority_file, base_words, larger_words })
    }

    fn load_larger(&mut self) -> Result<()> {
        if self.larger_words.is_none() {
            self.larger_words = Some(load_base_words(
                &self.settings.larger_wordlist,
                WordrunnerError::LargerWordlistMissing,
            )?);
        }
        Ok(())
    }

    async fn should_escalate(&self) -> Result<bool> {
        match self.settings.escalation {
            Escalation::Skip => {
                println!("[*] Skipping longer scan. Use --long-test to perform both scans.");
                Ok(false)
            }
            Escalation::Always => Ok(true),
            Escalation::Countdown { secs } => {
                let outcome = tokio::task::spawn_blocking(move || {
                    prompt::countdown(secs, "Larger scan starts soon, press any key to skip")
                })
                .await??;
                match outcome {
                    Countdown::KeyPressed => {
                        println!("[*] Larger scan skipped.");
                        Ok(false)
                    }
                    Countdown::Elapsed => Ok(true),
                }
            }
        }
    }

    async fn run_pass(
        &self,
        target: &Target,
        list: &CombinedWordlist,
        pass: ScanPass,
        stop_on_errors: bool,
    ) -> Result<PassResult> {
        // Deleted when dropped, on every return path
        let mut scratch = tempfile::Builder::new()
            .prefix("wordrunner-")
            .suffix(".txt")
            .tempfile()
            .context("creating scratch wordlist")?;
        {
            let mut w = BufWriter::new(scratch.as_file_mut());
            for word in list.words() {
                writeln!(w, "{}", word)?;
            }
            w.flush()?;
        }

        let date = chrono::Local::now().format("%Y%m%d").to_string();
        let output = output_path(&self.settings.out_dir, target, &date, pass);
        let args = FfufInvocation {
            engine: &self.config.engine,
            target,
            wordlist: scratch.path(),
            output: &output,
            pass,
            stop_on_errors,
            extra_args: &self.settings.engine_args,
        }
        .args();

        tracing::info!(target = %target.url(), words = list.len(), pass = pass.label(), "Starting ffuf");
        let outcome = run_interruptible(&self.config.engine.binary, &args).await?;
        drop(scratch);

        match outcome {
            RunOutcome::Interrupted => {
                println!("\n[!] {} interrupted.", pass.label());
                Ok(PassResult::Interrupted)
            }
            RunOutcome::Exited(status) => {
                if !status.success() {
                    tracing::warn!(status = ?status, "ffuf exited unsuccessfully");
                }
                if !output.is_file() {
                    println!("[*] No findings from {} of {}", pass.label(), target.url());
                    return Ok(PassResult::Completed(None));
                }
                println!("[+] Findings saved to {}", output.display());
                let stdout = std::io::stdout();
                report_files(std::slice::from_ref(&output), &mut stdout.lock())?;
                Ok(PassResult::Completed(Some(output)))
            }
        }
    }

    pub async fn scan_target(&mut self, url: &str, stop_on_errors: bool) -> Result<ScanOutcome> {
        let target = Target::new(url);
        println!("\n[>] Target: {}", target.url());

        let disallowed = fetch_disallowed(&self.client, &target).await;
        if !disallowed.is_empty() {
            println!("[*] The following paths were found in robots.txt for {} and will be included in the scan:", target.url());
            for path in &disallowed {
                println!("    - {}", path);
            }
        }
        let keywords: Vec<String> = host_keywords(target.host(), &self.config.wordlist.archive_extensions)
            .into_iter()
            .collect();
        if !keywords.is_empty() {
            println!("[*] The following keywords were extracted from the domain {} and will be included in the scan:", target.netloc());
            for keyword in &keywords {
                println!("    - {}", keyword);
            }
        }

        let excluded = &self.config.engine.extensions;
        let base = BaseBuckets::classify(&self.base_words, excluded, &self.config.wordlist);
        let (list, seen) = assemble(
            WordlistSources {
                disallowed: &disallowed,
                keywords: &keywords,
                priority: &self.priority,
                priority_file: &self.priority_file,
                base: &base,
            },
            SeenSet::new(),
            &mut rand::thread_rng(),
        );

        let mut findings = Vec::new();
        match self.run_pass(&target, &list, ScanPass::Initial, stop_on_errors).await? {
            PassResult::Interrupted => return Ok(ScanOutcome::Interrupted),
            PassResult::Completed(found) => findings.extend(found),
        }

        if !self.should_escalate().await? {
            return Ok(ScanOutcome::Completed { findings });
        }
        println!("\n[*] Starting longer scan with larger wordlist...");
        self.load_larger()?;

        let larger = BaseBuckets::classify(
            self.larger_words.as_deref().unwrap_or_default(),
            &self.config.engine.extensions,
            &self.config.wordlist,
        );
        let seen = if self.config.wordlist.skip_already_scanned { seen } else { SeenSet::new() };
        let (larger_list, _) = assemble(
            WordlistSources {
                disallowed: &disallowed,
                keywords: &keywords,
                priority: &self.priority,
                priority_file: &self.priority_file,
                base: &larger,
            },
            seen,
            &mut rand::thread_rng(),
        );

        match self.run_pass(&target, &larger_list, ScanPass::Larger, false).await? {
            PassResult::Interrupted => Ok(ScanOutcome::Interrupted),
            PassResult::Completed(found) => {
                findings.extend(found);
                Ok(ScanOutcome::Completed { findings })
            }
        }
    }
}

#[async_trait]
impl TargetScanner for FfufScanner {
    async fn scan(&mut self, url: &str, stop_on_errors: bool) -> Result<ScanOutcome> {
        self.scan_target(url, stop_on_errors).await
    }
}
