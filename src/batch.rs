//! Drives the scan pipeline over one URL or a list of URLs.
//!
//! Per target: `Pending -> Resolving (scheme-less only) -> Scanning -> Done`.
//! An interrupted scan asks the operator whether to go on to the next target;
//! anything but `y` marks the current target `Aborted` and stops the batch.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::analyze::{partition, TechPolicy};
use crate::config::BatchConfig;
use crate::error::WordrunnerError;
use crate::external::{prefer_https, HostProber};
use crate::output::write_lines;
use crate::prompt::confirm_continue;
use crate::target::has_scheme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed { findings: Vec<PathBuf> },
    /// Operator interrupted the engine; not an error
    Interrupted,
}

/// Runs the full per-target pipeline.
#[async_trait]
pub trait TargetScanner {
    async fn scan(&mut self, url: &str, stop_on_errors: bool) -> Result<ScanOutcome>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Pending,
    Resolving,
    Scanning,
    Done,
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetStatus {
    pub url: String,
    pub state: TargetState,
    pub interrupted: bool,
    pub findings: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub targets: Vec<TargetStatus>,
    pub aborted: bool,
}

impl BatchReport {
    pub fn scanned(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| matches!(t.state, TargetState::Done | TargetState::Aborted))
            .count()
    }
}

/// Scan order for a target list plus the hosts left out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetPlan {
    pub ordered: Vec<String>,
    pub excluded: Vec<String>,
}

/// Resolve a scheme-less single target to a live URL, preferring HTTPS.
pub async fn resolve_single<P: HostProber + ?Sized>(prober: &P, url: &str) -> Result<String> {
    let url = url.trim();
    if has_scheme(url) {
        return Ok(url.to_string());
    }
    println!("[*] Testing both HTTP and HTTPS for {} using the probe tool...", url);
    let resolved = prober.resolve(&[url.to_string()]).await?;
    prefer_https(&resolved).ok_or_else(|| WordrunnerError::Unresolved(url.to_string()).into())
}

/// Read, optionally shuffle, and (when any entry lacks a scheme) probe and partition a target list.
pub async fn plan_targets<P, R>(
    urls: Vec<String>,
    prober: &P,
    policy: &TechPolicy,
    shuffle: bool,
    rng: &mut R,
) -> Result<TargetPlan>
where
    P: HostProber + ?Sized,
    R: Rng + ?Sized,
{
    let mut urls: Vec<String> = urls.into_iter().map(|u| u.trim().to_string()).filter(|u| !u.is_empty()).collect();
    if shuffle {
        urls.shuffle(rng);
    }
    if urls.iter().all(|u| has_scheme(u)) {
        return Ok(TargetPlan { ordered: urls, excluded: Vec::new() });
    }

    println!("[*] Resolving URLs without scheme and detecting technologies...");
    let lines = prober.detect_technologies(&urls).await?;
    let split = partition(&lines, policy);
    tracing::info!(
        excluded = split.excluded.len(),
        priority = split.priority.len(),
        other = split.other.len(),
        "Partitioned targets"
    );
    Ok(TargetPlan { ordered: split.scan_order(), excluded: split.excluded })
}

/// Record excluded hosts for operator review.
pub fn write_excluded(out_dir: &Path, cfg: &BatchConfig, excluded: &[String]) -> Result<Option<PathBuf>> {
    if excluded.is_empty() {
        return Ok(None);
    }
    let path = out_dir.join(&cfg.unprocessed_file);
    write_lines(&path, excluded)?;
    println!("[*] Excluded URLs saved to {}", path.display());
    Ok(Some(path))
}

/// Whether the batch is large enough to ask the engine to stop on spurious errors.
pub fn stop_on_errors(target_count: usize, cfg: &BatchConfig) -> bool {
    target_count > cfg.stop_on_error_threshold
}

pub struct BatchController<S, P, R, W> {
    scanner: S,
    prober: P,
    input: R,
    output: W,
}

impl<S, P, R, W> BatchController<S, P, R, W>
where
    S: TargetScanner,
    P: HostProber,
    R: BufRead,
    W: Write,
{
    pub fn new(scanner: S, prober: P, input: R, output: W) -> Self {
        Self { scanner, prober, input, output }
    }

    pub fn into_scanner(self) -> S {
        self.scanner
    }

    /// Scan targets in order. Scheme-less targets are resolved first; an unresolvable one is fatal.
    /// After an interrupt the operator is asked whether to go on, unless nothing is left to scan.
    pub async fn run(&mut self, urls: &[String], stop_on_errors: bool) -> Result<BatchReport> {
        let mut targets: Vec<TargetStatus> = urls
            .iter()
            .map(|url| TargetStatus {
                url: url.clone(),
                state: TargetState::Pending,
                interrupted: false,
                findings: Vec::new(),
            })
            .collect();

        let last = targets.len().saturating_sub(1);
        for idx in 0..targets.len() {
            if !has_scheme(&targets[idx].url) {
                targets[idx].state = TargetState::Resolving;
                targets[idx].url = resolve_single(&self.prober, &targets[idx].url).await?;
            }

            targets[idx].state = TargetState::Scanning;
            let outcome = self.scanner.scan(&targets[idx].url, stop_on_errors).await?;
            match outcome {
                ScanOutcome::Completed { findings } => {
                    targets[idx].findings = findings;
                    targets[idx].state = TargetState::Done;
                }
                ScanOutcome::Interrupted => {
                    targets[idx].interrupted = true;
                    targets[idx].state = TargetState::Done;
                    if idx == last || confirm_continue(&mut self.input, &mut self.output)? {
                        continue;
                    }
                    targets[idx].state = TargetState::Aborted;
                    tracing::info!(url = %targets[idx].url, "Batch aborted by operator");
                    return Ok(BatchReport { targets, aborted: true });
                }
            }
        }
        Ok(BatchReport { targets, aborted: false })
    }
}
