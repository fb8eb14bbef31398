use std::io::Cursor;
use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wordrunner::analyze::TechPolicy;
use wordrunner::batch::{plan_targets, write_excluded, BatchController, ScanOutcome, TargetScanner, TargetState};
use wordrunner::config::BatchConfig;
use wordrunner::external::{HostProber, Httpx};

/// Probe double returning canned httpx lines for both probe modes.
struct CannedProbe {
    resolved: Vec<String>,
    annotated: Vec<String>,
}

#[async_trait]
impl HostProber for CannedProbe {
    async fn resolve(&self, _hosts: &[String]) -> Result<Vec<String>> {
        Ok(self.resolved.clone())
    }

    async fn detect_technologies(&self, _hosts: &[String]) -> Result<Vec<String>> {
        Ok(self.annotated.clone())
    }
}

fn no_probe() -> CannedProbe {
    CannedProbe { resolved: Vec::new(), annotated: Vec::new() }
}

/// Scanner double: interrupts on the listed URLs, completes everything else.
#[derive(Default)]
struct ScriptedScanner {
    interrupt_on: Vec<String>,
    calls: Vec<(String, bool)>,
}

#[async_trait]
impl TargetScanner for ScriptedScanner {
    async fn scan(&mut self, url: &str, stop_on_errors: bool) -> Result<ScanOutcome> {
        self.calls.push((url.to_string(), stop_on_errors));
        if self.interrupt_on.iter().any(|u| u == url) {
            return Ok(ScanOutcome::Interrupted);
        }
        Ok(ScanOutcome::Completed { findings: vec![PathBuf::from(format!("{}.json", url.len()))] })
    }
}

fn urls(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn list_is_partitioned_by_technology() {
    let prober = CannedProbe {
        resolved: Vec::new(),
        annotated: urls(&[
            "https://a.com [Home] [Nginx]",
            "https://b.com [Shop] [PHP:8.1,Apache]",
            "https://c.com [Edge] [Cloudflare]",
            "http://d.com",
            "https://e.com [Portal] [Bootstrap]",
            "https://f.com [Blog] [jQuery]",
        ]),
    };
    let policy = TechPolicy::from_config(&BatchConfig::default());
    let list = urls(&["a.com", "b.com", "c.com", "d.com", "e.com", "f.com"]);

    let plan = plan_targets(list, &prober, &policy, false, &mut StdRng::seed_from_u64(1)).await.unwrap();
    assert_eq!(plan.excluded, vec!["https://c.com"]);
    assert_eq!(
        plan.ordered,
        vec!["https://b.com", "https://a.com", "http://d.com", "https://e.com", "https://f.com"]
    );

    let dir = tempfile::tempdir().unwrap();
    let written = write_excluded(dir.path(), &BatchConfig::default(), &plan.excluded).unwrap().unwrap();
    assert_eq!(written, dir.path().join("unprocessed.txt"));
    assert_eq!(std::fs::read_to_string(written).unwrap(), "https://c.com\n");
}

#[tokio::test]
async fn list_with_schemes_skips_probe() {
    // A probe that would exclude everything must never be consulted
    let prober = CannedProbe { resolved: Vec::new(), annotated: urls(&["https://x.com [cloudflare]"]) };
    let policy = TechPolicy::from_config(&BatchConfig::default());
    let list = urls(&["https://a.com", " http://b.com ", ""]);
    let plan = plan_targets(list, &prober, &policy, false, &mut StdRng::seed_from_u64(1)).await.unwrap();
    assert_eq!(plan.ordered, vec!["https://a.com", "http://b.com"]);
    assert!(plan.excluded.is_empty());
}

#[tokio::test]
async fn list_with_schemes_needs_no_probe_binary() {
    let prober = Httpx::new("definitely-not-httpx-xyz");
    let policy = TechPolicy::from_config(&BatchConfig::default());
    let list = urls(&["https://a.com", "http://b.com"]);
    let plan = plan_targets(list, &prober, &policy, false, &mut StdRng::seed_from_u64(1)).await.unwrap();
    assert_eq!(plan.ordered, vec!["https://a.com", "http://b.com"]);
}

#[tokio::test]
async fn scheme_less_list_requires_probe_binary() {
    let prober = Httpx::new("definitely-not-httpx-xyz");
    let policy = TechPolicy::from_config(&BatchConfig::default());
    let list = urls(&["https://a.com", "b.com"]);
    let err = plan_targets(list, &prober, &policy, false, &mut StdRng::seed_from_u64(1)).await.unwrap_err();
    assert!(err.to_string().contains("definitely-not-httpx-xyz"));
}

#[tokio::test]
async fn shuffled_list_keeps_every_target() {
    let policy = TechPolicy::from_config(&BatchConfig::default());
    let list = urls(&["https://a.com", "https://b.com", "https://c.com", "https://d.com"]);
    let plan = plan_targets(list.clone(), &no_probe(), &policy, true, &mut StdRng::seed_from_u64(7)).await.unwrap();
    let mut got = plan.ordered.clone();
    got.sort();
    assert_eq!(got, list);
}

#[tokio::test]
async fn declining_after_interrupt_stops_the_batch() {
    let scanner = ScriptedScanner { interrupt_on: urls(&["https://a.com"]), ..Default::default() };
    let mut out = Vec::new();
    let mut controller = BatchController::new(scanner, no_probe(), Cursor::new("n\n"), &mut out);
    let targets = urls(&["https://a.com", "https://b.com", "https://c.com"]);

    let report = controller.run(&targets, true).await.unwrap();
    assert!(report.aborted);
    assert_eq!(report.scanned(), 1);
    assert_eq!(report.targets[0].state, TargetState::Aborted);
    assert!(report.targets[0].interrupted);
    assert_eq!(report.targets[1].state, TargetState::Pending);
    assert_eq!(report.targets[2].state, TargetState::Pending);

    let scanner = controller.into_scanner();
    assert_eq!(scanner.calls, vec![("https://a.com".to_string(), true)]);
    assert!(String::from_utf8(out).unwrap().contains("continue with the next URL"));
}

#[tokio::test]
async fn confirming_after_interrupt_moves_on() {
    let scanner = ScriptedScanner { interrupt_on: urls(&["https://a.com"]), ..Default::default() };
    let mut controller = BatchController::new(scanner, no_probe(), Cursor::new("Y\n"), Vec::new());
    let targets = urls(&["https://a.com", "https://b.com"]);

    let report = controller.run(&targets, false).await.unwrap();
    assert!(!report.aborted);
    assert_eq!(report.scanned(), 2);
    assert!(report.targets[0].interrupted);
    assert!(report.targets[0].findings.is_empty());
    assert_eq!(report.targets[1].state, TargetState::Done);
    assert_eq!(report.targets[1].findings.len(), 1);
}

#[tokio::test]
async fn interrupting_the_last_target_does_not_prompt() {
    let scanner = ScriptedScanner { interrupt_on: urls(&["https://b.com"]), ..Default::default() };
    let mut out = Vec::new();
    // Empty input would read as "no" if a prompt were shown
    let mut controller = BatchController::new(scanner, no_probe(), Cursor::new(""), &mut out);
    let report = controller.run(&urls(&["https://a.com", "https://b.com"]), false).await.unwrap();
    drop(controller);
    assert!(!report.aborted);
    assert!(report.targets.iter().all(|t| t.state == TargetState::Done));
    assert!(out.is_empty());
}

#[tokio::test]
async fn scheme_less_target_is_resolved_before_scanning() {
    let prober = CannedProbe {
        resolved: urls(&["http://shop.example.com", "https://shop.example.com"]),
        annotated: Vec::new(),
    };
    let mut controller = BatchController::new(ScriptedScanner::default(), prober, Cursor::new(""), Vec::new());
    let report = controller.run(&urls(&["shop.example.com"]), false).await.unwrap();
    assert_eq!(report.targets[0].url, "https://shop.example.com");
    assert_eq!(report.targets[0].state, TargetState::Done);
    assert_eq!(controller.into_scanner().calls[0].0, "https://shop.example.com");
}

#[tokio::test]
async fn unresolvable_target_fails_the_run() {
    let mut controller = BatchController::new(ScriptedScanner::default(), no_probe(), Cursor::new(""), Vec::new());
    let err = controller.run(&urls(&["nothing.invalid"]), false).await.unwrap_err();
    assert!(err.to_string().contains("nothing.invalid"));
    assert!(controller.into_scanner().calls.is_empty());
}
