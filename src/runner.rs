use std::io::BufReader;

use anyhow::Result;

use crate::cli::{Cli, Commands, ScanArgs};
use wordrunner::analyze::TechPolicy;
use wordrunner::batch::{self, BatchController};
use wordrunner::external::Httpx;
use wordrunner::fuzz::{Escalation, FfufScanner, ScanSettings};
use wordrunner::utils::read_lines;
use wordrunner::{Config, WordrunnerError};

pub async fn run_from_cli(cli: Cli) -> Result<()> {
    // Configure logging based on global flags.
    // Keep external crates (reqwest/hyper) at INFO to avoid flooding the CLI.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    let filter_str = format!("wordrunner={crate},reqwest=info,hyper=info,rustls=warn", crate = crate_level);
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(true)
        .with_target(false)
        .init();

    if let Some(Commands::Report { files }) = cli.command {
        return wordrunner::output::run_report(&files);
    }

    let config = Config::load(cli.config.as_deref())?;
    run_scan(cli.scan, config).await
}

fn settings_from_args(args: &ScanArgs, config: &Config) -> ScanSettings {
    let escalation = if args.long_test {
        Escalation::Always
    } else if args.countdown {
        Escalation::Countdown { secs: config.countdown_secs }
    } else {
        Escalation::Skip
    };
    ScanSettings {
        wordlist: args.wordlist.clone(),
        larger_wordlist: args.larger_wordlist.clone(),
        priority_wordlist: args.priority_wordlist.clone(),
        escalation,
        out_dir: args.out.clone(),
        engine_args: args.engine_args.clone(),
    }
}

async fn run_scan(args: ScanArgs, config: Config) -> Result<()> {
    let settings = settings_from_args(&args, &config);
    tracing::info!(
        wordlist = %settings.wordlist.display(),
        escalation = ?settings.escalation,
        out = %settings.out_dir.display(),
        "Starting wordrunner"
    );

    let prober = Httpx::new(&config.probe.binary);
    let (urls, stop_on_errors) = match (&args.target.url, &args.target.list) {
        (Some(url), _) => (vec![url.trim().to_string()], false),
        (None, Some(list)) => {
            let urls = read_lines(list).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => WordrunnerError::TargetListMissing(list.clone()).into(),
                _ => anyhow::Error::new(e),
            })?;
            let policy = TechPolicy::from_config(&config.batch);
            let plan = batch::plan_targets(urls, &prober, &policy, !args.keep_order, &mut rand::thread_rng()).await?;
            batch::write_excluded(&args.out, &config.batch, &plan.excluded)?;
            let stop = batch::stop_on_errors(plan.ordered.len(), &config.batch);
            (plan.ordered, stop)
        }
        (None, None) => unreachable!("clap requires -u or -l"),
    };

    if urls.is_empty() {
        println!("[!] No targets to scan");
        return Ok(());
    }

    let scanner = FfufScanner::new(config.clone(), settings)?;
    let mut controller = BatchController::new(scanner, prober, BufReader::new(std::io::stdin()), std::io::stdout());
    let report = controller.run(&urls, stop_on_errors).await?;

    let findings: usize = report.targets.iter().map(|t| t.findings.len()).sum();
    if report.aborted {
        println!("[*] Stopped after {} of {} target(s)", report.scanned(), report.targets.len());
    } else {
        println!("\n[+] Done: {} target(s), {} result file(s)", report.targets.len(), findings);
    }
    Ok(())
}
