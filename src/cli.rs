use std::path::PathBuf;

use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(
    author,
    version,
    about = "Prioritized-wordlist wrapper around ffuf",
    long_about = None,
    subcommand_negates_reqs = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub scan: ScanArgs,

    /// TOML file overriding built-in tuning (technology lists, extensions, priority words)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// The base URL to fuzz (scheme optional)
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// File containing URLs to fuzz, one per line
    #[arg(short = 'l', long, value_name = "FILE")]
    pub list: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Path to the small wordlist
    #[arg(short = 'w', long, default_value = "/root/tools/dirsearch/db/dicc.txt")]
    pub wordlist: PathBuf,

    /// Path to the larger wordlist
    #[arg(
        short = 'W',
        long,
        default_value = "/usr/share/seclists/Discovery/Web-Content/raft-medium-words-lowercase.txt"
    )]
    pub larger_wordlist: PathBuf,

    /// Small priority wordlist scanned before the normal wordlist
    #[arg(long, value_name = "FILE")]
    pub priority_wordlist: Option<PathBuf>,

    /// Perform both the short and the longer scan
    #[arg(long, default_value_t = false)]
    pub long_test: bool,

    /// Start the longer scan after a countdown unless a key is pressed
    #[arg(long, default_value_t = false, conflicts_with = "long_test")]
    pub countdown: bool,

    /// Scan list targets in file order instead of shuffling them
    #[arg(long, default_value_t = false)]
    pub keep_order: bool,

    /// Directory for ffuf JSON output and side files
    #[arg(short = 'o', long, default_value = ".")]
    pub out: PathBuf,

    /// Extra arguments passed to ffuf verbatim (after `--`)
    #[arg(last = true, allow_hyphen_values = true)]
    pub engine_args: Vec<String>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print results from ffuf JSON output files (glob patterns accepted)
    Report {
        #[arg(required = true)]
        files: Vec<String>,
    },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_and_engine_args() {
        let cli = Cli::try_parse_from(["wordrunner", "-u", "example.com", "--long-test", "--", "-t", "50", "-mc", "all"]).unwrap();
        assert_eq!(cli.scan.target.url.as_deref(), Some("example.com"));
        assert!(cli.scan.long_test);
        assert_eq!(cli.scan.engine_args, vec!["-t", "50", "-mc", "all"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn url_and_list_conflict() {
        assert!(Cli::try_parse_from(["wordrunner", "-u", "a.com", "-l", "urls.txt"]).is_err());
    }

    #[test]
    fn target_required() {
        assert!(Cli::try_parse_from(["wordrunner", "-w", "words.txt"]).is_err());
    }

    #[test]
    fn escalation_flags_conflict() {
        assert!(Cli::try_parse_from(["wordrunner", "-u", "a.com", "--long-test", "--countdown"]).is_err());
    }

    #[test]
    fn report_needs_no_target() {
        let cli = Cli::try_parse_from(["wordrunner", "report", "*.json"]).unwrap();
        match cli.command {
            Some(Commands::Report { files }) => assert_eq!(files, vec!["*.json"]),
            None => panic!("expected report subcommand"),
        }
    }
}
