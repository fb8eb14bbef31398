use std::path::{Path, PathBuf};

use crate::config::EngineConfig;
use crate::target::Target;

/// Which of the two scan passes an invocation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPass {
    /// Small wordlist plus explicit extensions
    Initial,
    /// Larger wordlist with auto-calibration
    Larger,
}

impl ScanPass {
    pub fn label(&self) -> &'static str {
        match self {
            ScanPass::Initial => "scan",
            ScanPass::Larger => "longer scan",
        }
    }
}

/// `<out>/<host>_<YYYYMMDD>.json`, or `..._larger.json` for the second pass.
pub fn output_path(out_dir: &Path, target: &Target, date: &str, pass: ScanPass) -> PathBuf {
    let suffix = match pass {
        ScanPass::Initial => "",
        ScanPass::Larger => "_larger",
    };
    out_dir.join(format!("{}_{}{}.json", target.file_stem(), date, suffix))
}

/// One ffuf command line.
#[derive(Debug, Clone)]
pub struct FfufInvocation<'a> {
    pub engine: &'a EngineConfig,
    pub target: &'a Target,
    pub wordlist: &'a Path,
    pub output: &'a Path,
    pub pass: ScanPass,
    pub stop_on_errors: bool,
    pub extra_args: &'a [String],
}

impl FfufInvocation<'_> {
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "-w".to_string(),
            self.wordlist.display().to_string(),
            "-u".to_string(),
            self.target.fuzz_url(),
            "-c".to_string(),
            "-recursion".to_string(),
            "-recursion-depth".to_string(),
            self.engine.recursion_depth.to_string(),
        ];
        match self.pass {
            ScanPass::Initial => {
                args.push("-e".to_string());
                args.push(self.engine.extensions.join(","));
                if self.stop_on_errors {
                    args.push("-se".to_string());
                }
            }
            ScanPass::Larger => args.push("-ac".to_string()),
        }
        args.extend([
            "-o".to_string(),
            self.output.display().to_string(),
            "-of".to_string(),
            "json".to_string(),
            "-or".to_string(),
        ]);
        // Caller arguments last so they can override the defaults
        args.extend(self.extra_args.iter().cloned());
        args
    }
}
