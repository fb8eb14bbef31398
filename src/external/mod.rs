pub mod ffuf;
pub mod httpx;
pub mod runner;

pub use ffuf::{output_path, FfufInvocation, ScanPass};
pub use httpx::{prefer_https, HostProber, Httpx};
pub use runner::{capture_lines, require_tool, run_interruptible, run_until_interrupt, RunOutcome};
