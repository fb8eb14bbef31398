pub mod report;
pub mod writer_txt;

pub use report::{report_files, run_report, FfufOutput, FfufResult};
pub use writer_txt::write_lines;
