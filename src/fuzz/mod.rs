pub mod pipeline;

pub use pipeline::{Escalation, FfufScanner, ScanSettings};
