pub mod analyze;
pub mod batch;
pub mod config;
pub mod error;
pub mod external;
pub mod fuzz;
pub mod gather;
pub mod http_client;
pub mod output;
pub mod prompt;
pub mod target;
pub mod utils;
pub mod wordlist;

pub use crate::config::Config;
pub use crate::error::WordrunnerError;
