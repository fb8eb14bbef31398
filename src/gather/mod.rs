pub mod keywords;
pub mod robots;

pub use keywords::host_keywords;
pub use robots::{fetch_disallowed, parse_disallowed};
