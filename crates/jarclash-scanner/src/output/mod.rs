//! Output formatters for scan reports

pub mod json;
pub mod log;
pub mod markdown;

pub use json::to_json;
pub use log::{append_log, to_log};
pub use markdown::to_markdown;
