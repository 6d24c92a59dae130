//! Output formatting module
//!
//! Provides the output formats:
//! - Plain-text report
//! - Colored terminal output
//! - JSON export

pub mod json;
pub mod report;
pub mod terminal;

pub use json::{print_json, to_json, JsonOutput};
pub use report::format_result;
pub use terminal::{print_failure, print_header, print_result};
