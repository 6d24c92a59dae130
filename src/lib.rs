//! cert-inspector library
//!
//! Reads the TLS certificate a host presents and reports how long until it
//! expires:
//! - Inspection-only TLS connection (trust is not validated)
//! - Leaf certificate parsing
//! - Expiry status against a warning threshold
//! - Text, terminal and JSON reports
//!
//! # Usage
//!
//! ```rust,ignore
//! use cert_inspector::checks::CertificateInspector;
//! use cert_inspector::output::format_result;
//!
//! #[tokio::main]
//! async fn main() {
//!     let inspector = CertificateInspector::new("example.com", 30).unwrap();
//!     let result = inspector.check_certificate().await.unwrap();
//!     println!("{}", format_result(&result));
//! }
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use checks::CertificateInspector;
pub use cli::Cli;
pub use config::Settings;
pub use models::{CertificateCheckResult, CertificateStatus};
pub use output::format_result;
pub use utils::{ConfigError, InspectError};
