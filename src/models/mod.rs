//! Data models for cert-inspector
//!
//! This module contains the data structures produced by an inspection.

pub mod check_result;

pub use check_result::{days_between, CertificateCheckResult, CertificateDetails, CertificateStatus};
