//! Custom error types for cert-inspector
//!
//! Every failure an inspection can hit is a distinct variant carrying the
//! domain it happened on, so callers can pick their own retry or alerting
//! policy. Nothing here is retried internally.

use thiserror::Error;

/// Failures of a single certificate inspection
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Connection to {domain} failed: {source}")]
    Connection {
        domain: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No usable certificate from {domain}: {reason}")]
    CertificateUnavailable { domain: String, reason: String },

    #[error("Connection to {domain} timed out after {seconds}s")]
    Timeout { domain: String, seconds: u64 },

    #[error("Inspection of {domain} was cancelled")]
    Cancelled { domain: String },

    #[error("Invalid domain '{domain}': {reason}")]
    InvalidDomain { domain: String, reason: String },

    #[error("TLS configuration error: {message}")]
    Configuration { message: String },
}

impl InspectError {
    /// Short, stable name of the failure kind for reports and JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            InspectError::Connection { .. } => "connection_error",
            InspectError::CertificateUnavailable { .. } => "certificate_unavailable",
            InspectError::Timeout { .. } => "timeout",
            InspectError::Cancelled { .. } => "cancelled",
            InspectError::InvalidDomain { .. } => "invalid_domain",
            InspectError::Configuration { .. } => "configuration_error",
        }
    }

    /// The domain the failure happened on, if it is tied to one
    pub fn domain(&self) -> Option<&str> {
        match self {
            InspectError::Connection { domain, .. }
            | InspectError::CertificateUnavailable { domain, .. }
            | InspectError::Timeout { domain, .. }
            | InspectError::Cancelled { domain }
            | InspectError::InvalidDomain { domain, .. } => Some(domain),
            InspectError::Configuration { .. } => None,
        }
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
