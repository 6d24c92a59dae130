//! Utility modules for cert-inspector
//!
//! This module contains the error types shared across the crate.

pub mod error;

pub use error::{ConfigError, InspectError};
