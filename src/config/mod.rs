//! Configuration module for cert-inspector
//!
//! Handles loading and managing configuration from TOML files.

pub mod settings;

pub use settings::{BatchSettings, InspectorSettings, Settings};
