//! CLI argument definitions using clap

use crate::config::Settings;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cert-inspector")]
#[command(version)]
#[command(about = "Inspect the TLS certificate a host presents and report its expiry", long_about = None)]
pub struct Cli {
    /// Domains to check (host names, no scheme)
    #[arg(value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// File with one domain per line ('-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Warn when fewer than this many days remain
    #[arg(short = 'w', long, value_name = "DAYS", value_parser = clap::value_parser!(i64).range(0..))]
    pub warning_days: Option<i64>,

    /// Connection and handshake timeout in seconds
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Port to connect to
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Number of domains checked at once
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub parallel: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Configuration file (defaults to config/default.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of loaded settings
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(days) = self.warning_days {
            settings.inspector.warning_threshold_days = days;
        }
        if let Some(timeout) = self.timeout {
            settings.inspector.timeout_secs = timeout;
        }
        if let Some(port) = self.port {
            settings.inspector.port = port;
        }
        if let Some(parallel) = self.parallel {
            settings.batch.parallel = parallel as usize;
        }
    }
}
