//! cert-inspector - report how long until a host's TLS certificate expires
//!
//! Exit codes: 0 all certificates OK, 1 expired or expiring soon,
//! 2 a check failed or the input was invalid.

use anyhow::{bail, Context};
use cert_inspector::config::Settings;
use cert_inspector::output::{print_failure, print_json, print_result};
use cert_inspector::runner::{self, check_domains_until, DomainOutcome};
use cert_inspector::Cli;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            std::process::exit(2);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::load_default()?,
    };
    cli.apply_overrides(&mut settings);
    settings.validate()?;

    let mut domains = cli.domains.clone();
    if let Some(path) = &cli.file {
        let listed = runner::read_domain_list(path)
            .with_context(|| format!("Failed to read domains from {}", path.display()))?;
        domains.extend(listed);
    }

    if domains.is_empty() {
        bail!("No domains provided. Pass one or more DOMAIN arguments or --file");
    }

    let outcomes = match check_domains_until(
        &domains,
        &settings.inspector,
        settings.batch.parallel,
        tokio::signal::ctrl_c(),
    )
    .await
    {
        Some(outcomes) => outcomes,
        None => {
            eprintln!("{}", style("Interrupted").yellow());
            return Ok(130);
        }
    };

    if cli.json {
        print_json(&outcomes)?;
    } else {
        print_outcomes(&outcomes);
    }

    Ok(runner::exit_code(&outcomes))
}

fn print_outcomes(outcomes: &[DomainOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(result) => print_result(result),
            Err(e) => print_failure(&outcome.domain, e),
        }
    }
    println!();
}
