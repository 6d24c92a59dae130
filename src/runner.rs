//! Batch orchestration
//!
//! Runs independent inspections over many domains with bounded parallelism
//! and reduces their outcomes to a process exit code.

use crate::checks::CertificateInspector;
use crate::config::InspectorSettings;
use crate::models::{CertificateCheckResult, CertificateStatus};
use crate::utils::InspectError;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::io::BufRead;
use std::path::Path;
use tracing::warn;

/// Outcome of checking one domain
#[derive(Debug)]
pub struct DomainOutcome {
    pub domain: String,
    pub result: Result<CertificateCheckResult, InspectError>,
}

/// Check every domain, at most `parallel` at a time. Outcomes come back in
/// input order.
pub async fn check_domains(
    domains: &[String],
    settings: &InspectorSettings,
    parallel: usize,
) -> Vec<DomainOutcome> {
    let mut outcomes: Vec<(usize, DomainOutcome)> = stream::iter(domains.iter().enumerate())
        .map(|(index, domain)| {
            let settings = settings.clone();
            async move {
                let result = match CertificateInspector::with_settings(domain, settings) {
                    Ok(inspector) => inspector.check_certificate().await,
                    Err(e) => Err(e),
                };
                if let Err(e) = &result {
                    warn!(domain = %domain, kind = e.kind(), "certificate check failed: {}", e);
                }
                (
                    index,
                    DomainOutcome {
                        domain: domain.clone(),
                        result,
                    },
                )
            }
        })
        .buffer_unordered(parallel.max(1))
        .collect()
        .await;

    outcomes.sort_by_key(|(index, _)| *index);
    outcomes.into_iter().map(|(_, outcome)| outcome).collect()
}

/// Like [`check_domains`], but stops early with `None` once `interrupt`
/// resolves `Ok`. An `Err` from `interrupt` (e.g. no signal handler could be
/// installed) is logged and the checks run to completion.
pub async fn check_domains_until<F>(
    domains: &[String],
    settings: &InspectorSettings,
    parallel: usize,
    interrupt: F,
) -> Option<Vec<DomainOutcome>>
where
    F: Future<Output = std::io::Result<()>>,
{
    let interrupted = async {
        if let Err(e) = interrupt.await {
            warn!("interrupt listener unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        outcomes = check_domains(domains, settings, parallel) => Some(outcomes),
        _ = interrupted => None,
    }
}

/// Read domains one per line, skipping blank lines and `#` comments
pub fn read_domains<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut domains = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        domains.push(line.to_string());
    }
    Ok(domains)
}

/// Read domains from a file, or from stdin when the path is `-`
pub fn read_domain_list(path: &Path) -> std::io::Result<Vec<String>> {
    if path == Path::new("-") {
        read_domains(std::io::stdin().lock())
    } else {
        let file = std::fs::File::open(path)?;
        read_domains(std::io::BufReader::new(file))
    }
}

/// Process exit code for a set of outcomes: 0 all OK, 1 expired or
/// expiring soon, 2 any failed check. The worst outcome wins.
pub fn exit_code(outcomes: &[DomainOutcome]) -> i32 {
    outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Err(_) => 2,
            Ok(result) => match result.status() {
                CertificateStatus::Ok => 0,
                CertificateStatus::ExpiringSoon | CertificateStatus::Expired => 1,
            },
        })
        .max()
        .unwrap_or(0)
}
