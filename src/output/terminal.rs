//! Rich terminal output

use crate::models::{days_between, CertificateCheckResult, CertificateStatus};
use crate::utils::InspectError;
use chrono::{DateTime, Utc};
use console::style;

fn plural_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Human wording of the time to expiry. Time since expiry is counted in
/// whole days from `valid_to`; under one day reads "expired today".
pub fn expiry_phrase(result: &CertificateCheckResult, now: DateTime<Utc>) -> String {
    if result.is_expired() {
        match days_between(result.valid_to(), now) {
            days if days <= 0 => "expired today".to_string(),
            days => format!("expired {} ago", plural_days(days)),
        }
    } else {
        format!("{} left", plural_days(result.days_left()))
    }
}

/// Print a section header
pub fn print_header(title: &str) {
    println!();
    println!("{}", style(title).cyan().bold());
    println!("{}", style("─".repeat(title.chars().count())).dim());
}

/// Print a result with the status colored
pub fn print_result(result: &CertificateCheckResult) {
    let status = result.status();
    let marker = format!("{} {}", status.icon(), status.marker());
    let marker = match status {
        CertificateStatus::Expired => style(marker).red().bold(),
        CertificateStatus::ExpiringSoon => style(marker).yellow().bold(),
        CertificateStatus::Ok => style(marker).green().bold(),
    };

    let phrase = expiry_phrase(result, Utc::now());
    let days = match status {
        CertificateStatus::Expired => style(phrase).red(),
        CertificateStatus::ExpiringSoon => style(phrase).yellow(),
        CertificateStatus::Ok => style(phrase).green(),
    };

    print_header(&format!("SSL certificate for {}", result.domain()));
    println!("  {:<13}{}", "Status:", marker);
    println!("  {:<13}{}", "Issuer:", result.issuer());
    println!("  {:<13}{}", "Subject:", result.subject());
    println!(
        "  {:<13}{}",
        "Valid from:",
        result.valid_from().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  {:<13}{}",
        "Valid to:",
        result.valid_to().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  {:<13}{} ({})", "Days left:", result.days_left(), days);
    println!("  {:<13}{}", "Fingerprint:", style(result.fingerprint()).dim());
}

/// Print a failed check, kept visibly apart from expiring results
pub fn print_failure(domain: &str, error: &InspectError) {
    print_header(&format!("SSL certificate for {}", domain));
    println!(
        "  {:<13}{} {}",
        "Status:",
        style("✗ CHECK FAILED").red().bold(),
        style(format!("({})", error.kind())).dim()
    );
    println!("  {:<13}{}", "Error:", style(error.to_string()).red());
}
