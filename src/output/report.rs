//! Plain-text certificate report

use crate::models::CertificateCheckResult;
use std::fmt::Write;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Render a result as a multi-line report.
///
/// Deterministic for a given result: no colors, no clock reads.
pub fn format_result(result: &CertificateCheckResult) -> String {
    let status = result.status();
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "SSL certificate for {}", result.domain());
    let _ = writeln!(out, "  Status:      {} {}", status.icon(), status.marker());
    let _ = writeln!(out, "  Issuer:      {}", result.issuer());
    let _ = writeln!(out, "  Subject:     {}", result.subject());
    let _ = writeln!(out, "  Valid from:  {}", result.valid_from().format(DATE_FORMAT));
    let _ = writeln!(out, "  Valid to:    {}", result.valid_to().format(DATE_FORMAT));
    let _ = writeln!(out, "  Days left:   {}", result.days_left());
    let _ = write!(out, "  Fingerprint: {}", result.fingerprint());

    out
}
