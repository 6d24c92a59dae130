//! Certificate check result types

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Expiry status of an inspected certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CertificateStatus {
    Expired,
    ExpiringSoon,
    Ok,
}

impl CertificateStatus {
    /// Marker used in text reports
    pub fn marker(&self) -> &'static str {
        match self {
            CertificateStatus::Expired => "EXPIRED",
            CertificateStatus::ExpiringSoon => "EXPIRING SOON",
            CertificateStatus::Ok => "OK",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            CertificateStatus::Expired => "✗",
            CertificateStatus::ExpiringSoon => "⚠",
            CertificateStatus::Ok => "✓",
        }
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// Fields read from the presented leaf certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDetails {
    /// Issuer common name, else organization, else "Unknown"
    pub issuer: String,
    /// Subject common name, if the certificate has one
    pub subject_cn: Option<String>,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    /// SHA-256 of the DER encoding, colon separated hex
    pub fingerprint: String,
}

/// Snapshot of one certificate inspection.
///
/// `is_expired` and `needs_warning` are derived from `days_left` and the
/// threshold at the moment of measurement and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateCheckResult {
    domain: String,
    issuer: String,
    subject: String,
    valid_from: DateTime<Utc>,
    valid_to: DateTime<Utc>,
    days_left: i64,
    is_expired: bool,
    needs_warning: bool,
    fingerprint: String,
}

impl CertificateCheckResult {
    /// Build a result from parsed certificate fields, measured at `now`
    pub fn from_details(
        domain: &str,
        details: CertificateDetails,
        warning_threshold_days: i64,
        now: DateTime<Utc>,
    ) -> Self {
        let days_left = days_between(now, details.not_after);

        Self {
            domain: domain.to_string(),
            issuer: details.issuer,
            subject: details.subject_cn.unwrap_or_else(|| domain.to_string()),
            valid_from: details.not_before,
            valid_to: details.not_after,
            days_left,
            is_expired: days_left < 0,
            needs_warning: days_left < warning_threshold_days,
            fingerprint: details.fingerprint,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn valid_from(&self) -> DateTime<Utc> {
        self.valid_from
    }

    pub fn valid_to(&self) -> DateTime<Utc> {
        self.valid_to
    }

    /// Whole 24-hour periods until expiry, floored; negative once expired
    pub fn days_left(&self) -> i64 {
        self.days_left
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired
    }

    pub fn needs_warning(&self) -> bool {
        self.needs_warning
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Status by priority: expired, then expiring soon, then OK
    pub fn status(&self) -> CertificateStatus {
        if self.is_expired {
            CertificateStatus::Expired
        } else if self.needs_warning {
            CertificateStatus::ExpiringSoon
        } else {
            CertificateStatus::Ok
        }
    }
}

/// Number of raw 24-hour periods from `now` until `until`, rounded toward
/// negative infinity. Timezone independent.
pub fn days_between(now: DateTime<Utc>, until: DateTime<Utc>) -> i64 {
    until
        .signed_duration_since(now)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}
