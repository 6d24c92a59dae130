//! Certificate parsing
//!
//! Reads the fields an expiry report needs from a DER-encoded X.509
//! certificate using x509-parser.

use crate::models::CertificateDetails;
use crate::utils::InspectError;
use chrono::{DateTime, TimeZone, Utc};
use sha2::Digest;
use x509_parser::prelude::*;

/// Certificate parser
pub struct CertificateParser;

impl CertificateParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse the leaf (first) certificate of a presented chain
    pub fn parse_leaf(
        &self,
        domain: &str,
        chain: &[Vec<u8>],
    ) -> Result<CertificateDetails, InspectError> {
        let leaf = chain
            .first()
            .ok_or_else(|| InspectError::CertificateUnavailable {
                domain: domain.to_string(),
                reason: "server presented no certificate".to_string(),
            })?;

        self.parse_certificate(domain, leaf)
    }

    /// Parse a single DER-encoded certificate
    pub fn parse_certificate(
        &self,
        domain: &str,
        der: &[u8],
    ) -> Result<CertificateDetails, InspectError> {
        let unavailable = |reason: String| InspectError::CertificateUnavailable {
            domain: domain.to_string(),
            reason,
        };

        let (_, cert) = X509Certificate::from_der(der)
            .map_err(|e| unavailable(format!("failed to parse certificate: {}", e)))?;

        let not_before = asn1_time_to_datetime(cert.validity().not_before)
            .ok_or_else(|| unavailable("invalid activation time".to_string()))?;
        let not_after = asn1_time_to_datetime(cert.validity().not_after)
            .ok_or_else(|| unavailable("invalid expiry time".to_string()))?;

        Ok(CertificateDetails {
            issuer: issuer_name(&cert),
            subject_cn: first_common_name(cert.subject()),
            not_before,
            not_after,
            fingerprint: sha256_fingerprint(der),
        })
    }
}

impl Default for CertificateParser {
    fn default() -> Self {
        Self::new()
    }
}

fn first_common_name(name: &X509Name<'_>) -> Option<String> {
    name.iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(|s| s.to_string())
}

/// Issuer CN, then O, then "Unknown"
fn issuer_name(cert: &X509Certificate<'_>) -> String {
    first_common_name(cert.issuer())
        .or_else(|| {
            cert.issuer()
                .iter_organization()
                .next()
                .and_then(|o| o.as_str().ok())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| "Unknown".to_string())
}

fn asn1_time_to_datetime(time: ASN1Time) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(time.timestamp(), 0).single()
}

/// SHA-256 over the DER bytes as upper-case hex pairs joined by ':'
pub fn sha256_fingerprint(der: &[u8]) -> String {
    let mut hasher = sha2::Sha256::new();
    hasher.update(der);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chain_is_unavailable() {
        let parser = CertificateParser::new();
        let result = parser.parse_leaf("example.com", &[]);
        assert!(matches!(
            result,
            Err(InspectError::CertificateUnavailable { ref domain, .. }) if domain == "example.com"
        ));
    }

    #[test]
    fn test_garbage_der_is_unavailable() {
        let parser = CertificateParser::new();
        let result = parser.parse_leaf("example.com", &[vec![0x30, 0x03, 0x01, 0x02]]);
        assert!(matches!(
            result,
            Err(InspectError::CertificateUnavailable { .. })
        ));
    }

    fn der_with_name(name: rcgen::DistinguishedName) -> Vec<u8> {
        let mut params = rcgen::CertificateParams::new(vec!["localhost".to_string()]).unwrap();
        params.distinguished_name = name;
        params.not_before = rcgen::date_time_ymd(2024, 1, 1);
        params.not_after = rcgen::date_time_ymd(2025, 1, 1);
        let key = rcgen::KeyPair::generate().unwrap();
        params.self_signed(&key).unwrap().der().to_vec()
    }

    #[test]
    fn test_parse_common_names() {
        let mut name = rcgen::DistinguishedName::new();
        name.push(rcgen::DnType::CommonName, "example.com");
        name.push(rcgen::DnType::OrganizationName, "Example Org");
        let der = der_with_name(name);

        let details = CertificateParser::new()
            .parse_leaf("example.com", &[der.clone()])
            .unwrap();
        assert_eq!(details.subject_cn.as_deref(), Some("example.com"));
        assert_eq!(details.issuer, "example.com");
        assert_eq!(details.not_before, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(details.not_after, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(details.fingerprint, sha256_fingerprint(&der));
    }

    #[test]
    fn test_issuer_falls_back_to_organization() {
        let mut name = rcgen::DistinguishedName::new();
        name.push(rcgen::DnType::OrganizationName, "Example Org");

        let details = CertificateParser::new()
            .parse_certificate("example.com", &der_with_name(name))
            .unwrap();
        assert_eq!(details.issuer, "Example Org");
        assert_eq!(details.subject_cn, None);

        let result = crate::models::CertificateCheckResult::from_details(
            "example.com",
            details,
            30,
            Utc::now(),
        );
        assert_eq!(result.subject(), "example.com");
    }

    #[test]
    fn test_issuer_unknown_without_cn_or_organization() {
        let mut name = rcgen::DistinguishedName::new();
        name.push(rcgen::DnType::CountryName, "NL");

        let details = CertificateParser::new()
            .parse_certificate("example.com", &der_with_name(name))
            .unwrap();
        assert_eq!(details.issuer, "Unknown");
        assert_eq!(details.subject_cn, None);
    }

    #[test]
    fn test_fingerprint_format() {
        // SHA-256 of the empty input
        let fp = sha256_fingerprint(b"");
        assert!(fp.starts_with("E3:B0:C4:42"));
        assert_eq!(fp.split(':').count(), 32);
    }
}
