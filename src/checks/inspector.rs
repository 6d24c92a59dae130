//! Certificate inspector
//!
//! Connects to a host, reads the certificate it presents and measures how
//! long until that certificate expires. One connection per call, no retries.

use crate::checks::certificate::CertificateParser;
use crate::checks::tls::connect_inspect_only;
use crate::config::InspectorSettings;
use crate::models::CertificateCheckResult;
use crate::utils::InspectError;
use chrono::Utc;
use std::future::Future;
use tracing::debug;

/// Inspects the certificate of a single domain
#[derive(Debug, Clone)]
pub struct CertificateInspector {
    domain: String,
    settings: InspectorSettings,
}

impl CertificateInspector {
    /// Create an inspector for `domain` with the given warning threshold and
    /// default port and timeout
    pub fn new(domain: &str, warning_threshold_days: i64) -> Result<Self, InspectError> {
        let settings = InspectorSettings {
            warning_threshold_days,
            ..InspectorSettings::default()
        };
        Self::with_settings(domain, settings)
    }

    /// Create an inspector with explicit settings
    pub fn with_settings(domain: &str, settings: InspectorSettings) -> Result<Self, InspectError> {
        validate_domain(domain)?;
        settings
            .validate()
            .map_err(|e| InspectError::Configuration {
                message: e.to_string(),
            })?;

        Ok(Self {
            domain: domain.to_string(),
            settings,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn settings(&self) -> &InspectorSettings {
        &self.settings
    }

    /// Connect, read the presented certificate and compute its expiry status.
    ///
    /// Connect and handshake together must finish within the configured
    /// timeout; otherwise the connection is dropped and `Timeout` returned.
    pub async fn check_certificate(&self) -> Result<CertificateCheckResult, InspectError> {
        let timeout = self.settings.timeout();

        let chain = tokio::time::timeout(
            timeout,
            connect_inspect_only(&self.domain, self.settings.port),
        )
        .await
        .map_err(|_| InspectError::Timeout {
            domain: self.domain.clone(),
            seconds: timeout.as_secs(),
        })??;

        let details = CertificateParser::new().parse_leaf(&self.domain, &chain)?;
        let result = CertificateCheckResult::from_details(
            &self.domain,
            details,
            self.settings.warning_threshold_days,
            Utc::now(),
        );

        debug!(
            domain = %self.domain,
            days_left = result.days_left(),
            status = %result.status(),
            "certificate inspected"
        );

        Ok(result)
    }

    /// Same as [`check_certificate`](Self::check_certificate), but gives up
    /// with `Cancelled` as soon as `cancel` completes.
    pub async fn check_certificate_with_cancel<F>(
        &self,
        cancel: F,
    ) -> Result<CertificateCheckResult, InspectError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.check_certificate() => result,
            _ = cancel => Err(InspectError::Cancelled {
                domain: self.domain.clone(),
            }),
        }
    }
}

/// A bare host name: no scheme, path, port or whitespace
fn validate_domain(domain: &str) -> Result<(), InspectError> {
    let invalid = |reason: &str| InspectError::InvalidDomain {
        domain: domain.to_string(),
        reason: reason.to_string(),
    };

    if domain.is_empty() {
        return Err(invalid("domain is empty"));
    }
    if domain.contains("://") {
        return Err(invalid("remove the scheme"));
    }
    if domain.contains('/') {
        return Err(invalid("remove the path"));
    }
    if domain.chars().any(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }
    if domain.contains(':') && domain.parse::<std::net::Ipv6Addr>().is_err() {
        return Err(invalid("pass the port separately"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_validation() {
        assert!(CertificateInspector::new("example.com", 30).is_ok());
        assert!(CertificateInspector::new("127.0.0.1", 30).is_ok());
        assert!(CertificateInspector::new("::1", 30).is_ok());

        for bad in ["", "https://example.com", "example.com/path", "exa mple.com", "example.com:443"] {
            assert!(
                matches!(
                    CertificateInspector::new(bad, 30),
                    Err(InspectError::InvalidDomain { .. })
                ),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_negative_threshold_rejected() {
        assert!(matches!(
            CertificateInspector::new("example.com", -1),
            Err(InspectError::Configuration { .. })
        ));
    }

    #[test]
    fn test_defaults() {
        let inspector = CertificateInspector::new("example.com", 30).unwrap();
        assert_eq!(inspector.settings().port, 443);
        assert_eq!(inspector.settings().timeout_secs, 10);
    }

    #[tokio::test]
    async fn test_cancel_wins_over_slow_peer() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            drop(socket);
        });

        let settings = InspectorSettings {
            port,
            ..InspectorSettings::default()
        };
        let inspector = CertificateInspector::with_settings("127.0.0.1", settings).unwrap();
        let result = inspector
            .check_certificate_with_cancel(tokio::time::sleep(std::time::Duration::from_millis(100)))
            .await;

        assert!(matches!(result, Err(InspectError::Cancelled { .. })));
    }
}
