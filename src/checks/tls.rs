//! Inspection-only TLS connection
//!
//! Connects and completes a TLS handshake without validating the presented
//! chain, so expired and self-signed certificates can still be read. This
//! connector must only be used to look at certificates, never to carry data
//! that needs a trusted peer.

use crate::utils::InspectError;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, Error as RustlsError, SignatureScheme};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

/// Accepts any server certificate. Handshake signatures are still checked
/// with the provider's algorithms, only trust in the chain is skipped.
#[derive(Debug)]
struct InspectOnlyVerifier {
    provider: Arc<CryptoProvider>,
}

impl ServerCertVerifier for InspectOnlyVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, RustlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        rustls::crypto::verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        rustls::crypto::verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// Build a client config that skips trust validation. Each call gets its own
/// provider and config; nothing is installed process-wide.
fn inspect_only_config() -> Result<ClientConfig, InspectError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let verifier = InspectOnlyVerifier {
        provider: Arc::clone(&provider),
    };

    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| InspectError::Configuration {
            message: e.to_string(),
        })?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(verifier))
        .with_no_client_auth();

    Ok(config)
}

/// A server that sends an empty certificate list fails the handshake inside
/// rustls; that is missing data, not a transport failure.
fn handshake_error(domain: &str, source: std::io::Error) -> InspectError {
    let no_certificate = matches!(
        source
            .get_ref()
            .and_then(|e| e.downcast_ref::<RustlsError>()),
        Some(RustlsError::NoCertificatesPresented)
    );

    if no_certificate {
        InspectError::CertificateUnavailable {
            domain: domain.to_string(),
            reason: "server presented no certificate".to_string(),
        }
    } else {
        InspectError::Connection {
            domain: domain.to_string(),
            source,
        }
    }
}

/// Open one TCP connection to `domain:port`, complete a TLS handshake
/// without validating trust, and return the presented chain as DER, leaf
/// first. The connection is closed before returning.
///
/// No deadline is applied here; callers wrap this in their own timeout.
pub async fn connect_inspect_only(domain: &str, port: u16) -> Result<Vec<Vec<u8>>, InspectError> {
    let server_name =
        ServerName::try_from(domain.to_string()).map_err(|_| InspectError::InvalidDomain {
            domain: domain.to_string(),
            reason: "not a valid TLS server name".to_string(),
        })?;

    let connector = TlsConnector::from(Arc::new(inspect_only_config()?));

    debug!(domain, port, "opening TCP connection");
    let stream = TcpStream::connect((domain, port))
        .await
        .map_err(|source| InspectError::Connection {
            domain: domain.to_string(),
            source,
        })?;

    debug!(domain, "performing TLS handshake (inspection only)");
    let tls_stream = connector
        .connect(server_name, stream)
        .await
        .map_err(|source| handshake_error(domain, source))?;

    let (_, client_connection) = tls_stream.get_ref();

    let chain: Vec<Vec<u8>> = client_connection
        .peer_certificates()
        .map(|certs| certs.iter().map(|c| c.as_ref().to_vec()).collect())
        .unwrap_or_default();

    debug!(
        domain,
        certificates = chain.len(),
        protocol = ?client_connection.protocol_version(),
        "handshake complete"
    );

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builds() {
        let config = inspect_only_config();
        assert!(config.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_server_name() {
        let result = connect_inspect_only("bad name with spaces", 443).await;
        assert!(matches!(result, Err(InspectError::InvalidDomain { .. })));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port with nothing listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = connect_inspect_only("localhost", port).await;
        assert!(matches!(result, Err(InspectError::Connection { .. })));
    }

    #[test]
    fn test_no_certificates_maps_to_unavailable() {
        let source = std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            RustlsError::NoCertificatesPresented,
        );
        let err = handshake_error("example.com", source);
        assert_eq!(err.kind(), "certificate_unavailable");
    }

    #[test]
    fn test_other_tls_errors_stay_connection_errors() {
        let source = std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            RustlsError::HandshakeNotComplete,
        );
        assert_eq!(handshake_error("example.com", source).kind(), "connection_error");

        let source = std::io::Error::from(std::io::ErrorKind::UnexpectedEof);
        assert_eq!(handshake_error("example.com", source).kind(), "connection_error");
    }
}
