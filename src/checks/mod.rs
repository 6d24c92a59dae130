//! Check modules for cert-inspector
//!
//! This module contains the connection, parsing and inspection logic.

pub mod certificate;
pub mod inspector;
pub mod tls;

pub use certificate::CertificateParser;
pub use inspector::CertificateInspector;
pub use tls::connect_inspect_only;
