//! Opaque transport handles.
//!
//! The transport layer that actually dials connections owns the concrete
//! types. Settings only need to know whether a handle was supplied, so each
//! handle is held behind one of these traits.

use std::fmt;
use std::sync::Arc;

/// Boxed error returned by transport callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A caller-supplied HTTP client.
///
/// When set, the library uses this client as-is instead of building its own
/// authenticated transport.
pub trait HttpClient: fmt::Debug + Send + Sync {}

/// A single option passed to the gRPC dialer.
pub trait DialOption: fmt::Debug + Send + Sync {}

/// An established gRPC client connection.
pub trait GrpcConn: fmt::Debug + Send + Sync {
    /// Returns the target the connection was dialed to.
    fn target(&self) -> &str;
}

/// A pool of gRPC connections that requests are balanced between.
pub trait ConnPool: fmt::Debug + Send + Sync {}

/// Parameters of a TLS client certificate request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateRequest {
    /// DER-encoded distinguished names of acceptable CAs, if the server sent any
    pub acceptable_cas: Vec<Vec<u8>>,
    /// TLS signature scheme identifiers supported by the server
    pub signature_schemes: Vec<u16>,
}

/// A client certificate chain and its private key, both PEM encoded.
#[derive(Debug)]
pub struct ClientCertificate {
    /// Certificate chain, leaf first
    pub chain_pem: Vec<u8>,
    /// Private key for the leaf certificate
    pub private_key_pem: crate::Secret<Vec<u8>>,
}

/// Callback that supplies a client certificate for mutual TLS.
///
/// Returning `Ok(None)` means no certificate is available for the request.
pub type ClientCertSource = Arc<
    dyn Fn(&CertificateRequest) -> Result<Option<ClientCertificate>, BoxError> + Send + Sync,
>;
