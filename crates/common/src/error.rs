//! Common error types shared across crates.

use std::net::SocketAddr;

use thiserror::Error;

/// Unrecoverable failure while bringing the fixture up.
///
/// Every variant is fatal: the binary reports it and exits. Only
/// [`StartupError::Bind`] can happen once resources and identity are in place;
/// all others stop the process before any listener exists.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A bundled resource is absent or empty.
    #[error("bundled resource `{name}` is missing or unreadable")]
    MissingResource { name: String },

    /// The certificate chain is not valid PEM or contains no certificate.
    #[error("malformed certificate chain: {0}")]
    MalformedCertificate(String),

    /// The private key is not valid PEM or no key block was found.
    #[error("malformed private key: {0}")]
    MalformedKey(String),

    /// The private key does not belong to the leaf certificate.
    #[error("private key does not match leaf certificate: {0}")]
    KeyMismatch(String),

    /// rustls rejected the server configuration.
    #[error("TLS configuration rejected: {0}")]
    Tls(String),

    /// The TCP listener could not be bound.
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

impl StartupError {
    /// Returns `true` when the failure happened before any socket was bound.
    pub fn is_before_listen(&self) -> bool {
        !matches!(self, StartupError::Bind { .. })
    }
}

/// Failure isolated to a single accepted connection.
///
/// These are never surfaced beyond a debug log line; the listener keeps going.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The TLS handshake did not complete.
    #[error("TLS handshake failed: {0}")]
    Handshake(#[from] std::io::Error),

    /// HTTP serving ended with an error (client reset, protocol error, ...).
    #[error("connection closed with error: {0}")]
    Serve(String),
}
