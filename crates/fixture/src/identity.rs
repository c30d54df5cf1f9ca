//! TLS identity: the certificate chain and private key served on every handshake.
//!
//! The chain is the leaf certificate bytes followed directly by the intermediate
//! certificate bytes. Nothing is inserted between them, so the leaf PEM must end
//! with a newline (as PEM files do).

use std::fmt;
use std::io::BufReader;
use std::sync::Arc;

use common::protocol::ALPN_PROTOCOLS;
use common::StartupError;
use rustls::crypto::ring;
use rustls::pki_types::CertificateDer;
use rustls::sign::CertifiedKey;
use rustls::{InconsistentKeys, ServerConfig};
use tokio_rustls::TlsAcceptor;

use crate::resources::LoadedResources;

/// Immutable server identity, built once at startup.
pub struct TlsIdentity {
    chain_pem: Vec<u8>,
    chain: Vec<CertificateDer<'static>>,
    server_config: Arc<ServerConfig>,
}

impl TlsIdentity {
    /// Build the identity from the bundled resources.
    pub fn from_resources(res: &LoadedResources) -> Result<Self, StartupError> {
        Self::build(res.leaf_cert, res.intermediate_cert, res.private_key)
    }

    /// Concatenate `leaf_pem` and `intermediate_pem` into a chain and pair it
    /// with `key_pem`.
    ///
    /// # Errors
    ///
    /// - [`StartupError::MalformedCertificate`] if the chain does not parse or is empty.
    /// - [`StartupError::MalformedKey`] if no usable private key is found.
    /// - [`StartupError::KeyMismatch`] if the key does not belong to the leaf.
    /// - [`StartupError::Tls`] if rustls rejects the resulting configuration.
    pub fn build(
        leaf_pem: &[u8],
        intermediate_pem: &[u8],
        key_pem: &[u8],
    ) -> Result<Self, StartupError> {
        let mut chain_pem = Vec::with_capacity(leaf_pem.len() + intermediate_pem.len());
        chain_pem.extend_from_slice(leaf_pem);
        chain_pem.extend_from_slice(intermediate_pem);

        let chain = rustls_pemfile::certs(&mut BufReader::new(chain_pem.as_slice()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StartupError::MalformedCertificate(e.to_string()))?;
        if chain.is_empty() {
            return Err(StartupError::MalformedCertificate(
                "no certificate found in PEM data".into(),
            ));
        }

        let key = rustls_pemfile::private_key(&mut BufReader::new(key_pem))
            .map_err(|e| StartupError::MalformedKey(e.to_string()))?
            .ok_or_else(|| StartupError::MalformedKey("no private key found in PEM data".into()))?;

        let provider = Arc::new(ring::default_provider());
        let signing_key = provider
            .key_provider
            .load_private_key(key.clone_key())
            .map_err(|e| StartupError::MalformedKey(e.to_string()))?;

        // Keys whose public half the provider cannot derive are left to rustls.
        match CertifiedKey::new(chain.clone(), signing_key).keys_match() {
            Ok(()) | Err(rustls::Error::InconsistentKeys(InconsistentKeys::Unknown)) => {}
            Err(e) => return Err(StartupError::KeyMismatch(e.to_string())),
        }

        let mut config = ServerConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| StartupError::Tls(e.to_string()))?
            .with_no_client_auth()
            .with_single_cert(chain.clone(), key)
            .map_err(|e| StartupError::Tls(e.to_string()))?;
        config.alpn_protocols = ALPN_PROTOCOLS.iter().map(|p| p.to_vec()).collect();

        Ok(Self {
            chain_pem,
            chain,
            server_config: Arc::new(config),
        })
    }

    /// The exact chain bytes: leaf followed by intermediate.
    pub fn chain_pem(&self) -> &[u8] {
        &self.chain_pem
    }

    /// DER certificates in presentation order, leaf first.
    pub fn chain(&self) -> &[CertificateDer<'static>] {
        &self.chain
    }

    /// Shared rustls configuration.
    pub fn server_config(&self) -> Arc<ServerConfig> {
        Arc::clone(&self.server_config)
    }

    /// Acceptor performing the server side of the handshake.
    pub fn acceptor(&self) -> TlsAcceptor {
        TlsAcceptor::from(self.server_config())
    }
}

impl fmt::Debug for TlsIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsIdentity")
            .field("chain_len", &self.chain.len())
            .field("alpn", &self.server_config.alpn_protocols)
            .finish_non_exhaustive()
    }
}
