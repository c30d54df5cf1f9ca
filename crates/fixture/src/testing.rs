//! Test-only PKI: a throwaway root → intermediate → leaf chain plus client helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair, KeyUsagePurpose};
use rustls::crypto::ring;
use rustls::pki_types::{CertificateDer, ServerName};
use rustls::{ClientConfig, RootCertStore};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;

use crate::identity::TlsIdentity;

/// Freshly generated certificate chain for a single test.
pub struct TestPki {
    pub root_der: CertificateDer<'static>,
    pub intermediate_der: CertificateDer<'static>,
    pub intermediate_pem: String,
    pub leaf_der: CertificateDer<'static>,
    pub leaf_pem: String,
    pub leaf_key_pem: String,
    /// A valid key that belongs to no certificate in this chain.
    pub stranger_key_pem: String,
}

impl TestPki {
    pub fn generate() -> Self {
        let root_key = KeyPair::generate().unwrap();
        let root = ca_params("tls-fixture test root")
            .self_signed(&root_key)
            .unwrap();

        let intermediate_key = KeyPair::generate().unwrap();
        let intermediate = ca_params("tls-fixture test intermediate")
            .signed_by(&intermediate_key, &root, &root_key)
            .unwrap();

        let leaf_key = KeyPair::generate().unwrap();
        let mut leaf_params =
            CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()])
                .unwrap();
        leaf_params
            .distinguished_name
            .push(DnType::CommonName, "localhost");
        let leaf = leaf_params
            .signed_by(&leaf_key, &intermediate, &intermediate_key)
            .unwrap();

        Self {
            root_der: root.der().clone(),
            intermediate_der: intermediate.der().clone(),
            intermediate_pem: intermediate.pem(),
            leaf_der: leaf.der().clone(),
            leaf_pem: leaf.pem(),
            leaf_key_pem: leaf_key.serialize_pem(),
            stranger_key_pem: KeyPair::generate().unwrap().serialize_pem(),
        }
    }

    pub fn identity(&self) -> TlsIdentity {
        TlsIdentity::build(
            self.leaf_pem.as_bytes(),
            self.intermediate_pem.as_bytes(),
            self.leaf_key_pem.as_bytes(),
        )
        .unwrap()
    }
}

fn ca_params(common_name: &str) -> CertificateParams {
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    params.distinguished_name.push(DnType::CommonName, common_name);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.key_usages = vec![
        KeyUsagePurpose::KeyCertSign,
        KeyUsagePurpose::CrlSign,
        KeyUsagePurpose::DigitalSignature,
    ];
    params
}

/// Client trusting only `root`, offering `alpn` in order.
pub fn client_config(root: CertificateDer<'static>, alpn: &[&[u8]]) -> Arc<ClientConfig> {
    let mut roots = RootCertStore::empty();
    roots.add(root).unwrap();

    let mut config = ClientConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_root_certificates(roots)
        .with_no_client_auth();
    config.alpn_protocols = alpn.iter().map(|p| p.to_vec()).collect();
    Arc::new(config)
}

/// Open a TLS connection to `addr`, verifying the server as `localhost`.
pub async fn connect(
    addr: SocketAddr,
    config: Arc<ClientConfig>,
) -> std::io::Result<TlsStream<TcpStream>> {
    let tcp = TcpStream::connect(addr).await?;
    let name = ServerName::try_from("localhost").unwrap();
    TlsConnector::from(config).connect(name, tcp).await
}
