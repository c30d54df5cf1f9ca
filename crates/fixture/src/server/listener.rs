//! TLS accept loop.
//!
//! For each accepted TCP connection the listener:
//! 1. Spawns a Tokio task so the accept loop never waits on a slow peer.
//! 2. Runs the TLS handshake with the shared identity.
//! 3. Serves HTTP/2 or HTTP/1.1 (whichever the client speaks) until it closes.
//!
//! Per-connection failures are logged at `debug` and go no further.

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::Router;
use common::{ConnectionError, StartupError};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;
use tower::ServiceExt;
use tracing::{debug, error};

use super::router;
use crate::identity::TlsIdentity;

/// A bound listener holding the identity it serves.
pub struct Listener {
    tcp: TcpListener,
    local_addr: SocketAddr,
    identity: TlsIdentity,
    router: Router,
}

/// Bind the TCP socket for `addr`.
///
/// # Errors
///
/// [`StartupError::Bind`] if the address is unavailable or not permitted.
pub async fn bind(addr: SocketAddr, identity: TlsIdentity) -> Result<Listener, StartupError> {
    let tcp = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    let local_addr = tcp
        .local_addr()
        .map_err(|source| StartupError::Bind { addr, source })?;

    Ok(Listener {
        tcp,
        local_addr,
        identity,
        router: router::build(),
    })
}

impl Listener {
    /// Address actually bound (resolves port `0`).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept connections until the process is killed.
    pub async fn run(self) {
        let acceptor = self.identity.acceptor();

        loop {
            match self.tcp.accept().await {
                Ok((stream, peer_addr)) => {
                    debug!(%peer_addr, "accepted TCP connection");
                    let acceptor = acceptor.clone();
                    let router = self.router.clone();
                    tokio::spawn(async move {
                        if let Err(e) = serve_connection(stream, peer_addr, acceptor, router).await
                        {
                            debug!(%peer_addr, error = %e, "connection error");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "accept error");
                }
            }
        }
    }
}

/// Handshake, then serve HTTP on a single connection.
async fn serve_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    acceptor: TlsAcceptor,
    router: Router,
) -> Result<(), ConnectionError> {
    let tls = acceptor.accept(stream).await?;
    let alpn = tls
        .get_ref()
        .1
        .alpn_protocol()
        .map(|p| String::from_utf8_lossy(p).into_owned());
    debug!(%peer_addr, alpn = alpn.as_deref().unwrap_or("none"), "TLS handshake complete");

    let service = service_fn(move |mut req: Request<Incoming>| {
        req.extensions_mut().insert(ConnectInfo(peer_addr));
        router.clone().oneshot(req)
    });

    let builder = auto::Builder::new(TokioExecutor::new());
    builder
        .serve_connection(TokioIo::new(tls), service)
        .await
        .map_err(|e| ConnectionError::Serve(e.to_string()))
}
