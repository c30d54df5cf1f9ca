//! The single request handler.

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{Method, Uri};
use common::protocol::RESPONSE_BODY;
use tracing::info;

/// Logs the request line and answers with the fixed body, whatever the method or path.
pub async fn hello(
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
) -> &'static str {
    info!("{}", access_line(peer, &method, &uri));
    RESPONSE_BODY
}

/// `<remote-address> <method> <url>`, space separated.
///
/// HTTP/2 requests carry scheme and authority in the URI; only the
/// path and query are logged so both protocols produce the same line.
pub fn access_line(peer: SocketAddr, method: &Method, uri: &Uri) -> String {
    let target = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    format!("{peer} {method} {target}")
}
