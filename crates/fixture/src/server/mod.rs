//! TLS listener, routing, and the fixed-response handler.
//!
//! # Responsibilities
//! - Bind the TCP listener and terminate TLS with the startup identity.
//! - Serve HTTP/2 (preferred via ALPN) or HTTP/1.1 on each connection.
//! - Answer every request with the fixed body after logging the request line.

pub mod handlers;
pub mod listener;
pub mod router;

pub use listener::{bind, Listener};
