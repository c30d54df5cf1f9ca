//! Wire-level constants shared by the server and its tests.

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Body returned for every request, regardless of method or path.
pub const RESPONSE_BODY: &str = "Hello, world!";

// ---------------------------------------------------------------------------
// TLS
// ---------------------------------------------------------------------------

/// ALPN protocol identifiers advertised by the listener, in preference order.
pub const ALPN_PROTOCOLS: [&[u8]; 2] = [b"h2", b"http/1.1"];

/// Port the listener binds when nothing else is configured.
pub const DEFAULT_TLS_PORT: u16 = 443;

// ---------------------------------------------------------------------------
// Bundled resources
// ---------------------------------------------------------------------------

/// Leaf certificate, relative to the resource root.
pub const LEAF_CERT: &str = "server.crt";

/// Private key matching [`LEAF_CERT`].
pub const PRIVATE_KEY: &str = "server.key";

/// Issuing CA certificate, appended after the leaf.
pub const INTERMEDIATE_CERT: &str = "intermediate_ca.crt";
