//! `tls-fixture`: TLS test server entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise tracing.
//! 3. Load the bundled certificate, key, and intermediate certificate.
//! 4. Build the TLS identity (chain = leaf ‖ intermediate, plus key).
//! 5. Bind the listener and serve until killed.
//!
//! Any failure in steps 1–5 is fatal: it is reported here and the process
//! exits non-zero before (or instead of) accepting connections.

mod config;
mod identity;
mod resources;
mod server;
mod telemetry;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use identity::TlsIdentity;
use resources::Bundle;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level, cfg.log_format)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        tls_port = cfg.tls_port,
        "tls-fixture starting"
    );

    // -----------------------------------------------------------------------
    // 3. Bundled resources
    // -----------------------------------------------------------------------
    let loaded = Bundle::embedded()
        .load()
        .context("failed to load bundled TLS resources")?;

    // -----------------------------------------------------------------------
    // 4. TLS identity
    // -----------------------------------------------------------------------
    let identity =
        TlsIdentity::from_resources(&loaded).context("failed to build TLS identity")?;
    info!(
        chain_len = identity.chain().len(),
        chain_bytes = identity.chain_pem().len(),
        "TLS identity loaded"
    );

    // -----------------------------------------------------------------------
    // 5. Listener
    // -----------------------------------------------------------------------
    let addr: SocketAddr = ([0, 0, 0, 0], cfg.tls_port).into();
    let listener = server::bind(addr, identity).await?;
    info!(addr = %listener.local_addr(), "listening");
    listener.run().await;

    Ok(())
}
