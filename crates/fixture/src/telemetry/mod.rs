//! Tracing setup for the fixture.
//!
//! # Telemetry invariants
//!
//! - **No key material** may appear in any log field.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   overrides it when set.

pub mod init;

pub use init::init_telemetry;
