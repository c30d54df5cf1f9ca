//! Common types, wire constants, and errors shared across `tls-fixture` crates.

pub mod error;
pub mod protocol;

pub use error::{ConnectionError, StartupError};
