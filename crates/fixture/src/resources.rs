//! Bundled certificate material.
//!
//! The three PEM files under the crate's `cert/` directory are compiled into the
//! binary. Lookups are by name relative to that directory.

use std::fmt;

use common::protocol::{INTERMEDIATE_CERT, LEAF_CERT, PRIVATE_KEY};
use common::StartupError;

static EMBEDDED: &[(&str, &[u8])] = &[
    (LEAF_CERT, include_bytes!("../cert/server.crt")),
    (PRIVATE_KEY, include_bytes!("../cert/server.key")),
    (INTERMEDIATE_CERT, include_bytes!("../cert/intermediate_ca.crt")),
];

/// Read-only table of named resources.
#[derive(Clone, Copy)]
pub struct Bundle {
    entries: &'static [(&'static str, &'static [u8])],
}

impl Bundle {
    /// The resources compiled into this binary.
    pub fn embedded() -> Self {
        Self::from_static(EMBEDDED)
    }

    /// A bundle over an arbitrary static table.
    pub fn from_static(entries: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { entries }
    }

    /// Return the bytes of `name`.
    ///
    /// # Errors
    ///
    /// [`StartupError::MissingResource`] if `name` is absent or empty.
    pub fn read(&self, name: &str) -> Result<&'static [u8], StartupError> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, bytes)| *bytes)
            .filter(|bytes| !bytes.is_empty())
            .ok_or_else(|| StartupError::MissingResource { name: name.into() })
    }

    /// Resolve the leaf certificate, private key, and intermediate certificate.
    ///
    /// Stops at the first missing resource.
    pub fn load(&self) -> Result<LoadedResources, StartupError> {
        Ok(LoadedResources {
            leaf_cert: self.read(LEAF_CERT)?,
            private_key: self.read(PRIVATE_KEY)?,
            intermediate_cert: self.read(INTERMEDIATE_CERT)?,
        })
    }
}

/// The three raw inputs of the TLS identity.
#[derive(Clone, Copy)]
pub struct LoadedResources {
    pub leaf_cert: &'static [u8],
    pub private_key: &'static [u8],
    pub intermediate_cert: &'static [u8],
}

impl fmt::Debug for LoadedResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedResources")
            .field("leaf_cert", &format_args!("{} bytes", self.leaf_cert.len()))
            .field("private_key", &"<redacted>")
            .field(
                "intermediate_cert",
                &format_args!("{} bytes", self.intermediate_cert.len()),
            )
            .finish()
    }
}
