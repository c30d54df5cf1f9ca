//! Configuration loading and validation for the fixture server.
//!
//! All values are read from environment variables at startup and every one has
//! a default, so running the binary with an empty environment binds `:443`.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Plain single-line records.
    Text,
    /// Structured JSON records.
    Json,
}

/// Validated fixture configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the TLS listener binds on all interfaces.
    #[serde(default = "default_tls_port")]
    pub tls_port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format: `text` or `json`.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

fn default_tls_port() -> u16 {
    common::protocol::DEFAULT_TLS_PORT
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> LogFormat {
    LogFormat::Text
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tls_port: default_tls_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        Self::from_source(config::Environment::default())
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let cfg = config::Config::builder()
            .add_source(source)
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.tls_port == 0 {
            anyhow::bail!("TLS_PORT must be a non-zero port");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::default().source(Some(map))
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_tls_port(), 443);
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_log_format(), LogFormat::Text);
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = Config::from_source(env(&[])).unwrap();
        assert_eq!(cfg.tls_port, 443);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.log_format, LogFormat::Text);
    }

    #[test]
    fn reads_overrides() {
        let cfg = Config::from_source(env(&[
            ("TLS_PORT", "8443"),
            ("LOG_LEVEL", "debug"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(cfg.tls_port, 8443);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(Config::from_source(env(&[("LOG_FORMAT", "xml")])).is_err());
    }

    #[test]
    fn validate_rejects_zero_port() {
        let cfg = Config {
            tls_port: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_log_level() {
        let cfg = Config {
            log_level: "  ".into(),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_accepts_default() {
        assert!(Config::default().validate().is_ok());
    }
}
