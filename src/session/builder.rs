//! Session builder.

use std::time::Duration;

use crate::engine::{Engine, Target};
use crate::error::{Error, Result};
use crate::native::TextEncoding;

use super::{Auth, Session, SessionConfig};

/// Builder for [`Session`].
///
/// # Example
///
/// ```rust
/// use snmp_table::engine::MockEngine;
/// use snmp_table::{Auth, Session, TextEncoding};
/// use std::time::Duration;
///
/// # fn example() -> snmp_table::Result<()> {
/// let session = Session::builder("192.0.2.1", Auth::v2c("public"))
///     .timeout(Duration::from_secs(2))
///     .retries(1)
///     .text_encoding(TextEncoding::Latin1)
///     .build(MockEngine::new())?;
/// assert_eq!(session.target().to_string(), "192.0.2.1:161");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    host: String,
    auth: Auth,
    config: SessionConfig,
}

impl SessionBuilder {
    /// Start a builder for `host` with the given credentials.
    pub fn new(host: impl Into<String>, auth: impl Into<Auth>) -> Self {
        Self {
            host: host.into(),
            auth: auth.into(),
            config: SessionConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Agent UDP port (default: 161).
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Per-attempt timeout (default: 1 second).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Retries after the first attempt (default: 5).
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Default max-repetitions for table walks (default: 20).
    pub fn max_repetitions(mut self, n: u32) -> Self {
        self.config.max_repetitions = n;
        self
    }

    /// Default non-repeaters for table walks (default: 0).
    pub fn non_repeaters(mut self, n: u32) -> Self {
        self.config.non_repeaters = n;
        self
    }

    /// Encoding used to decode OCTET STRING values (default: UTF-8).
    pub fn text_encoding(mut self, encoding: TextEncoding) -> Self {
        self.config.text_encoding = encoding;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Config("target host is empty".into()).boxed());
        }
        if self.config.max_repetitions == 0 {
            return Err(Error::Config("max_repetitions must be at least 1".into()).boxed());
        }
        self.auth.validate()
    }

    /// Validate the configuration and create the session.
    pub fn build<E: Engine>(self, engine: E) -> Result<Session<E>> {
        self.validate()?;
        let target = Target::new(
            self.host,
            self.config.port,
            self.config.timeout,
            self.config.retries,
        );
        Ok(Session::from_parts(engine, target, self.auth, self.config))
    }
}
