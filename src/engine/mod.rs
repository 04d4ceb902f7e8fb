//! Engine abstraction.
//!
//! An [`Engine`] performs the actual SNMP exchanges: message encoding, the UDP
//! socket, security processing, timeouts and retries. This crate never does
//! network I/O itself; [`Session`](crate::Session) drives an engine and turns
//! its raw varbinds into native values and tables.

#[cfg(any(test, feature = "testing"))]
mod mock;

#[cfg(any(test, feature = "testing"))]
pub use mock::*;

use crate::error::ErrorStatus;
use crate::oid::Oid;
use crate::session::SecurityContext;
use crate::value::Value;
use crate::varbind::VarBind;
use std::future::Future;
use std::time::Duration;

/// Default SNMP agent port.
pub const DEFAULT_PORT: u16 = 161;

/// Result type returned by engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Failure reported by an engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Engine-level failure: timeout, unreachable host, security failure.
    #[error("{0}")]
    Engine(Box<str>),

    /// The device answered with a non-zero error status.
    #[error("device reported {status} at index {index}")]
    Protocol {
        /// Reported status.
        status: ErrorStatus,
        /// 1-based index of the offending varbind (0 if not applicable).
        index: u32,
    },
}

impl EngineError {
    /// Engine-level failure with a message.
    pub fn engine(msg: impl Into<Box<str>>) -> Self {
        EngineError::Engine(msg.into())
    }
}

/// Where and how to reach an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    host: String,
    port: u16,
    timeout: Duration,
    retries: u32,
}

impl Target {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration, retries: u32) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
            retries,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Retries after the first attempt.
    pub fn retries(&self) -> u32 {
        self.retries
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// SNMP engine abstraction.
///
/// Implementations own all network state. Each method is one complete
/// exchange (including the engine's own retries); the session never issues
/// calls concurrently.
///
/// # Bulk walks
///
/// `bulk_walk` repeats GETBULK from `root` and returns every varbind received.
/// Engines commonly overshoot, so the last varbinds may lie outside `root`;
/// callers trim them (see [`trim_to_subtree`](crate::table::trim_to_subtree)).
pub trait Engine: Send + Sync {
    /// Fetch a single value.
    fn get_single(
        &self,
        target: &Target,
        security: &SecurityContext,
        oid: &Oid,
    ) -> impl Future<Output = EngineResult<Value>> + Send;

    /// Write a single value and return the value echoed by the agent.
    fn set_single(
        &self,
        target: &Target,
        security: &SecurityContext,
        oid: &Oid,
        value: Value,
    ) -> impl Future<Output = EngineResult<Value>> + Send;

    /// Walk the subtree at `root` with GETBULK.
    fn bulk_walk(
        &self,
        target: &Target,
        security: &SecurityContext,
        root: &Oid,
        non_repeaters: u32,
        max_repetitions: u32,
    ) -> impl Future<Output = EngineResult<Vec<VarBind>>> + Send;
}
