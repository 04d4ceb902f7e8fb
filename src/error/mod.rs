//! Error types for snmp-table.
//!
//! This module provides:
//!
//! - [`Error`] - The main error type (6 variants covering all failure modes)
//! - [`ErrorStatus`] - SNMP protocol errors reported by devices (RFC 3416)
//! - [`ValueShape`] - The native value shape that `set` could not classify
//!
//! # Error Handling
//!
//! Errors are boxed for efficiency: `Result<T> = Result<T, Box<Error>>`.
//!
//! ```rust
//! use snmp_table::{Error, Result};
//!
//! fn handle_error(result: Result<()>) {
//!     match result {
//!         Ok(()) => println!("Success"),
//!         Err(e) => match &*e {
//!             Error::Transport { source, .. } => {
//!                 println!("device or engine failure: {}", source);
//!             }
//!             Error::Config(msg) => {
//!                 println!("bad request: {}", msg);
//!             }
//!             _ => println!("Error: {}", e),
//!         }
//!     }
//! }
//! ```

use crate::engine::EngineError;
use crate::oid::Oid;

/// Result type alias using the library's boxed Error type.
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Shape of a native value handed to `set` without an explicit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Raw byte sequence.
    Bytes,
    /// Boolean flag.
    Bool,
}

impl std::fmt::Display for ValueShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bytes => write!(f, "bytes"),
            Self::Bool => write!(f, "bool"),
        }
    }
}

/// The main error type for all snmp-table operations.
///
/// Only [`Error::Transport`] is expected mid-operation; every other variant is
/// raised before the engine is contacted.
///
/// # Common Patterns
///
/// ```
/// use snmp_table::{Error, ErrorStatus, EngineError};
///
/// fn is_access_error(error: &Error) -> bool {
///     matches!(error,
///         Error::Transport {
///             source: EngineError::Protocol {
///                 status: ErrorStatus::NoAccess | ErrorStatus::AuthorizationError,
///                 ..
///             },
///             ..
///         }
///     )
/// }
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid configuration or malformed table structure.
    #[error("configuration error: {0}")]
    Config(Box<str>),

    /// Invalid OID format.
    #[error("invalid OID: {0}")]
    InvalidOid(Box<str>),

    /// `set` was called without a type and the value shape has no mapping.
    #[error(
        "unable to autodetect type of {shape} value; pass one of {supported} as the value type"
    )]
    TypeInference {
        shape: ValueShape,
        supported: &'static str,
    },

    /// Explicit value type name is not one of the supported types.
    #[error("'{name}' is not one of the supported types: {supported}")]
    UnsupportedType {
        name: Box<str>,
        supported: &'static str,
    },

    /// Value cannot be represented as the requested protocol type.
    #[error("cannot convert value to {value_type}: {reason}")]
    InvalidValue {
        value_type: &'static str,
        reason: Box<str>,
    },

    /// Engine or device reported a failure.
    #[error("transport error{}: {source}", for_oid(.oid))]
    Transport {
        oid: Option<Oid>,
        #[source]
        source: EngineError,
    },
}

impl Error {
    /// Box this error (convenience for constructing boxed errors).
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Wrap an engine failure for the given OID.
    pub(crate) fn transport(oid: &Oid, source: EngineError) -> Box<Self> {
        Error::Transport {
            oid: Some(oid.clone()),
            source,
        }
        .boxed()
    }
}

fn for_oid(oid: &Option<Oid>) -> String {
    oid.as_ref().map(|o| format!(" for {}", o)).unwrap_or_default()
}

/// SNMP protocol error status codes (RFC 3416).
///
/// Devices return these inside a response PDU; the engine surfaces them as
/// [`EngineError::Protocol`], which the session wraps in [`Error::Transport`].
///
/// # Example
///
/// ```
/// use snmp_table::ErrorStatus;
///
/// let status = ErrorStatus::from_i32(2);
/// assert_eq!(status, ErrorStatus::NoSuchName);
/// assert_eq!(status.as_i32(), 2);
/// println!("Error: {}", status); // prints "noSuchName"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorStatus {
    /// Operation completed successfully (status = 0).
    NoError,
    /// Response message would be too large for transport (status = 1).
    TooBig,
    /// Requested OID not found (status = 2). SNMPv1 only; v2c+ uses exception values.
    NoSuchName,
    /// Invalid value provided in SET request (status = 3).
    BadValue,
    /// Attempted to SET a read-only object (status = 4).
    ReadOnly,
    /// Unspecified error occurred (status = 5).
    GenErr,
    /// Object exists but access is denied (status = 6).
    NoAccess,
    /// SET value has wrong ASN.1 type (status = 7).
    WrongType,
    /// SET value has incorrect length (status = 8).
    WrongLength,
    /// SET value uses wrong encoding (status = 9).
    WrongEncoding,
    /// SET value is out of range or otherwise invalid (status = 10).
    WrongValue,
    /// Object does not support row creation (status = 11).
    NoCreation,
    /// Value is inconsistent with other managed objects (status = 12).
    InconsistentValue,
    /// Resource required for SET is unavailable (status = 13).
    ResourceUnavailable,
    /// SET commit phase failed (status = 14).
    CommitFailed,
    /// SET undo phase failed (status = 15).
    UndoFailed,
    /// Access denied by VACM (status = 16).
    AuthorizationError,
    /// Object does not support modification (status = 17).
    NotWritable,
    /// Named object cannot be created (status = 18).
    InconsistentName,
    /// Unknown or future error status code.
    Unknown(i32),
}

impl ErrorStatus {
    /// Create from raw status code.
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => Self::NoError,
            1 => Self::TooBig,
            2 => Self::NoSuchName,
            3 => Self::BadValue,
            4 => Self::ReadOnly,
            5 => Self::GenErr,
            6 => Self::NoAccess,
            7 => Self::WrongType,
            8 => Self::WrongLength,
            9 => Self::WrongEncoding,
            10 => Self::WrongValue,
            11 => Self::NoCreation,
            12 => Self::InconsistentValue,
            13 => Self::ResourceUnavailable,
            14 => Self::CommitFailed,
            15 => Self::UndoFailed,
            16 => Self::AuthorizationError,
            17 => Self::NotWritable,
            18 => Self::InconsistentName,
            other => {
                tracing::warn!(target: "snmp_table::error", { snmp.error_status = other }, "unknown SNMP error status");
                Self::Unknown(other)
            }
        }
    }

    /// Convert to raw status code.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::NoError => 0,
            Self::TooBig => 1,
            Self::NoSuchName => 2,
            Self::BadValue => 3,
            Self::ReadOnly => 4,
            Self::GenErr => 5,
            Self::NoAccess => 6,
            Self::WrongType => 7,
            Self::WrongLength => 8,
            Self::WrongEncoding => 9,
            Self::WrongValue => 10,
            Self::NoCreation => 11,
            Self::InconsistentValue => 12,
            Self::ResourceUnavailable => 13,
            Self::CommitFailed => 14,
            Self::UndoFailed => 15,
            Self::AuthorizationError => 16,
            Self::NotWritable => 17,
            Self::InconsistentName => 18,
            Self::Unknown(code) => *code,
        }
    }
}

impl std::fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoError => write!(f, "noError"),
            Self::TooBig => write!(f, "tooBig"),
            Self::NoSuchName => write!(f, "noSuchName"),
            Self::BadValue => write!(f, "badValue"),
            Self::ReadOnly => write!(f, "readOnly"),
            Self::GenErr => write!(f, "genErr"),
            Self::NoAccess => write!(f, "noAccess"),
            Self::WrongType => write!(f, "wrongType"),
            Self::WrongLength => write!(f, "wrongLength"),
            Self::WrongEncoding => write!(f, "wrongEncoding"),
            Self::WrongValue => write!(f, "wrongValue"),
            Self::NoCreation => write!(f, "noCreation"),
            Self::InconsistentValue => write!(f, "inconsistentValue"),
            Self::ResourceUnavailable => write!(f, "resourceUnavailable"),
            Self::CommitFailed => write!(f, "commitFailed"),
            Self::UndoFailed => write!(f, "undoFailed"),
            Self::AuthorizationError => write!(f, "authorizationError"),
            Self::NotWritable => write!(f, "notWritable"),
            Self::InconsistentName => write!(f, "inconsistentName"),
            Self::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}
