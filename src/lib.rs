//! # snmp-table
//!
//! High-level SNMP reads, writes and table assembly on top of a pluggable
//! SNMP engine.
//!
//! ## Features
//!
//! - Tables reconstructed from GETBULK walks: row ids from OID suffixes,
//!   overshoot trimming, column aliases and value substitution
//! - Protocol values normalized to plain Rust values ([`NativeValue`])
//! - Type inference for `set`, or explicit protocol types by name
//! - SNMPv1, v2c and v3 (USM) credentials
//! - No network code of its own: any [`Engine`] implementation does the I/O
//!
//! ## Quick Start
//!
//! ```rust
//! use snmp_table::engine::MockEngine;
//! use snmp_table::table::TableRequest;
//! use snmp_table::{Auth, NativeValue, Session, Value, oid};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> snmp_table::Result<()> {
//!     let engine = MockEngine::new();
//!     let if_entry = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1);
//!     engine.insert(if_entry.child(2).child(1), "lo");
//!     engine.insert(if_entry.child(2).child(2), "eth0");
//!     engine.insert(if_entry.child(8).child(1), Value::Integer(1));
//!     engine.insert(if_entry.child(8).child(2), Value::Integer(2));
//!
//!     let session = Session::builder("192.0.2.1", Auth::v2c("public")).build(engine)?;
//!
//!     let request = TableRequest::new(if_entry)
//!         .column(2, "descr")
//!         .column(8, "status")
//!         .substitute("status", 1i32, "up")
//!         .substitute("status", 2i32, "down");
//!     let interfaces = session.table(&request).await?;
//!
//!     for row in interfaces.rows() {
//!         println!("{} {:?} {:?}", row.id(), row.get("descr"), row.get("status"));
//!     }
//!     let status = interfaces.column("status").unwrap();
//!     assert_eq!(status.count(&NativeValue::from("up")), 1);
//!     Ok(())
//! }
//! ```
//!
//! ## SNMPv3
//!
//! ```rust
//! use snmp_table::engine::MockEngine;
//! use snmp_table::{Auth, AuthProtocol, PrivProtocol, Session};
//!
//! let session = Session::builder(
//!     "192.0.2.1",
//!     Auth::usm("admin")
//!         .auth(AuthProtocol::Sha1, "authpass123")
//!         .privacy(PrivProtocol::Aes128, "privpass123"),
//! )
//! .build(MockEngine::new());
//! assert!(session.is_ok());
//! ```

pub mod engine;
pub mod error;
pub mod format;
pub mod native;
pub mod oid;
pub mod prelude;
pub mod session;
pub mod table;
pub mod value;
pub mod varbind;

pub use engine::{Engine, EngineError, EngineResult, Target};
pub use error::{Error, ErrorStatus, Result, ValueShape};
pub use native::{NativeValue, Normalizer, TextEncoding};
pub use oid::Oid;
pub use session::{
    Auth, AuthProtocol, CommunityVersion, ParseProtocolError, PrivProtocol, SecurityContext,
    SecurityLevel, Session, SessionBuilder, SessionConfig, SetValue, UsmAuth, UsmBuilder,
    ValueType,
};
pub use table::{ColumnKey, ColumnValues, Row, Table, TableRequest};
pub use value::Value;
pub use varbind::VarBind;

/// Testing utilities exposed via the `testing` feature.
#[cfg(feature = "testing")]
pub mod testing {
    pub use crate::engine::{MockEngine, MockOperation, RecordedRequest};
}
