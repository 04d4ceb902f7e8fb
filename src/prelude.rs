//! Common imports.
//!
//! ```rust
//! use snmp_table::prelude::*;
//! ```

pub use crate::engine::{Engine, Target};
pub use crate::error::{Error, Result};
pub use crate::native::{NativeValue, TextEncoding};
pub use crate::oid;
pub use crate::oid::Oid;
pub use crate::session::{Auth, AuthProtocol, PrivProtocol, Session, SetValue, ValueType};
pub use crate::table::{ColumnKey, Row, Table, TableRequest};
pub use crate::value::Value;
pub use crate::varbind::VarBind;
