//! SNMP session facade.
//!
//! A [`Session`] binds an [`Engine`] to one agent and one set of credentials,
//! and offers three operations:
//!
//! - [`Session::get`]: read one value, normalized.
//! - [`Session::set`]: write one value, inferring its protocol type when none
//!   is given.
//! - [`Session::table`]: walk a table and assemble it into rows and columns.
//!
//! Every engine failure surfaces as [`Error::Transport`] and is not retried
//! here; retries belong to the engine.

mod auth;
mod builder;
mod set;

pub use auth::{
    Auth, AuthProtocol, CommunityVersion, ParseProtocolError, PrivProtocol, SecurityContext,
    SecurityLevel, UsmAuth, UsmBuilder,
};
pub use builder::SessionBuilder;
pub use set::{SUPPORTED_TYPES, SetValue, ValueType, infer, is_ipv4_address};

use std::time::Duration;

use tracing::instrument;

use crate::engine::{DEFAULT_PORT, Engine, Target};
use crate::error::{Error, Result};
use crate::native::{NativeValue, Normalizer, TextEncoding};
use crate::oid::Oid;
use crate::table::{
    DEFAULT_MAX_REPETITIONS, DEFAULT_NON_REPEATERS, Table, TableAssembler, TableRequest,
    trim_to_subtree,
};
use crate::value::Value;

/// Default per-attempt timeout (1 second).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Default number of retries after the first attempt.
pub const DEFAULT_RETRIES: u32 = 5;

/// Session configuration.
///
/// Most users should use [`SessionBuilder`] rather than constructing this directly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Agent UDP port (default: 161)
    pub port: u16,
    /// Per-attempt timeout (default: 1 second)
    pub timeout: Duration,
    /// Retries after the first attempt (default: 5)
    pub retries: u32,
    /// Max-repetitions for table walks (default: 20)
    pub max_repetitions: u32,
    /// Non-repeaters for table walks (default: 0)
    pub non_repeaters: u32,
    /// Encoding used to decode OCTET STRING values (default: UTF-8)
    pub text_encoding: TextEncoding,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            max_repetitions: DEFAULT_MAX_REPETITIONS,
            non_repeaters: DEFAULT_NON_REPEATERS,
            text_encoding: TextEncoding::default(),
        }
    }
}

/// A session with one SNMP agent.
///
/// # Example
///
/// ```rust
/// use snmp_table::engine::MockEngine;
/// use snmp_table::table::TableRequest;
/// use snmp_table::{Auth, NativeValue, Session, oid};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> snmp_table::Result<()> {
/// let engine = MockEngine::new();
/// engine.insert(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), "core-sw1");
/// engine.insert(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 1), "lo");
/// engine.insert(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 2), "eth0");
///
/// let session = Session::builder("192.0.2.1", Auth::v2c("public")).build(engine)?;
///
/// let name = session.get(&oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)).await?;
/// assert_eq!(name, NativeValue::from("core-sw1"));
///
/// let interfaces = session
///     .table(&TableRequest::parse("1.3.6.1.2.1.2.2.1")?.column(2, "descr"))
///     .await?;
/// assert_eq!(interfaces.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Session<E> {
    engine: E,
    target: Target,
    auth: Auth,
    security: SecurityContext,
    config: SessionConfig,
    normalizer: Normalizer,
}

impl Session<()> {
    /// Start building a session for `host`.
    pub fn builder(host: impl Into<String>, auth: impl Into<Auth>) -> SessionBuilder {
        SessionBuilder::new(host, auth)
    }
}

impl<E: Engine> Session<E> {
    pub(crate) fn from_parts(engine: E, target: Target, auth: Auth, config: SessionConfig) -> Self {
        let security = auth.security_context();
        let normalizer = Normalizer::new(config.text_encoding);
        Self {
            engine,
            target,
            auth,
            security,
            config,
            normalizer,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get a single value, normalized.
    ///
    /// A missing object is not an error in SNMPv2c/v3: the agent answers with
    /// `noSuchObject`/`noSuchInstance`, returned as [`NativeValue::Raw`].
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] if the engine or device reports a failure.
    #[instrument(skip(self), err, fields(snmp.target = %self.target, snmp.oid = %oid))]
    pub async fn get(&self, oid: &Oid) -> Result<NativeValue> {
        let value = self
            .engine
            .get_single(&self.target, &self.security, oid)
            .await
            .map_err(|e| Error::transport(oid, e))?;
        Ok(self.normalizer.normalize(&value))
    }

    /// Set a single value and return the agent's echo, normalized.
    ///
    /// With `value_type` of `None` the protocol type is inferred (see
    /// [`SetValue`]); otherwise the value is converted to that type.
    ///
    /// # Errors
    ///
    /// - [`Error::TypeInference`] for bytes or booleans without a type.
    /// - [`Error::InvalidValue`] if the value does not fit the requested type.
    /// - [`Error::Transport`] if the engine or device reports a failure.
    ///
    /// No request is sent when typing fails.
    #[instrument(skip(self, value), err, fields(snmp.target = %self.target, snmp.oid = %oid))]
    pub async fn set(
        &self,
        oid: &Oid,
        value: impl Into<SetValue>,
        value_type: Option<ValueType>,
    ) -> Result<NativeValue> {
        let value = value.into();
        let typed = match value_type {
            Some(value_type) => value_type.convert(&value)?,
            None => infer(&value)?,
        };
        tracing::debug!(target: "snmp_table::session", { snmp.value_type = typed.type_name() }, "typed set value");
        self.send_set(oid, typed).await
    }

    /// Set a single value that is already a protocol [`Value`].
    #[instrument(skip(self, value), err, fields(snmp.target = %self.target, snmp.oid = %oid))]
    pub async fn set_value(&self, oid: &Oid, value: Value) -> Result<NativeValue> {
        self.send_set(oid, value).await
    }

    async fn send_set(&self, oid: &Oid, value: Value) -> Result<NativeValue> {
        let echoed = self
            .engine
            .set_single(&self.target, &self.security, oid, value)
            .await
            .map_err(|e| Error::transport(oid, e))?;
        Ok(self.normalizer.normalize(&echoed))
    }

    /// Walk a table and assemble it.
    ///
    /// Walks either the whole table entry or, with
    /// [`fetch_all_columns(false)`](TableRequest::fetch_all_columns), one walk
    /// per aliased column, in order. Entries that overshoot each walked
    /// subtree are dropped before assembly.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the request is invalid (checked before any walk)
    ///   or a returned OID cannot be split into column and row.
    /// - [`Error::Transport`] if any walk fails; no partial table is returned.
    #[instrument(skip(self, request), err, fields(snmp.target = %self.target, snmp.table = %request.base()))]
    pub async fn table(&self, request: &TableRequest) -> Result<Table> {
        request.validate()?;

        let non_repeaters = request
            .non_repeaters_override()
            .unwrap_or(self.config.non_repeaters);
        let max_repetitions = request
            .max_repetitions_override()
            .unwrap_or(self.config.max_repetitions);

        let mut walked = Vec::new();
        for root in request.column_roots() {
            let mut entries = self
                .engine
                .bulk_walk(
                    &self.target,
                    &self.security,
                    &root,
                    non_repeaters,
                    max_repetitions,
                )
                .await
                .map_err(|e| Error::transport(&root, e))?;
            let received = entries.len();
            let trimmed = trim_to_subtree(&mut entries, &root);
            tracing::debug!(target: "snmp_table::session", { snmp.column_root = %root, snmp.varbind_count = received, snmp.trimmed = trimmed }, "walked column");
            walked.append(&mut entries);
        }

        TableAssembler::new(request)
            .normalizer(self.normalizer)
            .assemble(&walked)
    }
}
