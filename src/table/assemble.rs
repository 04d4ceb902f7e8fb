//! Table request configuration and varbind-to-table assembly.

use super::{ColumnKey, Table};
use crate::error::{Error, Result};
use crate::native::{NativeValue, Normalizer};
use crate::oid::{Oid, dotted};
use crate::varbind::VarBind;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Default max-repetitions for table walks.
pub const DEFAULT_MAX_REPETITIONS: u32 = 20;

/// Default non-repeaters for table walks.
pub const DEFAULT_NON_REPEATERS: u32 = 0;

/// Describes which table to fetch and how to shape the result.
///
/// # Example
///
/// ```rust
/// use snmp_table::table::TableRequest;
///
/// // IF-MIB::ifTable, fetching only ifDescr and ifOperStatus.
/// let request = TableRequest::parse(".1.3.6.1.2.1.2.2.1")
///     .unwrap()
///     .column(2, "descr")
///     .column(8, "status")
///     .substitute("status", 1i32, "up")
///     .substitute("status", 2i32, "down")
///     .fetch_all_columns(false);
///
/// assert!(request.validate().is_ok());
/// assert_eq!(request.column_roots().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TableRequest {
    base: Oid,
    columns: IndexMap<u32, String>,
    substitutions: HashMap<ColumnKey, HashMap<NativeValue, NativeValue>>,
    non_repeaters: Option<u32>,
    max_repetitions: Option<u32>,
    fetch_all_columns: bool,
}

impl TableRequest {
    /// Request for the table rooted at `base` (the table entry OID).
    pub fn new(base: Oid) -> Self {
        Self {
            base,
            columns: IndexMap::new(),
            substitutions: HashMap::new(),
            non_repeaters: None,
            max_repetitions: None,
            fetch_all_columns: true,
        }
    }

    /// Parse the base OID from dotted text.
    pub fn parse(base: &str) -> Result<Self> {
        Ok(Self::new(Oid::parse(base)?))
    }

    /// Alias column `id` as `name`.
    ///
    /// With `fetch_all_columns(false)` the aliased columns are also the ones
    /// walked, in the order they were added.
    pub fn column(mut self, id: u32, name: impl Into<String>) -> Self {
        self.columns.insert(id, name.into());
        self
    }

    /// Alias several columns at once.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        self.columns
            .extend(columns.into_iter().map(|(id, name)| (id, name.into())));
        self
    }

    /// Replace `raw` with `replacement` in `column`.
    ///
    /// `column` is matched after aliasing, so an aliased column must be
    /// addressed by its alias. `raw` is matched against the normalized value.
    pub fn substitute(
        mut self,
        column: impl Into<ColumnKey>,
        raw: impl Into<NativeValue>,
        replacement: impl Into<NativeValue>,
    ) -> Self {
        self.substitutions
            .entry(column.into())
            .or_default()
            .insert(raw.into(), replacement.into());
        self
    }

    /// Add several substitutions for one column.
    pub fn substitutions<I, R, V>(mut self, column: impl Into<ColumnKey>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, V)>,
        R: Into<NativeValue>,
        V: Into<NativeValue>,
    {
        self.substitutions
            .entry(column.into())
            .or_default()
            .extend(pairs.into_iter().map(|(r, v)| (r.into(), v.into())));
        self
    }

    /// Non-repeaters for each walk (default: the session's, normally 0).
    pub fn non_repeaters(mut self, n: u32) -> Self {
        self.non_repeaters = Some(n);
        self
    }

    /// Max-repetitions for each walk (default: the session's, normally 20).
    ///
    /// Must be at least 1; [`validate`](Self::validate) rejects 0.
    pub fn max_repetitions(mut self, n: u32) -> Self {
        self.max_repetitions = Some(n);
        self
    }

    /// Walk the whole table in one pass (default), or only the aliased columns.
    pub fn fetch_all_columns(mut self, enabled: bool) -> Self {
        self.fetch_all_columns = enabled;
        self
    }

    pub fn base(&self) -> &Oid {
        &self.base
    }

    pub fn is_fetch_all_columns(&self) -> bool {
        self.fetch_all_columns
    }

    /// Configured non-repeaters, if overridden.
    pub fn non_repeaters_override(&self) -> Option<u32> {
        self.non_repeaters
    }

    /// Configured max-repetitions, if overridden.
    pub fn max_repetitions_override(&self) -> Option<u32> {
        self.max_repetitions
    }

    /// Check the request before any walk is issued.
    pub fn validate(&self) -> Result<()> {
        if !self.fetch_all_columns && self.columns.is_empty() {
            return Err(Error::Config(
                "no columns given and fetch_all_columns is disabled".into(),
            )
            .boxed());
        }
        if self.max_repetitions == Some(0) {
            return Err(Error::Config("max_repetitions must be at least 1".into()).boxed());
        }
        Ok(())
    }

    /// Subtree roots to walk, in order.
    pub fn column_roots(&self) -> Vec<Oid> {
        if self.fetch_all_columns {
            vec![self.base.clone()]
        } else {
            self.columns.keys().map(|&id| self.base.child(id)).collect()
        }
    }

    fn resolve(&self, column: u32) -> ColumnKey {
        match self.columns.get(&column) {
            Some(name) => ColumnKey::Name(name.clone()),
            None => ColumnKey::Id(column),
        }
    }
}

/// Drop trailing varbinds that fell outside `root`.
///
/// Bulk walks overshoot into the next subtree. Entries are popped from the end
/// until the last one lies strictly below `root` (or none remain). Returns the
/// number of entries removed.
///
/// ```
/// use snmp_table::{oid, VarBind};
/// use snmp_table::table::trim_to_subtree;
///
/// let root = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1);
/// let mut walked = vec![
///     VarBind::new(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1, 1), 1i32),
///     VarBind::new(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 1), "lo"),
/// ];
/// assert_eq!(trim_to_subtree(&mut walked, &root), 1);
/// assert_eq!(walked.len(), 1);
/// ```
pub fn trim_to_subtree(entries: &mut Vec<VarBind>, root: &Oid) -> usize {
    let before = entries.len();
    while let Some(last) = entries.last()
        && !last.is_under(root)
    {
        entries.pop();
    }
    before - entries.len()
}

/// Builds a [`Table`] from walked varbinds.
#[derive(Debug, Clone)]
pub struct TableAssembler<'a> {
    request: &'a TableRequest,
    normalizer: Normalizer,
}

impl<'a> TableAssembler<'a> {
    /// Assembler for `request`, normalizing text as UTF-8.
    pub fn new(request: &'a TableRequest) -> Self {
        Self {
            request,
            normalizer: Normalizer::default(),
        }
    }

    /// Use a different normalizer (e.g. another text encoding).
    pub fn normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Assemble `entries` into rows.
    ///
    /// For each entry the base OID is stripped; the next arc is the column and
    /// the remaining arcs, dotted, are the row id. Values are normalized, the
    /// column is aliased, and any substitution for that column is applied.
    /// Rows appear in first-seen order; a repeated `(row, column)` keeps the
    /// last value.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if an entry is not under the base OID or has no row
    /// index after the column arc.
    pub fn assemble(&self, entries: &[VarBind]) -> Result<Table> {
        let mut table = Table::default();
        for vb in entries {
            let (column, row_id) = self.split(&vb.oid)?;
            let key = self.request.resolve(column);
            let mut value = self.normalizer.normalize(&vb.value);
            if let Some(replacement) = self
                .request
                .substitutions
                .get(&key)
                .and_then(|map| map.get(&value))
            {
                value = replacement.clone();
            }
            table.insert(row_id, key, value);
        }

        tracing::trace!(target: "snmp_table::table", { snmp.table = %self.request.base, snmp.varbind_count = entries.len(), snmp.row_count = table.len() }, "assembled table");

        Ok(table)
    }

    fn split(&self, oid: &Oid) -> Result<(u32, String)> {
        let base = &self.request.base;
        let suffix = oid.strip_prefix(base).ok_or_else(|| {
            Error::Config(format!("{} is not under table {}", oid, base).into()).boxed()
        })?;
        match suffix {
            [column, row @ ..] if !row.is_empty() => Ok((*column, dotted(row))),
            _ => Err(Error::Config(
                format!("{} has no row index under table {}", oid, base).into(),
            )
            .boxed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;
    use crate::value::Value;

    fn base() -> Oid {
        oid!(1, 3, 6, 1, 2, 1, 2, 2, 1)
    }

    fn vb(column: u32, row: &[u32], value: impl Into<Value>) -> VarBind {
        let mut oid = base().child(column);
        for &arc in row {
            oid = oid.child(arc);
        }
        VarBind::new(oid, value)
    }

    #[test]
    fn test_rows_from_two_columns() {
        let request = TableRequest::new(base());
        let entries = vec![
            vb(1, &[10], "A"),
            vb(2, &[10], 5i32),
            vb(1, &[11], "B"),
            vb(2, &[11], 6i32),
        ];
        let table = TableAssembler::new(&request).assemble(&entries).unwrap();

        assert_eq!(table.row_ids().collect::<Vec<_>>(), ["10", "11"]);
        let row = table.row("10").unwrap();
        assert_eq!(row.get(1u32), Some(&NativeValue::from("A")));
        assert_eq!(row.get(2u32), Some(&NativeValue::Integer(5)));
        let row = table.row("11").unwrap();
        assert_eq!(row.get(1u32), Some(&NativeValue::from("B")));
        assert_eq!(row.get(2u32), Some(&NativeValue::Integer(6)));
    }

    #[test]
    fn test_alias_then_substitute() {
        let request = TableRequest::new(base())
            .column(1, "status")
            .substitutions("status", [(1i32, "up"), (2i32, "down")]);
        let table = TableAssembler::new(&request)
            .assemble(&[vb(1, &[1], 1i32), vb(1, &[2], 2i32), vb(1, &[3], 3i32)])
            .unwrap();

        assert_eq!(table.row("1").unwrap().get("status"), Some(&NativeValue::from("up")));
        assert_eq!(table.row("2").unwrap().get("status"), Some(&NativeValue::from("down")));
        assert_eq!(table.row("3").unwrap().get("status"), Some(&NativeValue::Integer(3)));
        assert!(table.row("1").unwrap().get(1u32).is_none());
    }

    #[test]
    fn test_substitution_keyed_by_raw_id_when_unaliased() {
        let request = TableRequest::new(base()).substitute(7u32, 1i32, "enabled");
        let table = TableAssembler::new(&request)
            .assemble(&[vb(7, &[4], 1i32)])
            .unwrap();
        assert_eq!(table.row("4").unwrap().get(7u32), Some(&NativeValue::from("enabled")));
    }

    #[test]
    fn test_multi_arc_row_id() {
        let request = TableRequest::new(base());
        let table = TableAssembler::new(&request)
            .assemble(&[vb(3, &[10, 5], "x")])
            .unwrap();
        let row = table.row("10.5").unwrap();
        assert_eq!(row.id(), "10.5");
        assert_eq!(row.get(crate::table::ROW_ID_KEY), Some(&NativeValue::from("10.5")));
    }

    #[test]
    fn test_missing_row_index_is_config_error() {
        let request = TableRequest::new(base());
        let err = TableAssembler::new(&request)
            .assemble(&[VarBind::new(base().child(1), 1i32)])
            .unwrap_err();
        assert!(matches!(*err, Error::Config(_)));
    }

    #[test]
    fn test_outside_base_is_config_error() {
        let request = TableRequest::new(base());
        let err = TableAssembler::new(&request)
            .assemble(&[VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), "sys")])
            .unwrap_err();
        assert!(matches!(*err, Error::Config(_)));
    }

    #[test]
    fn test_trim_drops_only_trailing_outsiders() {
        let root = base().child(1);
        let mut entries = vec![
            vb(1, &[1], 1i32),
            vb(1, &[2], 2i32),
            vb(2, &[1], "lo"),
            vb(2, &[2], "eth0"),
        ];
        assert_eq!(trim_to_subtree(&mut entries, &root), 2);
        assert_eq!(entries, vec![vb(1, &[1], 1i32), vb(1, &[2], 2i32)]);
    }

    #[test]
    fn test_trim_everything_or_nothing() {
        let root = base().child(9);
        let mut entries = vec![vb(1, &[1], 1i32)];
        assert_eq!(trim_to_subtree(&mut entries, &root), 1);
        assert!(entries.is_empty());

        let mut empty: Vec<VarBind> = Vec::new();
        assert_eq!(trim_to_subtree(&mut empty, &root), 0);
    }

    #[test]
    fn test_trim_rejects_root_itself() {
        let root = base().child(1);
        let mut entries = vec![vb(1, &[1], 1i32), VarBind::new(root.clone(), 0i32)];
        assert_eq!(trim_to_subtree(&mut entries, &root), 1);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_validate_and_roots() {
        let err = TableRequest::new(base())
            .fetch_all_columns(false)
            .validate()
            .unwrap_err();
        assert!(matches!(*err, Error::Config(_)));

        let request = TableRequest::new(base())
            .columns([(8, "status"), (2, "descr")])
            .fetch_all_columns(false);
        assert!(request.validate().is_ok());
        assert_eq!(
            request.column_roots(),
            vec![base().child(8), base().child(2)]
        );
        assert_eq!(
            TableRequest::new(base()).column(2, "descr").column_roots(),
            vec![base()]
        );
    }

    #[test]
    fn test_validate_zero_max_repetitions() {
        let err = TableRequest::new(base())
            .max_repetitions(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("max_repetitions"));
        assert!(TableRequest::new(base()).max_repetitions(1).validate().is_ok());
        assert!(TableRequest::new(base()).non_repeaters(0).validate().is_ok());
    }

    #[test]
    fn test_parse_base() {
        let request = TableRequest::parse(".1.3.6.1.2.1.2.2.1.").unwrap();
        assert_eq!(request.base(), &base());
        assert!(TableRequest::parse("1.3.x").is_err());
    }
}
