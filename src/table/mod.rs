//! Row/column tables assembled from walked varbinds.
//!
//! A [`Table`] is produced by [`Session::table`](crate::Session::table) (or
//! directly by [`TableAssembler`]) and is immutable afterwards. Two views are
//! derived lazily and cached on first access:
//!
//! - [`Table::rows`]: one [`Row`] per row id, in first-seen order, each carrying
//!   a trailing [`ROW_ID_KEY`] entry.
//! - [`Table::columns`]: one [`ColumnValues`] per column key, holding the values
//!   of every row that defines that column.
//!
//! ```
//! use snmp_table::{oid, Value, VarBind};
//! use snmp_table::table::{ColumnKey, TableAssembler, TableRequest};
//!
//! let base = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1);
//! let request = TableRequest::new(base.clone()).column(2, "descr");
//! let walked = vec![
//!     VarBind::new(base.child(2).child(1), "lo"),
//!     VarBind::new(base.child(2).child(2), "eth0"),
//!     VarBind::new(base.child(8).child(1), Value::Integer(1)),
//! ];
//!
//! let table = TableAssembler::new(&request).assemble(&walked).unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.row("2").unwrap().get("descr").unwrap().as_str(), Some("eth0"));
//! assert_eq!(table.row("1").unwrap().get(8u32).unwrap().as_integer(), Some(1));
//! assert_eq!(table.columns()[&ColumnKey::from("descr")].len(), 2);
//! ```

mod assemble;
mod column;

pub use assemble::{
    DEFAULT_MAX_REPETITIONS, DEFAULT_NON_REPEATERS, TableAssembler, TableRequest, trim_to_subtree,
};
pub use column::ColumnValues;

use crate::native::NativeValue;
use indexmap::IndexMap;
use std::sync::OnceLock;

/// Key of the synthetic column holding each row's id in [`Table::rows`].
pub const ROW_ID_KEY: &str = "_row_id";

/// Column identifier: the raw column arc, or its configured alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKey {
    /// Unaliased column, keyed by its numeric sub-identifier.
    Id(u32),
    /// Aliased column (or the synthetic row id column).
    Name(String),
}

impl ColumnKey {
    /// The synthetic `_row_id` key.
    pub fn row_id() -> Self {
        ColumnKey::Name(ROW_ID_KEY.to_owned())
    }
}

impl From<u32> for ColumnKey {
    fn from(id: u32) -> Self {
        ColumnKey::Id(id)
    }
}

impl From<&str> for ColumnKey {
    fn from(name: &str) -> Self {
        ColumnKey::Name(name.to_owned())
    }
}

impl From<String> for ColumnKey {
    fn from(name: String) -> Self {
        ColumnKey::Name(name)
    }
}

impl std::fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKey::Id(id) => write!(f, "{}", id),
            ColumnKey::Name(name) => write!(f, "{}", name),
        }
    }
}

type RowValues = IndexMap<ColumnKey, NativeValue>;

/// One row of a [`Table`].
///
/// Values are in column insertion order, followed by a [`ROW_ID_KEY`] entry
/// holding the row id as text.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    id: String,
    values: RowValues,
}

impl Row {
    /// Row id: the dotted index suffix, e.g. `"10.5"`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Value of a column, by id or alias.
    pub fn get(&self, key: impl Into<ColumnKey>) -> Option<&NativeValue> {
        self.values.get(&key.into())
    }

    /// All `(column, value)` pairs, including the trailing row id.
    pub fn iter(&self) -> impl Iterator<Item = (&ColumnKey, &NativeValue)> {
        self.values.iter()
    }

    /// Number of entries, including the row id.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; a row carries at least its id.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An assembled SNMP table.
#[derive(Debug, Default)]
pub struct Table {
    rows: IndexMap<String, RowValues>,
    row_views: OnceLock<Vec<Row>>,
    column_views: OnceLock<IndexMap<ColumnKey, ColumnValues>>,
}

impl Table {
    /// Store a value; a repeated `(row, column)` slot keeps the latest value.
    pub(crate) fn insert(&mut self, row_id: String, column: ColumnKey, value: NativeValue) {
        self.rows.entry(row_id).or_default().insert(column, value);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row ids in first-seen order.
    pub fn row_ids(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Row-oriented view, built on first call.
    pub fn rows(&self) -> &[Row] {
        self.row_views.get_or_init(|| {
            self.rows
                .iter()
                .map(|(id, values)| {
                    let mut values = values.clone();
                    values.insert(ColumnKey::row_id(), NativeValue::Text(id.clone()));
                    Row {
                        id: id.clone(),
                        values,
                    }
                })
                .collect()
        })
    }

    /// Look up a row by id.
    pub fn row(&self, id: &str) -> Option<&Row> {
        let index = self.rows.get_index_of(id)?;
        self.rows().get(index)
    }

    /// Column-oriented view, built on first call.
    ///
    /// Rows lacking a column are skipped rather than padded, so columns may
    /// differ in length. The row id column is not included.
    pub fn columns(&self) -> &IndexMap<ColumnKey, ColumnValues> {
        self.column_views.get_or_init(|| {
            let mut collected: IndexMap<ColumnKey, Vec<NativeValue>> = IndexMap::new();
            for values in self.rows.values() {
                for (key, value) in values {
                    collected.entry(key.clone()).or_default().push(value.clone());
                }
            }
            collected
                .into_iter()
                .map(|(key, values)| (key, ColumnValues::new(values)))
                .collect()
        })
    }

    /// Values of one column, by id or alias.
    pub fn column(&self, key: impl Into<ColumnKey>) -> Option<&ColumnValues> {
        self.columns().get(&key.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::default();
        t.insert("10".into(), 1u32.into(), "A".into());
        t.insert("10".into(), 2u32.into(), NativeValue::from(5i32));
        t.insert("11".into(), 1u32.into(), "B".into());
        t.insert("12".into(), 2u32.into(), NativeValue::from(7i32));
        t
    }

    #[test]
    fn test_row_order_and_ids() {
        let t = sample();
        assert_eq!(t.len(), 3);
        assert_eq!(t.row_ids().collect::<Vec<_>>(), ["10", "11", "12"]);
        let ids: Vec<_> = t.rows().iter().map(Row::id).collect();
        assert_eq!(ids, ["10", "11", "12"]);
    }

    #[test]
    fn test_row_view_trailing_id() {
        let t = sample();
        let row = t.row("10").unwrap();
        let keys: Vec<_> = row.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, [ColumnKey::Id(1), ColumnKey::Id(2), ColumnKey::row_id()]);
        assert_eq!(row.get(ROW_ID_KEY), Some(&NativeValue::Text("10".into())));
        assert_eq!(row.len(), 3);
        assert!(t.row("99").is_none());
    }

    #[test]
    fn test_columns_skip_missing() {
        let t = sample();
        let cols = t.columns();
        assert_eq!(cols.keys().cloned().collect::<Vec<_>>(), [ColumnKey::Id(1), ColumnKey::Id(2)]);
        assert_eq!(&cols[&ColumnKey::Id(1)][..], &["A".into(), "B".into()]);
        assert_eq!(&t.column(2u32).unwrap()[..], &[NativeValue::from(5i32), NativeValue::from(7i32)]);
        assert!(t.column(ROW_ID_KEY).is_none());
    }

    #[test]
    fn test_views_cached() {
        let t = sample();
        assert!(std::ptr::eq(t.rows(), t.rows()));
        assert!(std::ptr::eq(t.columns(), t.columns()));
    }

    #[test]
    fn test_last_write_wins() {
        let mut t = Table::default();
        t.insert("1".into(), "status".into(), "up".into());
        t.insert("1".into(), "status".into(), "down".into());
        assert_eq!(t.row("1").unwrap().get("status").unwrap().as_str(), Some("down"));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_empty_table() {
        let t = Table::default();
        assert!(t.is_empty());
        assert!(t.rows().is_empty());
        assert!(t.columns().is_empty());
    }

    #[test]
    fn test_column_key_display() {
        assert_eq!(ColumnKey::Id(3).to_string(), "3");
        assert_eq!(ColumnKey::from("ifDescr").to_string(), "ifDescr");
    }
}
