use crate::native::NativeValue;
use std::collections::HashMap;
use std::ops::Deref;
use std::sync::OnceLock;

/// The values of one table column, in row order, with a cached frequency map.
///
/// ```
/// use snmp_table::NativeValue;
/// use snmp_table::table::ColumnValues;
///
/// let status = ColumnValues::new(vec!["up".into(), "down".into(), "up".into()]);
/// assert_eq!(status.count(&NativeValue::from("up")), 2);
/// assert_eq!(status.value_count().values().sum::<usize>(), status.len());
/// ```
#[derive(Debug, Default)]
pub struct ColumnValues {
    values: Vec<NativeValue>,
    counts: OnceLock<HashMap<NativeValue, usize>>,
}

impl ColumnValues {
    /// Wrap an ordered sequence of values.
    pub fn new(values: Vec<NativeValue>) -> Self {
        Self {
            values,
            counts: OnceLock::new(),
        }
    }

    /// Distinct value -> number of occurrences. Computed once, then cached.
    pub fn value_count(&self) -> &HashMap<NativeValue, usize> {
        self.counts.get_or_init(|| {
            let mut counts = HashMap::new();
            for value in &self.values {
                *counts.entry(value.clone()).or_insert(0) += 1;
            }
            counts
        })
    }

    /// Occurrences of `value`; zero when absent.
    pub fn count(&self, value: &NativeValue) -> usize {
        self.value_count().get(value).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NativeValue> {
        self.values.iter()
    }

    /// Consume into the underlying values.
    pub fn into_vec(self) -> Vec<NativeValue> {
        self.values
    }
}

impl Clone for ColumnValues {
    fn clone(&self) -> Self {
        Self::new(self.values.clone())
    }
}

impl PartialEq for ColumnValues {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Deref for ColumnValues {
    type Target = [NativeValue];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl From<Vec<NativeValue>> for ColumnValues {
    fn from(values: Vec<NativeValue>) -> Self {
        Self::new(values)
    }
}

impl<'a> IntoIterator for &'a ColumnValues {
    type Item = &'a NativeValue;
    type IntoIter = std::slice::Iter<'a, NativeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let col = ColumnValues::new(vec![
            NativeValue::from(1i32),
            NativeValue::from(2i32),
            NativeValue::from(1i32),
            NativeValue::from("1"),
        ]);
        let counts = col.value_count();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[&NativeValue::Integer(1)], 2);
        assert_eq!(col.count(&NativeValue::from("1")), 1);
        assert_eq!(col.count(&NativeValue::from("missing")), 0);
    }

    #[test]
    fn test_counts_cached() {
        let col = ColumnValues::new(vec!["a".into()]);
        assert!(std::ptr::eq(col.value_count(), col.value_count()));
    }

    #[test]
    fn test_empty() {
        let col = ColumnValues::default();
        assert!(col.is_empty());
        assert!(col.value_count().is_empty());
    }

    #[test]
    fn test_slice_access() {
        let col = ColumnValues::from(vec![NativeValue::from("x"), NativeValue::from("y")]);
        assert_eq!(col.len(), 2);
        assert_eq!(col.first(), Some(&NativeValue::from("x")));
        assert_eq!(col.iter().count(), 2);
        assert_eq!(col.clone(), col);
        assert_eq!(col.into_vec().len(), 2);
    }
}
