//! Object Identifier (OID) type.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>` to avoid heap allocation for common OIDs.
//! Table column and row addresses are derived from OIDs by arc arithmetic, never by
//! string slicing.

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;

/// Object Identifier.
///
/// Stored as a sequence of arc values (u32). Uses SmallVec to avoid
/// heap allocation for OIDs with 16 or fewer arcs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Create an OID from arc values.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_table::oid::Oid;
    ///
    /// let oid = Oid::new(vec![1, 3, 6, 1, 2, 1]);
    /// assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1]);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Create an OID from a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted string notation (e.g., "1.3.6.1.2.1.1.1.0").
    ///
    /// Leading and trailing separators are ignored, so `".1.3.6.1."` parses the
    /// same as `"1.3.6.1"`. Arcs must be base-10 unsigned integers.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_table::oid::Oid;
    ///
    /// let oid = Oid::parse(".1.3.6.1.2.1.2.2.").unwrap();
    /// assert_eq!(oid.to_string(), "1.3.6.1.2.1.2.2");
    ///
    /// assert!(Oid::parse("1.3.six.1").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_matches('.');
        if trimmed.is_empty() {
            return Ok(Self::empty());
        }

        let mut arcs = SmallVec::new();

        for part in trimmed.split('.') {
            let arc: u32 = part
                .parse()
                .map_err(|_| Error::InvalidOid(format!("'{}' in '{}'", part, s).into()).boxed())?;
            arcs.push(arc);
        }

        Ok(Self { arcs })
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Check if this OID starts with another OID.
    ///
    /// An OID always starts with itself, and any OID starts with an empty OID.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_table::oid::Oid;
    ///
    /// let sys_descr = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
    /// let system = Oid::parse("1.3.6.1.2.1.1").unwrap();
    /// let interfaces = Oid::parse("1.3.6.1.2.1.2").unwrap();
    ///
    /// assert!(sys_descr.starts_with(&system));
    /// assert!(!sys_descr.starts_with(&interfaces));
    /// assert!(sys_descr.starts_with(&sys_descr));
    /// ```
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.len() >= other.arcs.len() && self.arcs[..other.arcs.len()] == other.arcs[..]
    }

    /// Check if this OID lies strictly below `root` in the tree.
    ///
    /// Unlike [`starts_with`](Self::starts_with), an OID is never a descendant
    /// of itself. `1.3.6.1.2.1.2.20` is not a descendant of `1.3.6.1.2.1.2.2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_table::oid;
    ///
    /// let column = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2);
    /// assert!(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 7).is_descendant_of(&column));
    /// assert!(!column.is_descendant_of(&column));
    /// assert!(!oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 3, 7).is_descendant_of(&column));
    /// ```
    pub fn is_descendant_of(&self, root: &Oid) -> bool {
        self.arcs.len() > root.arcs.len() && self.starts_with(root)
    }

    /// Return the arcs following `prefix`, or `None` if `prefix` does not match.
    pub fn strip_prefix(&self, prefix: &Oid) -> Option<&[u32]> {
        if self.starts_with(prefix) {
            Some(&self.arcs[prefix.arcs.len()..])
        } else {
            None
        }
    }

    /// Create a child OID by appending an arc.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_table::oid::Oid;
    ///
    /// let if_entry = Oid::parse("1.3.6.1.2.1.2.2.1").unwrap();
    /// assert_eq!(if_entry.child(2).to_string(), "1.3.6.1.2.1.2.2.1.2");
    /// ```
    pub fn child(&self, arc: u32) -> Oid {
        let mut arcs = self.arcs.clone();
        arcs.push(arc);
        Oid { arcs }
    }
}

/// Render arcs as dotted text without building an intermediate [`Oid`].
pub(crate) fn dotted(arcs: &[u32]) -> String {
    let mut out = String::with_capacity(arcs.len() * 4);
    for (i, arc) in arcs.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&arc.to_string());
    }
    out
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

/// Macro to create an OID from literal arcs.
///
/// # Examples
///
/// ```
/// use snmp_table::oid;
///
/// let if_table = oid!(1, 3, 6, 1, 2, 1, 2, 2);
/// assert_eq!(if_table.to_string(), "1.3.6.1.2.1.2.2");
///
/// // Trailing commas are allowed
/// let sys_name = oid!(1, 3, 6, 1, 2, 1, 1, 5, 0,);
/// assert_eq!(sys_name.len(), 9);
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1, 1, 1, 0]);
    }

    #[test]
    fn test_parse_strips_separators() {
        let oid = Oid::parse(".1.3.6.1.").unwrap();
        assert_eq!(oid, oid!(1, 3, 6, 1));

        assert!(Oid::parse("").unwrap().is_empty());
        assert!(Oid::parse("...").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_inner_empty_arc() {
        assert!(Oid::parse("1..3").is_err());
    }

    #[test]
    fn test_parse_leading_zero_arc() {
        // Zero-padded arcs compare by numeric value
        let oid = Oid::parse("1.3.06.01").unwrap();
        assert_eq!(oid, oid!(1, 3, 6, 1));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Oid::parse("1.3.abc.1").is_err());
        assert!(Oid::parse("1.3.-6.1").is_err());
        assert!(matches!(
            *Oid::parse("1.x").unwrap_err(),
            Error::InvalidOid(_)
        ));
    }

    #[test]
    fn test_display() {
        let oid = Oid::from_slice(&[1, 3, 6, 1, 2, 1, 1, 1, 0]);
        assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.1.0");
    }

    #[test]
    fn test_starts_with() {
        let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
        let prefix = Oid::parse("1.3.6.1").unwrap();
        assert!(oid.starts_with(&prefix));
        assert!(!prefix.starts_with(&oid));
    }

    #[test]
    fn test_is_descendant_of() {
        let root = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1);
        assert!(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1, 10).is_descendant_of(&root));
        assert!(!root.is_descendant_of(&root));
        // Sibling whose last arc shares a textual prefix
        assert!(!oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 10, 1).is_descendant_of(&root));
        assert!(!oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 10).is_descendant_of(&root));
    }

    #[test]
    fn test_strip_prefix() {
        let base = oid!(1, 3, 6, 1);
        assert_eq!(
            oid!(1, 3, 6, 1, 2, 10, 5).strip_prefix(&base),
            Some(&[2, 10, 5][..])
        );
        assert_eq!(base.strip_prefix(&base), Some(&[][..]));
        assert_eq!(oid!(1, 3, 7).strip_prefix(&base), None);
    }

    #[test]
    fn test_dotted() {
        assert_eq!(dotted(&[10, 5]), "10.5");
        assert_eq!(dotted(&[7]), "7");
        assert_eq!(dotted(&[]), "");
    }

    #[test]
    fn test_child() {
        let oid = oid!(1, 3, 6, 1);
        assert_eq!(oid.child(2), oid!(1, 3, 6, 1, 2));
        assert_eq!(Oid::empty().child(1), oid!(1));
    }

    #[test]
    fn test_ordering() {
        let a = oid!(1, 3, 6, 1, 2);
        let b = oid!(1, 3, 6, 1, 10);
        let c = oid!(1, 3, 6, 1, 2, 1);
        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
    }

    #[test]
    fn test_oid_fromstr() {
        let oid: Oid = "1.3.6.1.2.1.1.1.0".parse().unwrap();
        assert_eq!(oid, oid!(1, 3, 6, 1, 2, 1, 1, 1, 0));

        let original = oid!(1, 3, 6, 1, 4, 1, 9, 9, 42);
        let parsed: Oid = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }
}
