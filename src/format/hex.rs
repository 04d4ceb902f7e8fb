//! Hexadecimal rendering for byte payloads.

use std::fmt;

/// Encode bytes as a lowercase hex string.
///
/// # Examples
///
/// ```
/// use snmp_table::format::hex::encode;
///
/// assert_eq!(encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    Bytes(bytes).to_string()
}

/// Lazy hex formatter for log fields; nothing is allocated unless displayed.
///
/// ```
/// use snmp_table::format::hex::Bytes;
///
/// assert_eq!(format!("{}", Bytes(&[0x00, 0xff])), "00ff");
/// ```
pub struct Bytes<'a>(pub &'a [u8]);

impl fmt::Display for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{:02x}", b))
    }
}

impl fmt::Debug for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
