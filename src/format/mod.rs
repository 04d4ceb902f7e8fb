//! Formatting helpers for raw SNMP byte strings.
//!
//! Devices frequently report addresses as OCTET STRING payloads. These helpers
//! render them the way operators expect to read them.
//!
//! ```
//! use snmp_table::format;
//!
//! assert_eq!(format::ipv4_address(&[192, 168, 1, 1]), "192.168.1.1");
//! assert_eq!(
//!     format::mac_address(&[0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]),
//!     "00:1a:2b:3c:4d:5e"
//! );
//! assert_eq!(format::hex::encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
//! ```

pub mod hex;

/// Render bytes as dotted-decimal octets.
///
/// Every byte becomes one decimal component, so a 4-byte input yields an IPv4
/// address. Other lengths are rendered the same way rather than rejected.
pub fn ipv4_address(bytes: &[u8]) -> String {
    join(bytes, ".", |b| b.to_string())
}

/// Render bytes as a colon-separated, lowercase hardware address.
pub fn mac_address(bytes: &[u8]) -> String {
    join(bytes, ":", |b| format!("{:02x}", b))
}

fn join(bytes: &[u8], sep: &str, part: impl Fn(u8) -> String) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(&part(*b));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_address() {
        assert_eq!(ipv4_address(&[10, 0, 0, 254]), "10.0.0.254");
        assert_eq!(ipv4_address(&[0, 0, 0, 0]), "0.0.0.0");
        assert_eq!(ipv4_address(&[]), "");
    }

    #[test]
    fn test_mac_address() {
        assert_eq!(
            mac_address(&[0xAA, 0xBB, 0x0C, 0x00, 0x01, 0xff]),
            "aa:bb:0c:00:01:ff"
        );
        assert_eq!(mac_address(&[0x05]), "05");
    }
}
