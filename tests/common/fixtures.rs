//! Standard test fixtures with realistic MIB data.

use bytes::Bytes;
use snmp_table::{Oid, Value, VarBind, oid};

/// IF-MIB::ifEntry (1.3.6.1.2.1.2.2.1).
pub const IF_ENTRY: [u32; 9] = [1, 3, 6, 1, 2, 1, 2, 2, 1];

pub fn if_entry() -> Oid {
    Oid::from(IF_ENTRY)
}

pub fn sys_descr() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)
}

pub fn sys_uptime() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)
}

pub fn sys_name() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)
}

pub fn sys_location() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 6, 0)
}

/// Standard system MIB entries (1.3.6.1.2.1.1).
pub fn system_mib() -> Vec<VarBind> {
    vec![
        VarBind::new(sys_descr(), "Linux core-sw1 5.15.0"),
        VarBind::new(
            oid!(1, 3, 6, 1, 2, 1, 1, 2, 0),
            Value::ObjectIdentifier(oid!(1, 3, 6, 1, 4, 1, 8072, 3, 2, 10)),
        ),
        VarBind::new(sys_uptime(), Value::TimeTicks(123456)),
        VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 4, 0), "noc@example.net"),
        VarBind::new(sys_name(), "core-sw1"),
        VarBind::new(sys_location(), "Rack 4"),
        VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 7, 0), Value::Integer(72)),
    ]
}

/// eth0 hardware address; not valid UTF-8.
pub const ETH0_MAC: [u8; 6] = [0x00, 0x50, 0x56, 0xa1, 0xb2, 0xc3];

/// eth1 hardware address; not valid UTF-8.
pub const ETH1_MAC: [u8; 6] = [0x00, 0x50, 0x56, 0xa1, 0xb2, 0xc4];

/// Three interfaces with ifIndex, ifDescr, ifType, ifPhysAddress,
/// ifOperStatus and ifInOctets (Counter32).
pub fn if_table() -> Vec<VarBind> {
    let entry = if_entry();
    let col = |c: u32, row: u32| entry.child(c).child(row);
    let mut out = Vec::new();

    for (row, descr, if_type, mac, status, octets) in [
        (1u32, "lo", 24, &[][..], 1, 1_000u32),
        (2, "eth0", 6, &ETH0_MAC[..], 1, 2_500_000),
        (3, "eth1", 6, &ETH1_MAC[..], 2, 0),
    ] {
        out.push(VarBind::new(col(1, row), Value::Integer(row as i32)));
        out.push(VarBind::new(col(2, row), descr));
        out.push(VarBind::new(col(3, row), Value::Integer(if_type)));
        out.push(VarBind::new(
            col(6, row),
            Value::OctetString(Bytes::copy_from_slice(mac)),
        ));
        out.push(VarBind::new(col(8, row), Value::Integer(status)));
        out.push(VarBind::new(col(10, row), Value::Counter32(octets)));
    }

    // Sort into walk order (column-major).
    out.sort_by(|a, b| a.oid.cmp(&b.oid));
    out
}
