//! Table Fetching Example
//!
//! Fetches the interfaces table from an in-memory agent and shows the
//! different views of the result:
//! - rows keyed by index, with aliased column names
//! - columns with value counts
//! - a selected-column fetch with value substitution
//!
//! Run with: cargo run --example table

use snmp_table::testing::MockEngine;
use snmp_table::{Auth, Session, TableRequest, Value, VarBind, format, oid};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("snmp_table=debug".parse()?),
        )
        .init();

    // ifEntry: ifDescr (2), ifPhysAddress (6), ifOperStatus (8)
    let if_entry = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1);
    let engine = MockEngine::new();
    for (index, descr, mac, status) in [
        (1u32, "lo", &[][..], 1i32),
        (2, "eth0", &[0x00, 0x50, 0x56, 0xa1, 0xb2, 0xc3][..], 1),
        (3, "eth1", &[0x00, 0x50, 0x56, 0xa1, 0xb2, 0xc4][..], 2),
    ] {
        engine.extend([
            VarBind::new(if_entry.child(2).child(index), descr),
            VarBind::new(if_entry.child(6).child(index), mac),
            VarBind::new(if_entry.child(8).child(index), Value::Integer(status)),
        ]);
    }

    let session = Session::builder("192.0.2.1", Auth::v2c("public")).build(engine)?;

    // =========================================================================
    // Example 1: Whole table, one walk
    // =========================================================================
    println!("--- ifTable (all columns) ---\n");

    let request = TableRequest::new(if_entry.clone()).columns([
        (2, "descr"),
        (6, "mac"),
        (8, "status"),
    ]);
    let table = session.table(&request).await?;

    for row in table.rows() {
        let descr = row.get("descr").and_then(|v| v.as_str()).unwrap_or("");
        // Non-UTF-8 addresses stay as bytes after normalization.
        let mac = row
            .get("mac")
            .and_then(|v| v.as_bytes())
            .map(format::mac_address)
            .unwrap_or_default();
        let status = row.get("status").and_then(|v| v.as_integer());
        println!("  [{}] {descr:<6} mac={mac:<17} status={status:?}", row.id());
    }

    // =========================================================================
    // Example 2: Column view and value counts
    // =========================================================================
    println!("\n--- status counts ---\n");

    if let Some(status) = table.column("status") {
        for (value, count) in status.value_count() {
            println!("  {value}: {count}");
        }
    }

    // =========================================================================
    // Example 3: Selected columns with substitution
    // =========================================================================
    println!("\n--- ifOperStatus only, substituted ---\n");

    let request = TableRequest::new(if_entry)
        .column(8, "status")
        .substitutions("status", [(1i32, "up"), (2i32, "down")])
        .fetch_all_columns(false);
    let table = session.table(&request).await?;

    for row in table.rows() {
        if let Some(status) = row.get("status") {
            println!("  {}: {}", row.id(), status);
        }
    }

    Ok(())
}
