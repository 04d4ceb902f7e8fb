//! Shared test infrastructure for snmp-table.
//!
//! Provides MIB fixtures and a session wired to a MockEngine.

// Allow dead code and unused imports since not all test files use all utilities
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;

pub use fixtures::{
    ETH0_MAC, ETH1_MAC, IF_ENTRY, if_entry, if_table, sys_descr, sys_location, sys_name, sys_uptime, system_mib,
};

use snmp_table::testing::MockEngine;
use snmp_table::{Auth, Session};

/// Session against `engine` with v2c "public" and default settings.
pub fn session(engine: &MockEngine) -> Session<MockEngine> {
    Session::builder("192.0.2.10", Auth::v2c("public"))
        .build(engine.clone())
        .expect("valid session config")
}

/// Engine preloaded with the system group and the interface table.
pub fn agent() -> MockEngine {
    let engine = MockEngine::with_varbinds(system_mib());
    engine.extend(if_table());
    engine
}

/// Route library logs to the test harness; `RUST_LOG` overrides the default.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("snmp_table=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
