//! Command-line arguments for the tick bridge binary.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;

use tick_common::net::{DEFAULT_HOST, DEFAULT_LABEL, DEFAULT_PORT, DEFAULT_RECONNECT_SECS};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Consumer hostname or IP address to connect to.
    #[clap(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Consumer TCP port.
    #[clap(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Fixed interval between reconnect attempts, in seconds.
    #[clap(long, default_value_t = DEFAULT_RECONNECT_SECS)]
    pub reconnect_seconds: u64,

    /// Label attached to positions opened through the bridge.
    #[clap(long, default_value = DEFAULT_LABEL)]
    pub label: String,

    /// Instrument symbol streamed by the simulated feed.
    #[clap(long, default_value = "EURUSD")]
    pub symbol: String,

    /// Simulated feed cadence, in milliseconds per tick.
    #[clap(long, default_value_t = 100)]
    pub tick_millis: u64,
}
