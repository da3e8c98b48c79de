//! Command-line arguments for the tick consumer.
use clap::Parser;

use tick_common::net::DEFAULT_PORT;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address to listen on for bridge connections.
    #[clap(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// TCP port to listen on.
    #[clap(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}
