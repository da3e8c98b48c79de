//! Tick bridge demo binary.
//!
//! Streams ticks from a simulated trading host to a consumer over TCP and
//! applies commands the consumer sends back. The simulated feed stands in for
//! a live trading platform: every `--tick-millis` it produces one bid/ask
//! update and drives the session's `on_tick`, exactly the way a platform
//! tick callback would.
//!
//! Usage example (CLI):
//! ```bash
//! tick_bridge --host 127.0.0.1 --port 9001 --symbol EURUSD --label XXX
//! ```
//!
//! Start `tick_consumer` first (or at any later point — the bridge retries on
//! a fixed interval until the consumer is reachable).
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tick_bridge::connection::Endpoint;
use tick_bridge::session::{BridgeConfig, BridgeSession, Lifecycle};
use tick_bridge::sim::SimulatedHost;

/// Opening mid price of the simulated feed.
const START_PRICE: f64 = 1.1;
/// Bid/ask spread of the simulated feed.
const SPREAD: f64 = 0.00022;

fn main() {
    init_logger();
    let args = Args::parse();

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down bridge...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .expect("Error setting Ctrl+C handler");
    }

    let config = BridgeConfig {
        endpoint: Endpoint::new(&args.host, args.port, args.reconnect_seconds),
        symbol: args.symbol.clone(),
        label: args.label.clone(),
    };
    let host = SimulatedHost::new(&args.symbol, START_PRICE, SPREAD);
    let mut session = BridgeSession::new(config, host);

    info!(
        "Bridge starting: {} -> {}:{} (label '{}')",
        args.symbol, args.host, args.port, args.label
    );
    session.on_start();

    let interval = Duration::from_millis(args.tick_millis);
    while !shutdown.load(Ordering::Relaxed) {
        session.on_tick();
        thread::sleep(interval);
    }

    session.on_stop();
    info!(
        "{} simulated position(s) still open",
        session.host().open_positions().len()
    );
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
