//! The per-tick driver loop and its lifecycle.
//!
//! `BridgeSession` sequences one tick event end to end: liveness check,
//! reconnect-if-due, publish, drain inbound commands. It owns all mutable
//! bridge state (connection, counters, receive buffer via the interpreter),
//! so a fresh instance per test or per run is fully isolated. No error of any
//! kind unwinds past this layer; the host's tick callback only ever observes
//! a clean return.
use log::{info, warn};

use crate::connection::{ConnectionManager, Endpoint};
use crate::host::TradingHost;
use crate::interpreter::CommandInterpreter;
use crate::publisher::TickPublisher;

/// Static bridge configuration, assembled from the CLI at startup.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Consumer endpoint and reconnect policy.
    pub endpoint: Endpoint,
    /// Instrument the bridge streams and trades.
    pub symbol: String,
    /// Label attached to positions opened through the bridge.
    pub label: String,
}

/// Lifecycle the embedding application drives.
///
/// Whatever produces tick events — a trading platform callback, a timer, a
/// test harness — wires them to these three operations.
pub trait Lifecycle {
    /// Invoked once before the first tick.
    fn on_start(&mut self);
    /// Invoked once per market tick. Never blocks indefinitely.
    fn on_tick(&mut self);
    /// Invoked once on shutdown.
    fn on_stop(&mut self);
}

/// The bridge core: one session per process, driven tick by tick.
pub struct BridgeSession<H: TradingHost> {
    symbol: String,
    conn: ConnectionManager,
    publisher: TickPublisher,
    interpreter: CommandInterpreter,
    host: H,
    ticks_seen: u64,
}

impl<H: TradingHost> BridgeSession<H> {
    /// Builds a session around the given host. No I/O happens until
    /// [`Lifecycle::on_start`].
    pub fn new(config: BridgeConfig, host: H) -> Self {
        Self {
            symbol: config.symbol.clone(),
            conn: ConnectionManager::new(config.endpoint),
            publisher: TickPublisher::new(),
            interpreter: CommandInterpreter::new(&config.symbol, &config.label),
            host,
            ticks_seen: 0,
        }
    }

    /// The trading host this session drives.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Ticks observed so far, connected or not.
    pub fn ticks_seen(&self) -> u64 {
        self.ticks_seen
    }

    /// Whether the session currently holds a live connection.
    pub fn is_connected(&self) -> bool {
        self.conn.is_connected()
    }
}

impl<H: TradingHost> Lifecycle for BridgeSession<H> {
    fn on_start(&mut self) {
        self.conn.connect();
    }

    fn on_tick(&mut self) {
        self.ticks_seen += 1;

        if !self.conn.is_connected() {
            if self.conn.due_for_reconnect() {
                self.conn.connect();
            }
            return;
        }

        let tick = match self.host.current_tick(&self.symbol) {
            Ok(tick) => tick,
            Err(e) => {
                warn!("Tick read failed: {}", e);
                return;
            }
        };
        self.publisher.publish(&mut self.conn, &tick);
        self.interpreter.poll_and_dispatch(&mut self.conn, &mut self.host);
    }

    fn on_stop(&mut self) {
        self.conn.close();
        info!(
            "Bridge stopped after {} tick(s), {} published",
            self.ticks_seen,
            self.publisher.sent()
        );
    }
}
