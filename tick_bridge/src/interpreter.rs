//! Inbound command polling, reassembly, and dispatch.
//!
//! The interpreter owns the persistent receive buffer. Once per tick it
//! drains at most one chunk from the socket, reassembles complete lines via
//! the framing layer, and dispatches each decoded command against the trading
//! host. Deep backlogs therefore drain across multiple ticks, never in one.
//! Every per-line failure — unknown keyword, bad numeric token, a host
//! rejection — is logged and dropped; nothing a consumer sends can tear down
//! the connection or the interpreter.
use log::{info, warn};

use tick_common::command::{Command, Side};
use tick_common::framing;

use crate::connection::ConnectionManager;
use crate::host::{OrderRequest, TradingHost};

/// Upper bound on bytes drained from the socket per driver cycle.
const READ_CHUNK: usize = 1024;

/// Decodes inbound lines into trade intents and applies them to the host.
pub struct CommandInterpreter {
    symbol: String,
    label: String,
    buffer: Vec<u8>,
}

impl CommandInterpreter {
    /// Creates an interpreter for the given instrument and position label.
    pub fn new(symbol: &str, label: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            label: label.to_string(),
            buffer: Vec::new(),
        }
    }

    /// Polls the socket once and dispatches every complete line received.
    ///
    /// Returns immediately while disconnected or when no bytes are pending;
    /// this call must never stall the per-tick driver.
    pub fn poll_and_dispatch<H: TradingHost>(
        &mut self,
        conn: &mut ConnectionManager,
        host: &mut H,
    ) {
        if !conn.is_connected() {
            return;
        }
        let mut chunk = [0u8; READ_CHUNK];
        let n = conn.read_available(&mut chunk);
        if n == 0 {
            return;
        }
        for line in framing::extract_lines(&mut self.buffer, &chunk[..n]) {
            self.handle_command(&line, host);
        }
    }

    /// Decodes and executes a single command line.
    fn handle_command<H: TradingHost>(&self, line: &str, host: &mut H) {
        match Command::parse(line) {
            Command::Close => self.close_all(host),
            Command::Order {
                side,
                lots,
                stop_loss_pips,
                take_profit_pips,
            } => self.place_order(host, side, lots, stop_loss_pips, take_profit_pips),
            Command::Invalid { raw, reason } => warn!("{}: {}", reason, raw),
        }
    }

    /// Closes every open position matching the configured label and symbol.
    /// Zero matches is not an error.
    fn close_all<H: TradingHost>(&self, host: &mut H) {
        let mut closed = 0;
        for position in host.find_open_positions(&self.label, &self.symbol) {
            match host.close_position(&position) {
                Ok(()) => closed += 1,
                Err(e) => warn!("Failed to close position {}: {}", position.id, e),
            }
        }
        info!(
            "Close command executed: {} position(s) closed with label '{}'",
            closed, self.label
        );
    }

    /// Resolves lots to host volume units and executes the market order.
    fn place_order<H: TradingHost>(
        &self,
        host: &mut H,
        side: Side,
        lots: f64,
        stop_loss_pips: Option<f64>,
        take_profit_pips: Option<f64>,
    ) {
        let volume = host.quantity_to_volume(&self.symbol, lots);
        let order = OrderRequest {
            side,
            symbol: self.symbol.clone(),
            volume,
            label: self.label.clone(),
            stop_loss_pips,
            take_profit_pips,
        };
        match host.execute_market_order(&order) {
            Ok(()) => info!(
                "Order sent: {} {} lots SL={} TP={} Label={}",
                side,
                lots,
                fmt_pips(stop_loss_pips),
                fmt_pips(take_profit_pips),
                self.label
            ),
            Err(e) => warn!("Order failed: {} {} lots: {}", side, lots, e),
        }
    }
}

fn fmt_pips(pips: Option<f64>) -> String {
    pips.map_or_else(|| "-".to_string(), |p| p.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tick_common::{BridgeError, Result, Tick};

    /// Host double that records every call the interpreter makes.
    #[derive(Default)]
    struct RecordingHost {
        orders: Vec<OrderRequest>,
        positions: Vec<crate::host::Position>,
        closed: Vec<u64>,
    }

    impl RecordingHost {
        fn with_positions(count: u64) -> Self {
            let positions = (0..count)
                .map(|id| crate::host::Position {
                    id,
                    label: "XXX".to_string(),
                    symbol: "EURUSD".to_string(),
                    side: Side::Buy,
                    volume: 1000.0,
                })
                .collect();
            Self {
                positions,
                ..Self::default()
            }
        }
    }

    impl TradingHost for RecordingHost {
        fn current_tick(&mut self, symbol: &str) -> Result<Tick> {
            Err(BridgeError::SymbolNotFound(symbol.to_string()))
        }

        fn quantity_to_volume(&self, _symbol: &str, lots: f64) -> f64 {
            lots * 100_000.0
        }

        fn execute_market_order(&mut self, order: &OrderRequest) -> Result<()> {
            self.orders.push(order.clone());
            Ok(())
        }

        fn find_open_positions(&self, label: &str, symbol: &str) -> Vec<crate::host::Position> {
            self.positions
                .iter()
                .filter(|p| p.label == label && p.symbol == symbol)
                .cloned()
                .collect()
        }

        fn close_position(&mut self, position: &crate::host::Position) -> Result<()> {
            self.positions.retain(|p| p.id != position.id);
            self.closed.push(position.id);
            Ok(())
        }
    }

    fn interpreter() -> CommandInterpreter {
        CommandInterpreter::new("EURUSD", "XXX")
    }

    #[test]
    fn buy_with_distances_reaches_the_host_fully_resolved() {
        let mut host = RecordingHost::default();
        interpreter().handle_command("BUY 1.5 10 20", &mut host);
        assert_eq!(host.orders.len(), 1);
        let order = &host.orders[0];
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.symbol, "EURUSD");
        assert_eq!(order.volume, 150_000.0);
        assert_eq!(order.label, "XXX");
        assert_eq!(order.stop_loss_pips, Some(10.0));
        assert_eq!(order.take_profit_pips, Some(20.0));
    }

    #[test]
    fn sell_without_distances_leaves_them_unset() {
        let mut host = RecordingHost::default();
        interpreter().handle_command("SELL 0.1", &mut host);
        assert_eq!(host.orders.len(), 1);
        let order = &host.orders[0];
        assert_eq!(order.side, Side::Sell);
        assert_eq!(order.volume, 10_000.0);
        assert_eq!(order.stop_loss_pips, None);
        assert_eq!(order.take_profit_pips, None);
    }

    #[test]
    fn unparsable_lot_size_sends_no_order() {
        let mut host = RecordingHost::default();
        interpreter().handle_command("BUY abc", &mut host);
        assert!(host.orders.is_empty());
    }

    #[test]
    fn close_closes_every_matching_position() {
        let mut host = RecordingHost::with_positions(2);
        interpreter().handle_command("CLOSE", &mut host);
        assert_eq!(host.closed, vec![0, 1]);
        assert!(host.positions.is_empty());
    }

    #[test]
    fn close_with_nothing_open_is_a_no_op() {
        let mut host = RecordingHost::default();
        interpreter().handle_command("CLOSE", &mut host);
        assert!(host.closed.is_empty());
    }

    #[test]
    fn close_only_touches_the_configured_label_and_symbol() {
        let mut host = RecordingHost::with_positions(1);
        host.positions.push(crate::host::Position {
            id: 99,
            label: "OTHER".to_string(),
            symbol: "EURUSD".to_string(),
            side: Side::Sell,
            volume: 500.0,
        });
        interpreter().handle_command("CLOSE", &mut host);
        assert_eq!(host.closed, vec![0]);
        assert_eq!(host.positions.len(), 1);
        assert_eq!(host.positions[0].id, 99);
    }

    #[test]
    fn unknown_keyword_sends_nothing() {
        let mut host = RecordingHost::default();
        interpreter().handle_command("HEDGE 1.5", &mut host);
        assert!(host.orders.is_empty());
        assert!(host.closed.is_empty());
    }
}
