//! Simulated trading host for the demo binary and integration tests.
//!
//! Prices follow a small random walk around the previous mid, the way a real
//! feed wiggles; orders land in an in-memory position book. Good enough to
//! exercise the whole bridge end to end without a live trading platform.
use chrono::Utc;
use rand::Rng;

use tick_common::{BridgeError, Result, Tick};

use crate::host::{OrderRequest, Position, TradingHost};

/// Volume units represented by one standard lot.
const UNITS_PER_LOT: f64 = 100_000.0;
/// Per-tick relative price drift bound.
const MAX_DRIFT: f64 = 0.0001;

/// In-memory trading host quoting a single instrument.
pub struct SimulatedHost {
    symbol: String,
    mid: f64,
    spread: f64,
    positions: Vec<Position>,
    next_id: u64,
}

impl SimulatedHost {
    /// Creates a host quoting `symbol` around `start_price` with the given
    /// bid/ask spread.
    pub fn new(symbol: &str, start_price: f64, spread: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            mid: start_price,
            spread,
            positions: Vec::new(),
            next_id: 1,
        }
    }

    /// Read-only view of the open position book.
    pub fn open_positions(&self) -> &[Position] {
        &self.positions
    }

    fn next_mid(&mut self) {
        let mut rng = rand::rng();
        let change: f64 = rng.random_range(-MAX_DRIFT..MAX_DRIFT);
        let new_mid = self.mid * (1.0 + change);
        // Keep the walk away from zero so bid stays positive.
        self.mid = new_mid.max(self.spread);
    }
}

impl TradingHost for SimulatedHost {
    fn current_tick(&mut self, symbol: &str) -> Result<Tick> {
        if symbol != self.symbol {
            return Err(BridgeError::SymbolNotFound(symbol.to_string()));
        }
        self.next_mid();
        Ok(Tick {
            symbol: self.symbol.clone(),
            time: Utc::now(),
            bid: self.mid - self.spread / 2.0,
            ask: self.mid + self.spread / 2.0,
        })
    }

    fn quantity_to_volume(&self, _symbol: &str, lots: f64) -> f64 {
        (lots * UNITS_PER_LOT).round()
    }

    fn execute_market_order(&mut self, order: &OrderRequest) -> Result<()> {
        if order.volume <= 0.0 {
            return Err(BridgeError::Order(format!(
                "volume must be positive, got {}",
                order.volume
            )));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.positions.push(Position {
            id,
            label: order.label.clone(),
            symbol: order.symbol.clone(),
            side: order.side,
            volume: order.volume,
        });
        Ok(())
    }

    fn find_open_positions(&self, label: &str, symbol: &str) -> Vec<Position> {
        self.positions
            .iter()
            .filter(|p| p.label == label && p.symbol == symbol)
            .cloned()
            .collect()
    }

    fn close_position(&mut self, position: &Position) -> Result<()> {
        let before = self.positions.len();
        self.positions.retain(|p| p.id != position.id);
        if self.positions.len() == before {
            return Err(BridgeError::Order(format!(
                "no open position with id {}",
                position.id
            )));
        }
        Ok(())
    }
}
