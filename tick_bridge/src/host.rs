//! Capability trait for the trading host the bridge is embedded in.
//!
//! The bridge treats the host as a black box: it reads the current tick from
//! it and hands it trade intents decoded from the wire. Implementations log
//! through the `log` facade, so host diagnostics and bridge diagnostics land
//! in one stream.
use tick_common::command::Side;
use tick_common::{Result, Tick};

/// A resolved market order, ready for execution by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Buy or sell.
    pub side: Side,
    /// Instrument symbol.
    pub symbol: String,
    /// Volume in the host's native units (already converted from lots).
    pub volume: f64,
    /// Label attached to the resulting position.
    pub label: String,
    /// Optional stop-loss distance in pips.
    pub stop_loss_pips: Option<f64>,
    /// Optional take-profit distance in pips.
    pub take_profit_pips: Option<f64>,
}

/// An open trade held by the trading host.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Host-assigned position identifier.
    pub id: u64,
    /// Label the position was opened with.
    pub label: String,
    /// Instrument symbol.
    pub symbol: String,
    /// Direction of the position.
    pub side: Side,
    /// Volume in the host's native units.
    pub volume: f64,
}

/// Minimal capability set the bridge consumes from its trading host.
pub trait TradingHost {
    /// Current bid/ask/server-time for `symbol`.
    fn current_tick(&mut self, symbol: &str) -> Result<Tick>;

    /// Converts a lot quantity into the host's native volume units.
    fn quantity_to_volume(&self, symbol: &str, lots: f64) -> f64;

    /// Executes a market order.
    fn execute_market_order(&mut self, order: &OrderRequest) -> Result<()>;

    /// All open positions matching `label` and `symbol`.
    fn find_open_positions(&self, label: &str, symbol: &str) -> Vec<Position>;

    /// Closes a single open position.
    fn close_position(&mut self, position: &Position) -> Result<()>;
}
