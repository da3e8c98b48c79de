//! Error types shared between the bridge and the consumer.
//!
//! The `BridgeError` enum unifies common failure cases for I/O, serialization,
//! channel communication, and trading-host logic, allowing crates to propagate
//! a single error type.
use std::io;

use thiserror::Error;

/// Unified error type shared by the bridge and the consumer.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// I/O error originating from the standard library or sockets.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Hostname did not resolve to any socket address.
    #[error("Address resolution failed for: {0}")]
    Resolve(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Crossbeam/channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Crossbeam/channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// The trading host rejected an order or position operation.
    #[error("Order rejected: {0}")]
    Order(String),

    /// A tick was requested for a symbol the trading host does not quote.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
}
