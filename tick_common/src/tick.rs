//! Outbound tick payload and its wire encoding (bridge -> consumer).
//!
//! Every price update crosses the wire as exactly one JSON line:
//!
//! ```text
//! {"symbol":"EURUSD","time":"2025-01-01T00:00:00.000Z","bid":1.23456,"ask":1.23478}
//! ```
//!
//! Key order, the 5-decimal fixed formatting of `bid`/`ask`, and the
//! millisecond-precision `Z`-suffixed timestamp are all part of the protocol,
//! so the outbound line is built by [`Tick::wire_line`] rather than a generic
//! serializer (serde_json emits shortest-round-trip floats, which cannot
//! produce a fixed `1.20000`). The receive side decodes through serde into
//! [`WireTick`].
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::result::Result;

/// A single bid/ask price update, as read from the trading host.
///
/// Ticks are not retained after transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Instrument symbol (e.g., `EURUSD`).
    pub symbol: String,
    /// Host server time of the update, UTC.
    pub time: DateTime<Utc>,
    /// Best bid price.
    pub bid: f64,
    /// Best ask price.
    pub ask: f64,
}

impl Tick {
    /// Formats the tick as its exact wire representation (without the
    /// trailing newline, which the framing layer appends).
    pub fn wire_line(&self) -> String {
        format!(
            "{{\"symbol\":\"{}\",\"time\":\"{}\",\"bid\":{:.5},\"ask\":{:.5}}}",
            self.symbol,
            self.time.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.bid,
            self.ask
        )
    }
}

/// Decoded view of one outbound tick line.
///
/// Used by the consumer and by tests; the timestamp stays a string because
/// display is all the receive side needs from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTick {
    /// Instrument symbol.
    pub symbol: String,
    /// ISO-8601 timestamp with millisecond precision and `Z` suffix.
    pub time: String,
    /// Best bid price.
    pub bid: f64,
    /// Best ask price.
    pub ask: f64,
}

impl WireTick {
    /// Decodes a single wire line.
    pub fn from_json(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }
}
