//! Outbound tick publishing.
//!
//! One tick in, at most one wire line out. Ticks are lossy while the
//! connection is down: there is no buffering and no retry of a skipped tick,
//! the consumer simply resynchronizes on the next published price.
use log::info;

use tick_common::Tick;

use crate::connection::ConnectionManager;

/// Every Nth sent tick gets a diagnostic log entry (plus the very first).
const LOG_EVERY: u64 = 50;

/// Serializes ticks to the wire and tracks how many were sent.
#[derive(Debug, Default)]
pub struct TickPublisher {
    sent: u64,
}

impl TickPublisher {
    /// Creates a publisher with a zeroed counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks successfully handed to the socket.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Publishes one tick, skipping entirely while disconnected.
    ///
    /// A send failure has already transitioned the connection to
    /// disconnected and logged; the tick is simply dropped.
    pub fn publish(&mut self, conn: &mut ConnectionManager, tick: &Tick) {
        if !conn.is_connected() {
            return;
        }
        let line = tick.wire_line();
        if conn.send_line(&line).is_err() {
            return;
        }
        self.sent += 1;
        if self.sent == 1 || self.sent % LOG_EVERY == 0 {
            info!("Sent tick {}: {}", self.sent, line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Endpoint;
    use chrono::Utc;

    #[test]
    fn disconnected_publish_is_skipped_entirely() {
        let mut conn = ConnectionManager::new(Endpoint::new("127.0.0.1", 9001, 3));
        let mut publisher = TickPublisher::new();
        let tick = Tick {
            symbol: "EURUSD".to_string(),
            time: Utc::now(),
            bid: 1.1,
            ask: 1.1001,
        };
        publisher.publish(&mut conn, &tick);
        assert_eq!(publisher.sent(), 0);
    }
}
