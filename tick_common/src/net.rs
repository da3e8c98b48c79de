//! Shared networking constants and helpers used by the bridge and consumer.

/// Default consumer address the bridge connects to.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default TCP port for the tick/command channel.
pub const DEFAULT_PORT: u16 = 9001;
/// Default fixed reconnect interval, in seconds.
pub const DEFAULT_RECONNECT_SECS: u64 = 3;
/// Default label attached to positions opened through the bridge.
pub const DEFAULT_LABEL: &str = "XXX";

/// Helper to format an address with a port like "host:port".
pub fn addr(host: &str, port: u16) -> String {
    format!("{}:{}", host, port)
}
