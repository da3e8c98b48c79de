//! TCP connection lifecycle: connect, liveness, close, reconnect scheduling.
//!
//! The `ConnectionManager` is the only owner and mutator of the socket
//! handle. Its state machine has two states — connected (stream present) and
//! disconnected (stream absent) — and any send or receive failure immediately
//! forces the disconnected state. Reconnection is a fixed-interval retry with
//! no attempt cap: the driver asks [`ConnectionManager::due_for_reconnect`]
//! once per tick and calls [`ConnectionManager::connect`] when it is time.
//! Connectivity failures are recoverable by definition here, so they are
//! logged and absorbed, never raised to the driver.
use log::{info, warn};
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use tick_common::framing;
use tick_common::net;
use tick_common::{BridgeError, Result};

/// Upper bound on how long a single connect attempt may stall the driver.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Immutable connection target, supplied at startup.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Consumer hostname or IP address.
    pub host: String,
    /// Consumer TCP port.
    pub port: u16,
    /// Fixed interval between reconnect attempts.
    pub reconnect_interval: Duration,
}

impl Endpoint {
    /// Creates an endpoint from host, port, and reconnect seconds.
    pub fn new(host: &str, port: u16, reconnect_seconds: u64) -> Self {
        Self {
            host: host.to_string(),
            port,
            reconnect_interval: Duration::from_secs(reconnect_seconds),
        }
    }

    /// The endpoint formatted as `host:port`.
    pub fn addr(&self) -> String {
        net::addr(&self.host, self.port)
    }
}

/// Owns the TCP socket and its two-state lifecycle.
pub struct ConnectionManager {
    endpoint: Endpoint,
    stream: Option<TcpStream>,
    last_attempt: Option<Instant>,
}

impl ConnectionManager {
    /// Creates a manager in the disconnected state.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            stream: None,
            last_attempt: None,
        }
    }

    /// Attempts a fresh connection to the endpoint.
    ///
    /// Records the attempt time first (failures gate the next retry the same
    /// way successes do), closes any existing connection, then connects with
    /// a bounded timeout. Failure is logged and leaves the manager
    /// disconnected; it is never surfaced to the caller.
    pub fn connect(&mut self) {
        self.last_attempt = Some(Instant::now());
        self.close();
        match self.open_stream() {
            Ok(stream) => {
                info!("Connected to {}", self.endpoint.addr());
                self.stream = Some(stream);
            }
            Err(e) => warn!("Connect failed: {}", e),
        }
    }

    fn open_stream(&self) -> Result<TcpStream> {
        let addr = self.endpoint.addr();
        let target: SocketAddr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| BridgeError::Resolve(addr.clone()))?;
        let stream = TcpStream::connect_timeout(&target, CONNECT_TIMEOUT)?;
        // Inbound polling must never stall the tick driver.
        stream.set_nonblocking(true)?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }

    /// Returns `true` while a live stream handle is held.
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Returns `true` when the reconnect interval has elapsed since the last
    /// attempt (or when no attempt was ever made).
    pub fn due_for_reconnect(&self) -> bool {
        match self.last_attempt {
            None => true,
            Some(at) => at.elapsed() >= self.endpoint.reconnect_interval,
        }
    }

    /// Idempotently releases the socket. Shutdown errors are suppressed;
    /// cleanup is best effort.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }

    /// Frames `text` as one line and writes it to the socket.
    ///
    /// A write failure logs, forces the disconnected state, and returns the
    /// error so the caller can apply its own policy. With no stream held the
    /// call is a silent no-op.
    pub fn send_line(&mut self, text: &str) -> Result<()> {
        let Some(stream) = self.stream.as_mut() else {
            return Ok(());
        };
        let bytes = framing::encode_line(text);
        if let Err(e) = stream.write_all(&bytes) {
            warn!("Send failed: {}", e);
            self.close();
            return Err(e.into());
        }
        Ok(())
    }

    /// Non-blocking read of whatever inbound bytes are pending.
    ///
    /// Returns the number of bytes placed into `buf`; zero when disconnected,
    /// when nothing is pending, or at end of stream (a dead peer surfaces on
    /// the next send). A hard read error logs and forces the disconnected
    /// state.
    pub fn read_available(&mut self, buf: &mut [u8]) -> usize {
        let Some(stream) = self.stream.as_mut() else {
            return 0;
        };
        match stream.read(buf) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => 0,
            Err(e) => {
                warn!("Read failed: {}", e);
                self.close();
                0
            }
        }
    }
}
