//!
//! Core of the tick bridge: streams market ticks from a trading host to an
//! external consumer over a persistent TCP connection and decodes trade
//! commands arriving on the same socket.
//!
//! Building blocks, leaf first:
//! - [`connection`] — TCP socket lifecycle with fixed-interval reconnection.
//! - [`publisher`] — serializes each tick to its JSON wire line and sends it.
//! - [`interpreter`] — non-blocking inbound poll, line reassembly, command
//!   dispatch against the trading host.
//! - [`session`] — the per-tick driver sequencing all of the above behind an
//!   explicit `on_start`/`on_tick`/`on_stop` lifecycle.
//! - [`host`] — the capability trait the surrounding trading host implements.
//! - [`sim`] — a simulated host (random-walk feed, in-memory position book)
//!   backing the demo binary and the integration tests.
//!
//! The whole core is single-threaded and cooperative: every socket operation
//! happens synchronously inside one `on_tick` invocation, fails fast, and is
//! absorbed into the log stream — the bridge degrades to "disconnected,
//! retrying" rather than halting.
#![warn(missing_docs)]
pub mod connection;
pub mod host;
pub mod interpreter;
pub mod publisher;
pub mod session;
pub mod sim;
