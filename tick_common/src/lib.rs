//!
//! Common protocol types and utilities shared by the tick bridge and consumer.
//!
//! This crate aggregates:
//! - `error` — unified error type `BridgeError` used across the workspace.
//! - `result` — handy `Result<T, BridgeError>` alias.
//! - `framing` — newline-delimited framing over a byte stream.
//! - `command` — inbound trade command grammar (consumer -> bridge).
//! - `tick` — outbound tick payload and its wire encoding (bridge -> consumer).
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod framing;
pub mod command;
pub mod tick;
pub mod net;

pub use error::BridgeError;
pub use result::Result;
pub use command::{Command, Side};
pub use tick::{Tick, WireTick};
