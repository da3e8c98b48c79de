//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `BridgeError`, so functions can simply return `Result<T>`.
use crate::error::BridgeError;

/// Workspace-wide `Result` alias with `BridgeError` as the default error.
pub type Result<T, E = BridgeError> = std::result::Result<T, E>;
