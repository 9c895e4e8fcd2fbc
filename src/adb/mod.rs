// ADB module - thin layer over the `adb_client` server connection
// This module answers reachability questions about the local ADB server and
// hands out per-device shell channels.

pub mod error;
pub mod gateway;
pub mod rust_impl;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

// Re-export the main types and functions for easy access
pub use error::{AdbError, AdbResult, ParseError};
pub use gateway::ConnectionGateway;
pub use rust_impl::{RustAdbServer, RustAdbShell, parse_socket_addr};
pub use types::{AdbServerApi, ConnectionStatus, Device, ShellChannel};
