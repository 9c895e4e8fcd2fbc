//! Android TV media-player integration over the ADB server.
//!
//! [`adb`] talks to the ADB server, [`androidtv`] turns `dumpsys` output into
//! player state and sends remote-control input, [`registry`] and [`poller`]
//! manage a set of configured TVs.

pub mod adb;
pub mod androidtv;
pub mod config;
pub mod poller;
pub mod registry;

pub use adb::{AdbError, AdbResult, ConnectionGateway, RustAdbServer};
pub use androidtv::{Action, AndroidTvPlayer, DeviceState, PowerState};
pub use config::Config;
pub use registry::{DeviceRegistry, ServiceCall};
