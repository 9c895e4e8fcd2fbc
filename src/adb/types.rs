// Core ADB types and traits
use super::error::AdbResult;
use serde::Serialize;
use std::collections::BTreeSet;

/// A blocking shell channel to one device.
///
/// Every command the crate sends to a device, diagnostic dumps and key
/// injection alike, goes through [`ShellChannel::shell`].
pub trait ShellChannel {
    fn shell(&mut self, command: &str) -> AdbResult<String>;
}

impl<C: ShellChannel + ?Sized> ShellChannel for Box<C> {
    fn shell(&mut self, command: &str) -> AdbResult<String> {
        (**self).shell(command)
    }
}

/// The subset of an ADB server the gateway relies on.
pub trait AdbServerApi {
    type Shell: ShellChannel;

    fn list_devices(&mut self) -> AdbResult<Vec<Device>>;
    /// Equivalent of `adb connect <host>`.
    fn connect_device(&mut self, host: &str) -> AdbResult<()>;
    fn open_shell(&mut self, serial: &str) -> AdbResult<Self::Shell>;
}

#[derive(Debug, PartialEq, Serialize, Clone)]
pub struct Device {
    pub name: String,
    pub state: String,
}

/// Reachability answers, recomputed on demand and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub server_reachable: bool,
    pub known_serials: BTreeSet<String>,
}
