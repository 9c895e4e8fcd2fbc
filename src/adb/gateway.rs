use super::error::{AdbError, AdbResult};
use super::types::{AdbServerApi, ConnectionStatus};

/// Answers "is the ADB server reachable" and "is this device attached".
///
/// Transport errors never escape the two queries: they are logged at debug
/// level and reported as `false`. The device list from the last successful
/// [`is_server_reachable`](Self::is_server_reachable) call is cached and used
/// for every [`is_device_connected`](Self::is_device_connected) lookup.
pub struct ConnectionGateway<S> {
    server: S,
    known_serials: Option<Vec<String>>,
}

impl<S: AdbServerApi> ConnectionGateway<S> {
    pub fn new(server: S) -> Self {
        Self {
            server,
            known_serials: None,
        }
    }

    pub fn is_server_reachable(&mut self) -> bool {
        match self.server.list_devices() {
            Ok(devices) => {
                self.known_serials = Some(devices.into_iter().map(|d| d.name).collect());
                true
            }
            Err(e) => {
                log::debug!("ADB server listing failed: {e}");
                self.known_serials = None;
                false
            }
        }
    }

    /// Substring match of `serial_or_host` against the cached serials, so
    /// `192.168.1.5` matches a device listed as `192.168.1.5:5555`.
    pub fn is_device_connected(&self, serial_or_host: &str) -> bool {
        self.resolve_serial(serial_or_host).is_some()
    }

    pub fn status(&self) -> ConnectionStatus {
        ConnectionStatus {
            server_reachable: self.known_serials.is_some(),
            known_serials: self
                .known_serials
                .iter()
                .flatten()
                .cloned()
                .collect(),
        }
    }

    pub fn known_serials(&self) -> &[String] {
        self.known_serials.as_deref().unwrap_or_default()
    }

    /// Asks the server to attach a network device, then refreshes the cache.
    pub fn connect_device(&mut self, host: &str) -> AdbResult<()> {
        self.server.connect_device(host)?;
        self.is_server_reachable();
        Ok(())
    }

    /// Opens a shell to the cached serial equal to `serial_or_host`, else to
    /// the first one containing it.
    pub fn open_shell(&mut self, serial_or_host: &str) -> AdbResult<S::Shell> {
        let serial = self
            .exact_serial(serial_or_host)
            .or_else(|| self.resolve_serial(serial_or_host))
            .map(str::to_owned)
            .ok_or_else(|| AdbError::DeviceNotFound {
                serial: serial_or_host.to_string(),
            })?;
        self.server.open_shell(&serial)
    }

    pub fn server_mut(&mut self) -> &mut S {
        &mut self.server
    }

    fn exact_serial(&self, serial: &str) -> Option<&str> {
        self.known_serials
            .as_ref()?
            .iter()
            .find(|known| known.as_str() == serial)
            .map(String::as_str)
    }

    fn resolve_serial(&self, serial_or_host: &str) -> Option<&str> {
        self.known_serials
            .as_ref()?
            .iter()
            .find(|serial| serial.contains(serial_or_host))
            .map(String::as_str)
    }
}
