// https://crates.io/crates/adb_client
use super::error::{AdbError, AdbResult};
use super::types::{AdbServerApi, Device, ShellChannel};
use adb_client::{ADBDeviceExt, ADBServer, ADBServerDevice};
use std::net::{Ipv4Addr, SocketAddrV4};

pub const DEFAULT_SERVER_PORT: u16 = 5037;
pub const DEFAULT_DEVICE_PORT: u16 = 5555;

/// ADB server reached through `adb_client` over its local TCP socket.
pub struct RustAdbServer {
    address: SocketAddrV4,
    server: ADBServer,
}

impl RustAdbServer {
    pub fn new(address: SocketAddrV4) -> Self {
        Self {
            address,
            server: ADBServer::new(address),
        }
    }

    pub fn address(&self) -> SocketAddrV4 {
        self.address
    }
}

impl Default for RustAdbServer {
    fn default() -> Self {
        Self::new(SocketAddrV4::new(Ipv4Addr::LOCALHOST, DEFAULT_SERVER_PORT))
    }
}

impl AdbServerApi for RustAdbServer {
    type Shell = RustAdbShell;

    fn list_devices(&mut self) -> AdbResult<Vec<Device>> {
        let device_list = self.server.devices()?;
        Ok(device_list
            .into_iter()
            .map(|d| Device {
                name: d.identifier,
                state: d.state.to_string(),
            })
            .collect())
    }

    fn connect_device(&mut self, host: &str) -> AdbResult<()> {
        let address = parse_socket_addr(host, DEFAULT_DEVICE_PORT)?;
        self.server
            .connect_device(address)
            .map_err(|source| AdbError::ConnectFailed {
                host: host.to_string(),
                source,
            })
    }

    fn open_shell(&mut self, serial: &str) -> AdbResult<RustAdbShell> {
        let device = self.server.get_device_by_name(serial)?;
        Ok(RustAdbShell {
            serial: serial.to_string(),
            device,
        })
    }
}

/// Shell channel bound to one serial on the ADB server.
pub struct RustAdbShell {
    serial: String,
    device: ADBServerDevice,
}

impl RustAdbShell {
    pub fn serial(&self) -> &str {
        &self.serial
    }
}

impl ShellChannel for RustAdbShell {
    fn shell(&mut self, command: &str) -> AdbResult<String> {
        let command_parts: Vec<&str> = command.split_whitespace().collect();
        let mut out: Vec<u8> = Vec::new();
        self.device
            .shell_command(&command_parts, &mut out)
            .map_err(|source| AdbError::ShellCommandFailed {
                command: command.to_string(),
                source,
            })?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Parses `<ipv4>[:port]`, with `localhost` accepted for the loopback address.
pub fn parse_socket_addr(address: &str, default_port: u16) -> AdbResult<SocketAddrV4> {
    let invalid = || AdbError::InvalidAddress {
        address: address.to_string(),
    };
    let (host, port) = match address.rsplit_once(':') {
        Some((host, port)) => (host, port.parse::<u16>().map_err(|_| invalid())?),
        None => (address, default_port),
    };
    let ip = if host.eq_ignore_ascii_case("localhost") {
        Ipv4Addr::LOCALHOST
    } else {
        host.parse::<Ipv4Addr>().map_err(|_| invalid())?
    };
    Ok(SocketAddrV4::new(ip, port))
}
