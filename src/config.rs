//! YAML configuration: which ADB server to use and which TVs to poll.

use crate::adb::rust_impl::{DEFAULT_DEVICE_PORT, DEFAULT_SERVER_PORT};
use crate::adb::{AdbError, AdbResult, parse_socket_addr};
use indexmap::IndexMap;
use serde::Deserialize;
use std::net::SocketAddrV4;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_NAME: &str = "Android";
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    /// Seconds between two polls of every device.
    pub scan_interval_secs: u64,
    pub devices: Vec<DeviceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            scan_interval_secs: DEFAULT_SCAN_INTERVAL_SECS,
            devices: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str, path: &Path) -> AdbResult<Self> {
        serde_yaml::from_str(yaml).map_err(|source| AdbError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> AdbResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| AdbError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml, path)
    }

    /// `~/.config/androidtv-adb/config.yaml`
    pub fn default_path() -> AdbResult<PathBuf> {
        homedir::my_home()
            .ok()
            .flatten()
            .map(|home| home.join(".config").join("androidtv-adb").join("config.yaml"))
            .ok_or(AdbError::HomeDirectoryNotFound)
    }

    /// Loads `path` if given, else the default file when it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> AdbResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Ok(default) if default.exists() => Self::load(&default),
            _ => Ok(Self::default()),
        }
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> AdbResult<SocketAddrV4> {
        parse_socket_addr(&format!("{}:{}", self.host, self.port), DEFAULT_SERVER_PORT)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceConfig {
    pub host: String,
    #[serde(default = "default_device_port")]
    pub port: u16,
    #[serde(default = "default_name")]
    pub name: String,
    /// Extra package-id fragment -> display name entries.
    #[serde(default)]
    pub apps: IndexMap<String, String>,
    /// Run `adb connect <host>:<port>` when the device is not attached yet.
    #[serde(default)]
    pub auto_connect: bool,
}

impl DeviceConfig {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            port: DEFAULT_DEVICE_PORT,
            name: default_name(),
            apps: IndexMap::new(),
            auto_connect: false,
        }
    }

    /// `<host>:<port>`, the serial the ADB server lists for a network device.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_device_port() -> u16 {
    DEFAULT_DEVICE_PORT
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn parse(yaml: &str) -> AdbResult<Config> {
        Config::from_yaml_str(yaml, Path::new("test.yaml"))
    }

    #[test]
    fn empty_document_gives_defaults() {
        let config = parse("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.server.socket_addr().unwrap(),
            SocketAddrV4::new(Ipv4Addr::LOCALHOST, 5037)
        );
        assert_eq!(config.scan_interval(), Duration::from_secs(10));
    }

    #[test]
    fn full_document() {
        let config = parse(
            r#"
server:
  host: 192.168.1.2
  port: 5038
scan_interval_secs: 30
devices:
  - host: 192.168.1.37
    name: MIBOX3 ANDROID TV
    apps:
      com.example.tv: Example
    auto_connect: true
  - host: 192.168.1.38
    port: 5556
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 5038);
        assert_eq!(config.scan_interval_secs, 30);
        assert_eq!(config.devices.len(), 2);

        let first = &config.devices[0];
        assert_eq!(first.address(), "192.168.1.37:5555");
        assert_eq!(first.name, "MIBOX3 ANDROID TV");
        assert_eq!(first.apps.get("com.example.tv").map(String::as_str), Some("Example"));
        assert!(first.auto_connect);

        let second = &config.devices[1];
        assert_eq!(second.address(), "192.168.1.38:5556");
        assert_eq!(second.name, DEFAULT_NAME);
        assert!(second.apps.is_empty());
        assert!(!second.auto_connect);
    }

    #[test]
    fn device_without_host_is_rejected() {
        let err = parse("devices:\n  - name: Bedroom\n").unwrap_err();
        assert!(matches!(err, AdbError::ConfigParse { .. }), "{err}");
    }

    #[test]
    fn zero_interval_is_bumped_to_one_second() {
        let config = parse("scan_interval_secs: 0").unwrap();
        assert_eq!(config.scan_interval(), Duration::from_secs(1));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("/nonexistent/androidtv-adb.yaml")).unwrap_err();
        assert!(matches!(err, AdbError::ConfigRead { .. }));
    }
}
