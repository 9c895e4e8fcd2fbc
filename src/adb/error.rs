use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for ADB operations.
pub type AdbResult<T> = Result<T, AdbError>;

/// The error type for all ADB-related operations.
#[derive(Debug, Error)]
pub enum AdbError {
    #[error("Can't reach adb server, is it running ?")]
    ServerUnreachable,

    #[error("ADB server not connected to {serial}")]
    DeviceNotFound { serial: String },

    #[error("ADB transport error: {source}")]
    Transport {
        #[from]
        source: adb_client::RustADBError,
    },

    #[error("Failed to connect ADB server to {host}: {source}")]
    ConnectFailed {
        host: String,
        source: adb_client::RustADBError,
    },

    #[error("Invalid address '{address}', expected <ipv4>[:port]")]
    InvalidAddress { address: String },

    #[error("Shell command '{command}' failed: {source}")]
    ShellCommandFailed {
        command: String,
        source: adb_client::RustADBError,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Unknown action '{name}'")]
    UnknownAction { name: String },

    #[error("Invalid key code '{key}', expected a numeric key-event code")]
    InvalidKeyCode { key: String },

    #[error("Failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("{operation} timed out after {seconds}s")]
    Timeout { operation: String, seconds: u64 },

    #[error("Failed to serialize output: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },

    #[error("Failed to start the async runtime: {source}")]
    Runtime { source: std::io::Error },

    #[error("Failed to determine home directory for the default config file")]
    HomeDirectoryNotFound,

    #[error("Task failed to complete: {source}")]
    JoinError {
        #[from]
        source: tokio::task::JoinError,
    },
}

impl AdbError {
    /// Errors that only mean "the device can't be reached right now".
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AdbError::ServerUnreachable
                | AdbError::DeviceNotFound { .. }
                | AdbError::Transport { .. }
                | AdbError::ConnectFailed { .. }
                | AdbError::ShellCommandFailed { .. }
                | AdbError::Timeout { .. }
        )
    }

    pub fn is_parse_failure(&self) -> bool {
        matches!(self, AdbError::Parse(_))
    }

    /// Whether a failed refresh with this error should mark the device unavailable.
    pub fn is_unavailable(&self) -> bool {
        self.is_transport() || self.is_parse_failure()
    }
}

/// Failure to scrape a field out of a `dumpsys` report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("'{marker}' not found in {dump} output")]
    MissingMarker {
        dump: &'static str,
        marker: &'static str,
    },

    #[error("no {field} found in {dump} output")]
    MissingField {
        dump: &'static str,
        field: &'static str,
    },
}
