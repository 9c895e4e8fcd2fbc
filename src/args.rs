use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "androidtv-adb")]
#[command(version = env!("APP_VERSION_DISPLAY"))]
#[command(long_version = concat!(
    env!("APP_VERSION_DISPLAY"),
    " (semver ",
    env!("APP_VERSION_SEMVER"),
    ", built ",
    env!("APP_BUILD_YEAR"),
    ")"
))]
#[command(about = "Android TV state polling and remote control over the ADB server", long_about = None)]
pub struct Cli {
    /// YAML config file (default: ~/.config/androidtv-adb/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// ADB server host, overrides the config file
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// ADB server port, overrides the config file
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show whether the ADB server is reachable and which devices it lists
    Status,

    /// Ask the ADB server to connect to a network device
    Connect {
        /// <ip>[:port], port defaults to 5555
        host: String,
    },

    /// Print the current state of one device (or every configured one) as JSON
    State {
        /// Device host or serial; every configured device when omitted
        #[arg(long)]
        host: Option<String>,
    },

    /// Poll every configured device until ctrl-c
    Watch {
        /// Seconds between polls, overrides the config file
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Send a named remote action (home, back, volup, ...)
    Action {
        #[arg(long)]
        host: String,

        /// Action name
        action: String,
    },

    /// Send a raw key-event code
    Key {
        #[arg(long)]
        host: String,

        /// Numeric key-event code
        code: String,
    },

    /// Open a URI with the VIEW intent
    Intent {
        #[arg(long)]
        host: String,

        uri: String,
    },
}
