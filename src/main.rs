mod args;

use androidtv_adb::adb::{AdbServerApi, ShellChannel, parse_socket_addr};
use androidtv_adb::adb::rust_impl::DEFAULT_DEVICE_PORT;
use androidtv_adb::androidtv::{DeviceState, MediaState};
use androidtv_adb::config::DeviceConfig;
use androidtv_adb::poller::Poller;
use androidtv_adb::{
    Action, AdbError, AdbResult, AndroidTvPlayer, Config, ConnectionGateway, DeviceRegistry,
    RustAdbServer,
};
use args::{Cli, Commands};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AdbResult<()> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(host) = cli.server {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    let server_addr = config.server.socket_addr()?;
    log::debug!("Using ADB server at {server_addr}");
    let mut gateway = ConnectionGateway::new(RustAdbServer::new(server_addr));

    match cli.command {
        Commands::Status => {
            if !gateway.is_server_reachable() {
                return Err(AdbError::ServerUnreachable);
            }
            println!("✅ ADB server reachable at {server_addr}");
            print_serials(gateway.known_serials());
            Ok(())
        }
        Commands::Connect { host } => {
            println!("🔌 Connecting ADB server to {host}...");
            gateway.connect_device(&host)?;
            print_serials(gateway.known_serials());
            Ok(())
        }
        Commands::State { host } => {
            let mut registry = DeviceRegistry::new(gateway);
            let reports: Vec<PlayerReport> = match host {
                Some(host) => {
                    let device = device_config(&config, &host)?;
                    registry.setup(&device)?;
                    registry
                        .get(&device.address())
                        .map(PlayerReport::from)
                        .into_iter()
                        .collect()
                }
                None => {
                    for device in &config.devices {
                        if let Err(e) = registry.setup(device) {
                            log::warn!("{}: {e}", device.address());
                        }
                    }
                    registry.players().map(PlayerReport::from).collect()
                }
            };
            print_json(&reports)
        }
        Commands::Watch { interval } => {
            if config.devices.is_empty() {
                println!("⚠️ No devices configured, nothing to watch");
                return Ok(());
            }
            if let Some(secs) = interval {
                config.scan_interval_secs = secs;
            }
            let mut registry = DeviceRegistry::new(gateway);
            for device in &config.devices {
                registry.setup_or_defer(device)?;
            }
            watch(registry, &config)
        }
        Commands::Action { host, action } => {
            let action: Action = action.parse()?;
            with_player(gateway, &config, &host, |player| player.do_action(action))?;
            println!("✅ Sent {action} (key {}) to {host}", action.key_code());
            Ok(())
        }
        Commands::Key { host, code } => {
            with_player(gateway, &config, &host, |player| player.input_key(&code))?;
            println!("✅ Sent key {code} to {host}");
            Ok(())
        }
        Commands::Intent { host, uri } => {
            with_player(gateway, &config, &host, |player| player.start_intent(&uri))?;
            println!("✅ Opened {uri} on {host}");
            Ok(())
        }
    }
}

/// The configured device matching `host` (by host or `host:port`), else an
/// ad-hoc device with default settings.
fn device_config(config: &Config, host: &str) -> AdbResult<DeviceConfig> {
    if let Some(device) = config
        .devices
        .iter()
        .find(|d| d.host == host || d.address() == host)
    {
        return Ok(device.clone());
    }
    let address = parse_socket_addr(host, DEFAULT_DEVICE_PORT)?;
    Ok(DeviceConfig {
        port: address.port(),
        ..DeviceConfig::new(&address.ip().to_string())
    })
}

fn with_player<S, F>(
    gateway: ConnectionGateway<S>,
    config: &Config,
    host: &str,
    command: F,
) -> AdbResult<()>
where
    S: AdbServerApi,
    F: FnOnce(&mut AndroidTvPlayer<S::Shell>) -> AdbResult<()>,
{
    let device = device_config(config, host)?;
    let mut registry = DeviceRegistry::new(gateway);
    registry.setup(&device)?;
    let player = registry
        .get_mut(&device.address())
        .ok_or_else(|| AdbError::DeviceNotFound {
            serial: device.address(),
        })?;
    command(player)
}

fn watch(registry: DeviceRegistry<RustAdbServer>, config: &Config) -> AdbResult<()> {
    let runtime = tokio::runtime::Runtime::new().map_err(|source| AdbError::Runtime { source })?;
    let poller = Poller::new(
        Arc::new(tokio::sync::Mutex::new(registry)),
        config.scan_interval(),
    );
    println!(
        "👀 Watching {} device(s) every {}s, ctrl-c to stop",
        config.devices.len(),
        config.scan_interval().as_secs()
    );

    runtime.block_on(poller.run_until(
        async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for ctrl-c: {e}");
            }
        },
        |registry| {
            for player in registry.players() {
                print_summary(player);
            }
        },
    ))
}

fn print_serials(serials: &[String]) {
    if serials.is_empty() {
        println!("📱 No devices attached");
    }
    for serial in serials {
        println!("📱 {serial}");
    }
}

fn print_summary<C: ShellChannel>(player: &AndroidTvPlayer<C>) {
    let state = match player.state() {
        Some(state) => format!("{state:?}").to_lowercase(),
        None => "unknown".to_string(),
    };
    let marker = if player.available() { "🟢" } else { "🔴" };
    let volume = player
        .volume_level()
        .map(|v| format!("{:.0}%", v * 100.0))
        .unwrap_or_default();
    let app = player.app_name().map(str::to_owned).or(player.app_id());
    println!(
        "{marker} {} [{state}] {volume} {}",
        player.name(),
        app.unwrap_or_default()
    );
}

fn print_json<T: Serialize>(value: &T) -> AdbResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
struct PlayerReport {
    name: String,
    entity_id: String,
    host: String,
    available: bool,
    state: Option<MediaState>,
    app_name: Option<String>,
    device: Option<DeviceState>,
}

impl<C: ShellChannel> From<&AndroidTvPlayer<C>> for PlayerReport {
    fn from(player: &AndroidTvPlayer<C>) -> Self {
        Self {
            name: player.name().to_string(),
            entity_id: player.entity_id().to_string(),
            host: player.host().to_string(),
            available: player.available(),
            state: player.state(),
            app_name: player.app_name().map(str::to_owned),
            device: player.snapshot().map(|s| (*s).clone()),
        }
    }
}
