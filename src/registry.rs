//! Configured players, keyed by `<host>:<port>`, and service-call dispatch.

use crate::adb::{AdbError, AdbResult, AdbServerApi, ConnectionGateway};
use crate::androidtv::{Action, AndroidTvPlayer, AppTable};
use crate::config::DeviceConfig;
use indexmap::IndexMap;
use serde::Deserialize;

/// Parameters of a control service call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ServiceRequest {
    Action { action: Action },
    Intent { intent: String },
    Key { key: String },
}

/// A control request aimed at one or more players by entity id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceCall {
    #[serde(rename = "entity_id")]
    pub entity_ids: Vec<String>,
    #[serde(flatten)]
    pub request: ServiceRequest,
}

/// Outcome of [`DeviceRegistry::setup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    AlreadyRegistered,
}

/// Owns the gateway and every registered player.
///
/// Devices whose setup failed because the server or the device was not
/// reachable can be parked with [`defer`](Self::defer); they are retried at
/// the start of every [`update_all`](Self::update_all).
pub struct DeviceRegistry<S: AdbServerApi> {
    gateway: ConnectionGateway<S>,
    players: IndexMap<String, AndroidTvPlayer<S::Shell>>,
    pending: Vec<DeviceConfig>,
}

impl<S: AdbServerApi> DeviceRegistry<S> {
    pub fn new(gateway: ConnectionGateway<S>) -> Self {
        Self {
            gateway,
            players: IndexMap::new(),
            pending: Vec::new(),
        }
    }

    /// Registers a configured device.
    ///
    /// Needs a reachable server and an attached device (after an optional
    /// `adb connect`); otherwise the device is not ready and nothing is added.
    /// The new player is refreshed once before it is stored.
    pub fn setup(&mut self, config: &DeviceConfig) -> AdbResult<Registration> {
        let address = config.address();
        if self.players.contains_key(&address) {
            log::warn!("Platform already setup on {address}, skipping.");
            return Ok(Registration::AlreadyRegistered);
        }

        if !self.gateway.is_server_reachable() {
            return Err(AdbError::ServerUnreachable);
        }
        if !self.gateway.is_device_connected(&address) && config.auto_connect {
            log::info!("Connecting ADB server to {address}");
            if let Err(e) = self.gateway.connect_device(&address) {
                log::warn!("{e}");
            }
        }
        if !self.gateway.is_device_connected(&address) {
            return Err(AdbError::DeviceNotFound { serial: address });
        }

        let shell = self.gateway.open_shell(&address)?;
        let apps = AppTable::with_custom(config.apps.clone());
        let mut player = AndroidTvPlayer::new(&config.name, &address, apps, shell);
        player.update(&mut self.gateway);
        self.players.insert(address, player);
        Ok(Registration::Added)
    }

    /// [`setup`](Self::setup), parking the device for a later retry when it is
    /// not ready yet.
    pub fn setup_or_defer(&mut self, config: &DeviceConfig) -> AdbResult<Option<Registration>> {
        match self.setup(config) {
            Ok(registration) => Ok(Some(registration)),
            Err(e) if e.is_transport() => {
                log::error!("{e}");
                self.defer(config.clone());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn defer(&mut self, config: DeviceConfig) {
        if !self.pending.iter().any(|p| p.address() == config.address()) {
            self.pending.push(config);
        }
    }

    /// Retries pending setups, then updates every player. Returns how many
    /// players are available afterwards.
    pub fn update_all(&mut self) -> usize {
        self.retry_pending();
        let mut available = 0;
        for player in self.players.values_mut() {
            if player.update(&mut self.gateway) {
                available += 1;
            }
        }
        available
    }

    fn retry_pending(&mut self) {
        for config in std::mem::take(&mut self.pending) {
            match self.setup(&config) {
                Ok(_) => log::info!("Set up {} ({})", config.name, config.address()),
                Err(e) => {
                    log::debug!("{} not ready: {e}", config.address());
                    self.pending.push(config);
                }
            }
        }
    }

    /// Runs `call` on every player it targets and returns how many were hit.
    pub fn dispatch(&mut self, call: &ServiceCall) -> AdbResult<usize> {
        let mut dispatched = 0;
        for player in self.players.values_mut() {
            if !call.entity_ids.iter().any(|id| id == player.entity_id()) {
                continue;
            }
            match &call.request {
                ServiceRequest::Action { action } => player.do_action(*action)?,
                ServiceRequest::Intent { intent } => player.start_intent(intent)?,
                ServiceRequest::Key { key } => player.input_key(key)?,
            }
            dispatched += 1;
        }
        Ok(dispatched)
    }

    pub fn get(&self, address: &str) -> Option<&AndroidTvPlayer<S::Shell>> {
        self.players.get(address)
    }

    pub fn get_mut(&mut self, address: &str) -> Option<&mut AndroidTvPlayer<S::Shell>> {
        self.players.get_mut(address)
    }

    pub fn players(&self) -> impl Iterator<Item = &AndroidTvPlayer<S::Shell>> {
        self.players.values()
    }

    pub fn pending(&self) -> &[DeviceConfig] {
        &self.pending
    }

    pub fn gateway_mut(&mut self) -> &mut ConnectionGateway<S> {
        &mut self.gateway
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
