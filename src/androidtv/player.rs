use super::apps::AppTable;
use super::commands::RemoteControl;
use super::keys::{Action, keycode, parse_key_code};
use super::reader::DeviceStateReader;
use super::state::{DeviceState, PowerState};
use crate::adb::{AdbError, AdbResult, AdbServerApi, ConnectionGateway, ShellChannel};
use serde::Serialize;
use std::sync::Arc;

/// Media-player feature flags, combined in [`SUPPORT_ANDROIDTV`].
pub mod features {
    pub const PAUSE: u32 = 1;
    pub const VOLUME_MUTE: u32 = 8;
    pub const PREVIOUS_TRACK: u32 = 16;
    pub const NEXT_TRACK: u32 = 32;
    pub const TURN_ON: u32 = 128;
    pub const TURN_OFF: u32 = 256;
    pub const VOLUME_STEP: u32 = 1024;
    pub const STOP: u32 = 4096;
    pub const PLAY: u32 = 16384;
}

pub const SUPPORT_ANDROIDTV: u32 = features::NEXT_TRACK
    | features::PAUSE
    | features::PLAY
    | features::PREVIOUS_TRACK
    | features::TURN_OFF
    | features::TURN_ON
    | features::VOLUME_MUTE
    | features::VOLUME_STEP
    | features::STOP;

/// Lifecycle state shown to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaState {
    Off,
    Idle,
    Playing,
    Paused,
}

impl From<PowerState> for MediaState {
    fn from(state: PowerState) -> Self {
        match state {
            PowerState::Off => MediaState::Off,
            PowerState::Idle => MediaState::Idle,
            PowerState::Playing => MediaState::Playing,
            PowerState::Paused => MediaState::Paused,
        }
    }
}

/// One configured Android TV: state polling plus remote control.
pub struct AndroidTvPlayer<C> {
    name: String,
    host: String,
    entity_id: String,
    apps: AppTable,
    reader: DeviceStateReader<C>,
    state: Option<MediaState>,
    app_name: Option<String>,
}

impl<C: ShellChannel> AndroidTvPlayer<C> {
    pub fn new(name: &str, host: &str, apps: AppTable, channel: C) -> Self {
        Self {
            name: name.to_string(),
            host: host.to_string(),
            entity_id: entity_id_for(name),
            apps,
            reader: DeviceStateReader::new(channel),
            state: None,
            app_name: None,
        }
    }

    /// Checks reachability through `gateway`, then refreshes the snapshot.
    ///
    /// Every failure ends up as `available() == false` with the last snapshot
    /// kept; the transition is logged once. Returns whether the device is
    /// available after the update.
    pub fn update<S: AdbServerApi>(&mut self, gateway: &mut ConnectionGateway<S>) -> bool {
        let was_available = self.reader.is_available();
        let outcome = if !gateway.is_server_reachable() {
            Err(AdbError::ServerUnreachable)
        } else if !gateway.is_device_connected(&self.host) {
            Err(AdbError::DeviceNotFound {
                serial: self.host.clone(),
            })
        } else {
            self.reader.refresh()
        };

        match outcome {
            Ok(snapshot) => {
                self.apply(&snapshot);
                if !was_available {
                    log::info!("Device {} connected.", self.name);
                }
                true
            }
            Err(e) => {
                if was_available {
                    log::error!("{}: {e}", self.name);
                    log::warn!("Device {} became unavailable.", self.name);
                } else {
                    log::debug!("{} still unavailable: {e}", self.name);
                }
                self.reader.mark_unavailable();
                false
            }
        }
    }

    fn apply(&mut self, snapshot: &DeviceState) {
        self.state = Some(snapshot.power_state.into());
        self.app_name = snapshot
            .foreground_app
            .as_deref()
            .and_then(|id| self.apps.app_name(id))
            .map(str::to_owned);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn state(&self) -> Option<MediaState> {
        self.state
    }

    pub fn snapshot(&self) -> Option<Arc<DeviceState>> {
        self.reader.snapshot()
    }

    pub fn available(&self) -> bool {
        self.reader.is_available()
    }

    pub fn is_volume_muted(&self) -> Option<bool> {
        self.snapshot().map(|s| s.muted)
    }

    pub fn volume_level(&self) -> Option<f64> {
        self.snapshot().map(|s| s.volume_fraction)
    }

    /// Current audio output device.
    pub fn source(&self) -> Option<String> {
        self.snapshot().map(|s| s.audio_sink.clone())
    }

    pub fn app_id(&self) -> Option<String> {
        self.snapshot().and_then(|s| s.foreground_app.clone())
    }

    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    pub fn supported_features(&self) -> u32 {
        SUPPORT_ANDROIDTV
    }

    pub fn turn_on(&mut self) -> AdbResult<()> {
        self.remote().input_key(keycode::POWER)
    }

    pub fn turn_off(&mut self) -> AdbResult<()> {
        self.remote().input_key(keycode::POWER)
    }

    pub fn media_play(&mut self) -> AdbResult<()> {
        self.remote().input_key(keycode::PLAY)?;
        self.state = Some(MediaState::Playing);
        Ok(())
    }

    pub fn media_pause(&mut self) -> AdbResult<()> {
        self.remote().input_key(keycode::PAUSE)?;
        self.state = Some(MediaState::Paused);
        Ok(())
    }

    pub fn media_play_pause(&mut self) -> AdbResult<()> {
        self.remote().input_key(keycode::PLAY_PAUSE)
    }

    pub fn media_stop(&mut self) -> AdbResult<()> {
        self.remote().input_key(keycode::STOP)?;
        self.state = Some(MediaState::Idle);
        Ok(())
    }

    /// Sends the mute toggle and records `mute` until the next refresh.
    pub fn mute_volume(&mut self, mute: bool) -> AdbResult<()> {
        self.remote().input_key(keycode::MUTE)?;
        self.reader.amend(|state| state.muted = mute);
        Ok(())
    }

    pub fn volume_up(&mut self) -> AdbResult<()> {
        self.remote().input_key(keycode::VOLUME_UP)
    }

    pub fn volume_down(&mut self) -> AdbResult<()> {
        self.remote().input_key(keycode::VOLUME_DOWN)
    }

    pub fn media_previous_track(&mut self) -> AdbResult<()> {
        self.remote().input_key(keycode::PREVIOUS)
    }

    pub fn media_next_track(&mut self) -> AdbResult<()> {
        self.remote().input_key(keycode::NEXT)
    }

    pub fn do_action(&mut self, action: Action) -> AdbResult<()> {
        self.remote().do_action(action)
    }

    /// Raw key-event code in text form, as received from a service call.
    pub fn input_key(&mut self, key: &str) -> AdbResult<()> {
        let code = parse_key_code(key)?;
        self.remote().input_key(code)
    }

    pub fn start_intent(&mut self, uri: &str) -> AdbResult<()> {
        self.remote().start_intent(uri)
    }

    fn remote(&mut self) -> &mut C {
        self.reader.channel_mut()
    }
}

/// `media_player.<slug>` where the slug is the lowercased name with every
/// run of other characters collapsed to `_`.
pub fn entity_id_for(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');
    if slug.is_empty() {
        "media_player.android".to_string()
    } else {
        format!("media_player.{slug}")
    }
}
