use super::parse;
use super::state::DeviceState;
use crate::adb::{AdbResult, ShellChannel};
use std::sync::Arc;

pub const POWER_COMMAND: &str = "dumpsys power";
pub const AUDIO_COMMAND: &str = "dumpsys audio";
pub const WINDOW_COMMAND: &str = "dumpsys window windows";

/// Polls one device's diagnostic dumps into [`DeviceState`] snapshots.
///
/// `refresh` takes `&mut self`, so one reader never runs two refreshes at
/// once. A failed refresh leaves the previous snapshot in place; the caller
/// decides whether to flag it with [`mark_unavailable`](Self::mark_unavailable).
pub struct DeviceStateReader<C> {
    channel: C,
    snapshot: Option<Arc<DeviceState>>,
}

impl<C: ShellChannel> DeviceStateReader<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            snapshot: None,
        }
    }

    /// Runs `dumpsys power`, `dumpsys audio` and `dumpsys window windows` in
    /// that order and publishes the resulting snapshot.
    pub fn refresh(&mut self) -> AdbResult<Arc<DeviceState>> {
        let power = self.channel.shell(POWER_COMMAND)?;
        let audio = self.channel.shell(AUDIO_COMMAND)?;

        let power_state = parse::classify_power_state(&power, &audio);
        let audio_status = parse::parse_audio(&audio)?;

        let window = self.channel.shell(WINDOW_COMMAND)?;
        let foreground_app = parse::parse_current_app(&window);

        let snapshot = Arc::new(DeviceState {
            power_state,
            audio_sink: audio_status.sink,
            muted: audio_status.muted,
            volume_fraction: audio_status.volume_fraction,
            foreground_app,
            available: true,
        });
        self.snapshot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    pub fn snapshot(&self) -> Option<Arc<DeviceState>> {
        self.snapshot.clone()
    }

    pub fn is_available(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.available)
    }

    /// Keeps the last known values but flags them as stale.
    pub fn mark_unavailable(&mut self) {
        if let Some(current) = &self.snapshot
            && current.available
        {
            self.snapshot = Some(Arc::new(current.unavailable()));
        }
    }

    /// Publishes a copy of the current snapshot with `edit` applied, for
    /// optimistic updates after a control command.
    pub fn amend(&mut self, edit: impl FnOnce(&mut DeviceState)) {
        if let Some(current) = &self.snapshot {
            let mut next = DeviceState::clone(current);
            edit(&mut next);
            self.snapshot = Some(Arc::new(next));
        }
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}
