use serde::Serialize;

/// Power and playback state inferred from `dumpsys power` and `dumpsys audio`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    Off,
    Idle,
    Playing,
    Paused,
}

/// One refresh worth of device state.
///
/// Snapshots are never edited in place; the reader swaps in a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceState {
    pub power_state: PowerState,
    /// Active output of the music stream, e.g. `speaker` or `hdmi`.
    pub audio_sink: String,
    pub muted: bool,
    /// Volume on `[0.0, 1.0]`, rounded to two decimals.
    pub volume_fraction: f64,
    /// Package id of the focused window, `None` when no focus line was found.
    pub foreground_app: Option<String>,
    pub available: bool,
}

impl DeviceState {
    /// The same snapshot, flagged as stale.
    pub fn unavailable(&self) -> Self {
        Self {
            available: false,
            ..self.clone()
        }
    }
}
