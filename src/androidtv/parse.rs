//! Scrapers for `dumpsys` text.
//!
//! The reports have no grammar; each function pulls a few fields out with
//! substring tests or regexes and fails with a [`ParseError`] when a marker it
//! depends on is missing. None of them touch a device.

use super::state::PowerState;
use crate::adb::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DISPLAY_POWER_ON_MARKER: &str = "Display Power: state=ON";
pub const FOCUS_MARKER: &str = "mCurrentFocus";
/// Android TV music stream volume runs from 0 to this many steps.
pub const MAX_VOLUME_STEPS: u32 = 15;

const AUDIO_DUMP: &str = "dumpsys audio";

static STREAM_MUSIC_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)STREAM_MUSIC(.*?)- STREAM").expect("stream block pattern"));
static DEVICE_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)Devices: (.*?)\W").expect("devices pattern"));
static MUTED_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)Muted: (.*?)\W").expect("muted pattern"));

/// Music stream fields from `dumpsys audio`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioStatus {
    pub sink: String,
    pub muted: bool,
    pub volume_level: u32,
    pub volume_fraction: f64,
}

pub fn screen_is_on(power_dump: &str) -> bool {
    power_dump.contains(DISPLAY_POWER_ON_MARKER)
}

/// Display power dominates: a dark screen is `Off` whatever audio is doing.
/// After that, "started" wins over "paused".
pub fn classify_power_state(power_dump: &str, audio_dump: &str) -> PowerState {
    if !screen_is_on(power_dump) {
        PowerState::Off
    } else if audio_dump.contains("started") {
        PowerState::Playing
    } else if audio_dump.contains("paused") {
        PowerState::Paused
    } else {
        PowerState::Idle
    }
}

/// `round(level / 15, 2)`, with levels above the step scale clamped.
pub fn volume_fraction(level: u32) -> f64 {
    let level = level.min(MAX_VOLUME_STEPS);
    (f64::from(level) / f64::from(MAX_VOLUME_STEPS) * 100.0).round() / 100.0
}

/// Extracts the music stream's output device, mute flag and volume.
///
/// Only the `STREAM_MUSIC` section is considered; ring, alarm and the other
/// streams carry the same labels and are ignored. The volume is the entry
/// keyed by the output device name, e.g. `(hdmi): 9`.
pub fn parse_audio(audio_dump: &str) -> Result<AudioStatus, ParseError> {
    let block = capture(&STREAM_MUSIC_BLOCK, audio_dump).ok_or(ParseError::MissingMarker {
        dump: AUDIO_DUMP,
        marker: "STREAM_MUSIC",
    })?;
    let sink = capture(&DEVICE_FIELD, block).ok_or(ParseError::MissingField {
        dump: AUDIO_DUMP,
        field: "music stream device",
    })?;
    let muted = capture(&MUTED_FIELD, block).ok_or(ParseError::MissingField {
        dump: AUDIO_DUMP,
        field: "music stream mute flag",
    })?;

    let missing_volume = ParseError::MissingField {
        dump: AUDIO_DUMP,
        field: "music stream volume",
    };
    let volume_pattern = Regex::new(&format!(r"(?s){}\): (\d+)", regex::escape(sink)))
        .map_err(|_| missing_volume.clone())?;
    let volume_level = capture(&volume_pattern, block)
        .and_then(|level| level.parse::<u32>().ok())
        .ok_or(missing_volume)?;
    if volume_level > MAX_VOLUME_STEPS {
        log::debug!("volume level {volume_level} above {MAX_VOLUME_STEPS} steps, clamping");
    }

    Ok(AudioStatus {
        sink: sink.to_string(),
        muted: muted == "true",
        volume_level,
        volume_fraction: volume_fraction(volume_level),
    })
}

/// Package id of the focused window from `dumpsys window windows`.
///
/// The first line mentioning `mCurrentFocus` is split on single spaces and
/// the fifth field is cut at `/`:
/// `  mCurrentFocus=Window{8f4b3e5 u0 com.netflix.ninja/com.netflix.ninja.MainActivity}`
/// gives `com.netflix.ninja`. A missing line, or a focus line without that
/// field (`mCurrentFocus=null`), means the app is unknown.
pub fn parse_current_app(window_dump: &str) -> Option<String> {
    let line = window_dump.lines().find(|line| line.contains(FOCUS_MARKER))?;
    let window = line.split(' ').nth(4)?;
    let package = window.split('/').next()?;
    (!package.is_empty()).then(|| package.to_string())
}

fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
