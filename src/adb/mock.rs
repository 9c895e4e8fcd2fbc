// Scripted ADB server and shell used by the unit tests.
use super::error::{AdbError, AdbResult};
use super::types::{AdbServerApi, Device, ShellChannel};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) const POWER_ON_DUMP: &str = "\
POWER MANAGER (dumpsys power)

Power Manager State:
  mDirty=0x0
  mWakefulness=Awake
  mIsPowered=true

Display Power: state=ON
";

pub(crate) const POWER_OFF_DUMP: &str = "\
POWER MANAGER (dumpsys power)

Power Manager State:
  mDirty=0x0
  mWakefulness=Asleep

Display Power: state=OFF
";

pub(crate) const AUDIO_PLAYING_DUMP: &str = "\
Stream volumes (device: index)
- STREAM_VOICE_CALL:
   Muted: false
   Min: 1
   Max: 5
   Current: 2 (speaker): 4, 40000000 (default): 4
   Devices: speaker
- STREAM_SYSTEM:
   Muted: false
   Min: 0
   Max: 15
   Current: 2 (speaker): 7, 400 (hdmi): 11
   Devices: hdmi
- STREAM_MUSIC:
   Muted: false
   Min: 0
   Max: 15
   Current: 2 (speaker): 3, 400 (hdmi): 9, 40000000 (default): 11
   Devices: hdmi
- STREAM_ALARM:
   Muted: true
   Min: 0
   Max: 7
   Current: 2 (speaker): 6, 400 (hdmi): 2
   Devices: speaker

  playback activity as reported through PlayerBase:
  AudioPlaybackConfiguration piid:15 state:started attr:AudioAttributes: usage=USAGE_MEDIA
";

pub(crate) const AUDIO_PAUSED_DUMP: &str = "\
- STREAM_MUSIC:
   Muted: true
   Min: 0
   Max: 15
   Current: 2 (speaker): 15, 40000000 (default): 11
   Devices: speaker
- STREAM_ALARM:
   Muted: false
   Devices: speaker

  AudioPlaybackConfiguration piid:23 state:paused attr:AudioAttributes: usage=USAGE_MEDIA
";

pub(crate) const AUDIO_IDLE_DUMP: &str = "\
- STREAM_MUSIC:
   Muted: false
   Min: 0
   Max: 15
   Current: 2 (speaker): 0, 400 (hdmi): 4
   Devices: hdmi
- STREAM_ALARM:
   Muted: false
   Devices: speaker

  AudioPlaybackConfiguration piid:31 state:stopped attr:AudioAttributes: usage=USAGE_MEDIA
";

pub(crate) const WINDOW_NETFLIX_DUMP: &str = "\
WINDOW MANAGER WINDOWS (dumpsys window windows)
  Window #0 Window{1b2c3d4 u0 com.android.systemui.ImageWallpaper}:
    mDisplayId=0 stackId=0 mSession=Session{f00 1234:u0a10022}
  mCurrentFocus=Window{8f4b3e5 u0 com.netflix.ninja/com.netflix.ninja.MainActivity}
  mFocusedApp=AppWindowToken{aa11bb2 token=Token{cc33 ActivityRecord{dd44 u0 com.netflix.ninja/.MainActivity t12}}}
";

pub(crate) const WINDOW_LAUNCHER_DUMP: &str = "\
WINDOW MANAGER WINDOWS (dumpsys window windows)
  mCurrentFocus=Window{5e6f7a8 u0 com.google.android.tvlauncher/com.google.android.tvlauncher.MainActivity}
";

pub(crate) const POWER_COMMAND: &str = "dumpsys power";
pub(crate) const AUDIO_COMMAND: &str = "dumpsys audio";
pub(crate) const WINDOW_COMMAND: &str = "dumpsys window windows";

#[derive(Default)]
struct ShellScript {
    responses: HashMap<String, String>,
    failing: bool,
    delay: Option<Duration>,
    history: Vec<String>,
}

/// Shell channel answering from a command -> output table.
///
/// Clones share the same script so a test can keep a handle after moving the
/// shell into a reader.
#[derive(Clone, Default)]
pub(crate) struct MockShell {
    script: Arc<Mutex<ShellScript>>,
}

impl MockShell {
    pub(crate) fn with_dumps(power: &str, audio: &str, window: &str) -> Self {
        let shell = Self::default();
        shell.set_dumps(power, audio, window);
        shell
    }

    pub(crate) fn set_dumps(&self, power: &str, audio: &str, window: &str) {
        self.set_response(POWER_COMMAND, power);
        self.set_response(AUDIO_COMMAND, audio);
        self.set_response(WINDOW_COMMAND, window);
    }

    pub(crate) fn set_response(&self, command: &str, output: &str) {
        let mut script = self.script.lock().unwrap();
        script
            .responses
            .insert(command.to_string(), output.to_string());
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.script.lock().unwrap().failing = failing;
    }

    /// Makes every command block for `delay`, like a hung device.
    pub(crate) fn set_delay(&self, delay: Duration) {
        self.script.lock().unwrap().delay = Some(delay);
    }

    pub(crate) fn history(&self) -> Vec<String> {
        self.script.lock().unwrap().history.clone()
    }

    pub(crate) fn clear_history(&self) {
        self.script.lock().unwrap().history.clear();
    }
}

impl ShellChannel for MockShell {
    fn shell(&mut self, command: &str) -> AdbResult<String> {
        let delay = self.script.lock().unwrap().delay;
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        let mut script = self.script.lock().unwrap();
        script.history.push(command.to_string());
        if script.failing {
            return Err(AdbError::DeviceNotFound {
                serial: "mock".to_string(),
            });
        }
        // Commands without a scripted answer behave like `input keyevent`: no output.
        Ok(script.responses.get(command).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct ServerScript {
    reachable: bool,
    serials: Vec<String>,
    shells: HashMap<String, MockShell>,
    connected_hosts: Vec<String>,
    opened_serials: Vec<String>,
    listings: usize,
}

#[derive(Clone, Default)]
pub(crate) struct MockServer {
    script: Arc<Mutex<ServerScript>>,
}

impl MockServer {
    pub(crate) fn with_serials(serials: &[&str]) -> Self {
        let server = Self::default();
        {
            let mut script = server.script.lock().unwrap();
            script.reachable = true;
            script.serials = serials.iter().map(|s| s.to_string()).collect();
        }
        server
    }

    pub(crate) fn unreachable() -> Self {
        Self::default()
    }

    pub(crate) fn set_reachable(&self, reachable: bool) {
        self.script.lock().unwrap().reachable = reachable;
    }

    pub(crate) fn set_serials(&self, serials: &[&str]) {
        self.script.lock().unwrap().serials = serials.iter().map(|s| s.to_string()).collect();
    }

    /// Registers the shell handed out for `serial`.
    pub(crate) fn attach_shell(&self, serial: &str, shell: MockShell) {
        self.script
            .lock()
            .unwrap()
            .shells
            .insert(serial.to_string(), shell);
    }

    pub(crate) fn connected_hosts(&self) -> Vec<String> {
        self.script.lock().unwrap().connected_hosts.clone()
    }

    pub(crate) fn opened_serials(&self) -> Vec<String> {
        self.script.lock().unwrap().opened_serials.clone()
    }

    pub(crate) fn listings(&self) -> usize {
        self.script.lock().unwrap().listings
    }
}

impl AdbServerApi for MockServer {
    type Shell = MockShell;

    fn list_devices(&mut self) -> AdbResult<Vec<Device>> {
        let mut script = self.script.lock().unwrap();
        script.listings += 1;
        if !script.reachable {
            return Err(AdbError::ServerUnreachable);
        }
        Ok(script
            .serials
            .iter()
            .map(|name| Device {
                name: name.clone(),
                state: "device".to_string(),
            })
            .collect())
    }

    fn connect_device(&mut self, host: &str) -> AdbResult<()> {
        let mut script = self.script.lock().unwrap();
        if !script.reachable {
            return Err(AdbError::ServerUnreachable);
        }
        script.connected_hosts.push(host.to_string());
        if !script.serials.iter().any(|s| s == host) {
            script.serials.push(host.to_string());
        }
        Ok(())
    }

    fn open_shell(&mut self, serial: &str) -> AdbResult<MockShell> {
        let mut script = self.script.lock().unwrap();
        script.opened_serials.push(serial.to_string());
        Ok(script.shells.get(serial).cloned().unwrap_or_default())
    }
}
