// Remote-control key names and their Android key-event codes
use crate::adb::AdbError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key-event codes used by the media-player commands.
pub mod keycode {
    pub const POWER: u32 = 26;
    pub const PLAY: u32 = 126;
    pub const PAUSE: u32 = 127;
    pub const PLAY_PAUSE: u32 = 85;
    pub const STOP: u32 = 86;
    pub const MUTE: u32 = 164;
    pub const VOLUME_UP: u32 = 24;
    pub const VOLUME_DOWN: u32 = 25;
    pub const PREVIOUS: u32 = 88;
    pub const NEXT: u32 = 87;
}

macro_rules! actions {
    ($($variant:ident => $name:literal = $code:literal,)*) => {
        /// Named remote-control action, accepted by the `action` service call.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum Action {
            $($variant,)*
        }

        impl Action {
            pub const ALL: &'static [Action] = &[$(Action::$variant,)*];

            pub fn name(self) -> &'static str {
                match self {
                    $(Action::$variant => $name,)*
                }
            }

            pub fn key_code(self) -> u32 {
                match self {
                    $(Action::$variant => $code,)*
                }
            }
        }
    };
}

actions! {
    Back => "back" = 4,
    Blue => "blue" = 186,
    Component1 => "component1" = 249,
    Component2 => "component2" = 250,
    Composite1 => "composite1" = 247,
    Composite2 => "composite2" = 248,
    Down => "down" = 20,
    End => "end" = 123,
    Enter => "enter" = 66,
    Green => "green" = 184,
    Hdmi1 => "hdmi1" = 243,
    Hdmi2 => "hdmi2" = 244,
    Hdmi3 => "hdmi3" = 245,
    Hdmi4 => "hdmi4" = 246,
    Home => "home" = 3,
    Input => "input" = 178,
    Left => "left" = 21,
    Menu => "menu" = 82,
    MoveHome => "move_home" = 122,
    Mute => "mute" = 164,
    Pairing => "pairing" = 225,
    Power => "power" = 26,
    Resume => "resume" = 224,
    Right => "right" = 22,
    Sat => "sat" = 237,
    Search => "search" = 84,
    Settings => "settings" = 176,
    Sleep => "sleep" = 223,
    Suspend => "suspend" = 276,
    SysDown => "sysdown" = 281,
    SysLeft => "sysleft" = 282,
    SysRight => "sysright" = 283,
    SysUp => "sysup" = 280,
    Text => "text" = 233,
    Top => "top" = 122,
    Up => "up" = 19,
    Vga => "vga" = 251,
    VolDown => "voldown" = 25,
    VolUp => "volup" = 24,
    Yellow => "yellow" = 185,
}

impl FromStr for Action {
    type Err = AdbError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.name() == name)
            .ok_or_else(|| AdbError::UnknownAction {
                name: name.to_string(),
            })
    }
}

impl TryFrom<String> for Action {
    type Error = AdbError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.name().to_string()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validates the text form of a raw key-event code.
pub fn parse_key_code(key: &str) -> Result<u32, AdbError> {
    key.trim()
        .parse::<u32>()
        .map_err(|_| AdbError::InvalidKeyCode {
            key: key.to_string(),
        })
}
