// Android TV module
// State inference from `dumpsys` output and remote control through key
// events, layered on the shell channels handed out by `crate::adb`.

pub mod apps;
pub mod commands;
pub mod keys;
pub mod parse;
pub mod player;
pub mod reader;
pub mod state;

pub use apps::AppTable;
pub use commands::RemoteControl;
pub use keys::Action;
pub use player::{AndroidTvPlayer, MediaState};
pub use reader::DeviceStateReader;
pub use state::{DeviceState, PowerState};
