use super::keys::Action;
use crate::adb::{AdbResult, ShellChannel};

/// Fire-and-forget control commands over any [`ShellChannel`].
///
/// Shell output is discarded; only transport errors are reported.
pub trait RemoteControl {
    fn input_key(&mut self, key_code: u32) -> AdbResult<()>;

    fn do_action(&mut self, action: Action) -> AdbResult<()> {
        self.input_key(action.key_code())
    }

    /// Opens `uri` with the default `VIEW` handler.
    fn start_intent(&mut self, uri: &str) -> AdbResult<()>;
}

impl<C: ShellChannel + ?Sized> RemoteControl for C {
    fn input_key(&mut self, key_code: u32) -> AdbResult<()> {
        self.shell(&format!("input keyevent {key_code}"))?;
        Ok(())
    }

    fn start_intent(&mut self, uri: &str) -> AdbResult<()> {
        self.shell(&format!(
            "am start -a android.intent.action.VIEW -d {}",
            shell_quote(uri)
        ))?;
        Ok(())
    }
}

/// Single-quotes `arg` for the device's `sh`.
fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}
