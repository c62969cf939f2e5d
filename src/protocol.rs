//! Command codes understood by the receiver-control collaborator.
//!
//! Every collaborator call takes the [`SEPARATOR`] sigil plus a code. Sending
//! [`QUERY`] reads the current value of a channel, any other code writes it.

use serde::{Deserialize, Serialize};

/// Separator sigil passed with every call
pub const SEPARATOR: &str = ":";

/// Code that turns a call into a status query
pub const QUERY: &str = "?";

/// Receiver control channels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Power,
    Mute,
    Volume,
    Source,
    SoundMode,
}

/// Power channel codes
pub mod power {
    /// Status reported while in standby
    pub const STATUS_OFF: &str = "1";
    /// Status reported while powered
    pub const STATUS_ON: &str = "2";
    /// Command to power on
    pub const ON: &str = "2";
    /// Command to enter standby
    pub const OFF: &str = "3";
}

/// Mute channel codes, shared by status and command
pub mod mute {
    pub const OFF: &str = "1";
    pub const ON: &str = "2";
}

/// Volume channel codes
pub mod volume {
    /// Relative step up
    pub const UP: &str = "1";
    /// Relative step down
    pub const DOWN: &str = "2";

    /// Absolute level command for a decibel value
    ///
    /// The receiver expects a leading `0` in front of the signed value,
    /// so `-36` is sent as `0-36`.
    pub fn level(decibel: i64) -> String {
        format!("0{}", decibel)
    }
}

/// Sound mode code as the receiver expects it on the command path
///
/// Sound mode commands carry one more leading `0` than the status codes the
/// receiver reports, source commands do not.
pub fn sound_mode_command(code: &str) -> String {
    format!("0{}", code)
}
