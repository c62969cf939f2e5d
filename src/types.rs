use crate::protocol::power;
use serde::{Deserialize, Serialize};

/// Volume in receiver decibels
pub type Decibel = f64;

/// Normalized volume level, nominally 0..1
pub type VolumeLevel = f64;

/// Mute state
pub type MuteState = bool;

/// Power lifecycle of the receiver
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    /// Receiver is in standby
    Off,
    /// Receiver is powered
    On,
    /// Receiver answered with a status code we do not recognize
    Unknown,
}

impl PowerState {
    /// Map a power status code to a state
    pub fn from_status(status: &str) -> Self {
        match status {
            power::STATUS_OFF => PowerState::Off,
            power::STATUS_ON => PowerState::On,
            _ => PowerState::Unknown,
        }
    }
}

/// Observed receiver state
///
/// Each field is refreshed independently by a successful poll and stays
/// `None` until the first one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Power lifecycle reported by the last readable power poll
    pub power: Option<PowerState>,

    /// Whether the main zone is muted
    pub muted: Option<MuteState>,

    /// Volume as a fraction of the configured decibel range
    pub volume: Option<VolumeLevel>,

    /// Display name of the active source, `None` when the code is unmapped
    pub source: Option<String>,

    /// Display name of the active sound mode, `None` when the code is unmapped
    pub sound_mode: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_state_from_status() {
        assert_eq!(PowerState::from_status("1"), PowerState::Off);
        assert_eq!(PowerState::from_status("2"), PowerState::On);
        assert_eq!(PowerState::from_status("9"), PowerState::Unknown);
        assert_eq!(PowerState::from_status(""), PowerState::Unknown);
    }

    #[test]
    fn test_power_state_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PowerState::On).unwrap(), "\"on\"");
        assert_eq!(
            serde_json::to_string(&PowerState::Unknown).unwrap(),
            "\"unknown\""
        );
    }
}
