use crate::error::Result;
use crate::types::{MuteState, PowerState, VolumeLevel};
use bitflags::bitflags;

bitflags! {
    /// Media player capabilities advertised to the host platform
    ///
    /// Bit positions follow the host's generic media player feature flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SupportedFeatures: u32 {
        const VOLUME_SET = 1 << 2;
        const VOLUME_MUTE = 1 << 3;
        const TURN_ON = 1 << 7;
        const TURN_OFF = 1 << 8;
        const VOLUME_STEP = 1 << 10;
        const SELECT_SOURCE = 1 << 11;
        const SELECT_SOUND_MODE = 1 << 16;
    }
}

/// Generic media player interface driven by the host platform
///
/// The host calls [`update`](MediaPlayer::update) on its polling schedule and
/// reads the cached properties in between. Commands do not touch the cached
/// properties; the next update picks up their effect.
pub trait MediaPlayer {
    fn name(&self) -> &str;

    /// Power state, `None` until first observed
    fn state(&self) -> Option<PowerState>;

    /// Volume level (0..1)
    fn volume_level(&self) -> Option<VolumeLevel>;

    fn is_volume_muted(&self) -> Option<MuteState>;

    /// Name of the current input source
    fn source(&self) -> Option<&str>;

    /// Name of the current sound mode
    fn sound_mode(&self) -> Option<&str>;

    fn supported_features(&self) -> SupportedFeatures;

    /// Available input source names
    fn source_list(&self) -> Vec<String>;

    /// Available sound mode names
    fn sound_mode_list(&self) -> Vec<String>;

    /// Refresh cached state from the device
    fn update(&mut self) -> Result<()>;

    fn turn_on(&mut self) -> Result<()>;

    fn turn_off(&mut self) -> Result<()>;

    fn volume_up(&mut self) -> Result<()>;

    fn volume_down(&mut self) -> Result<()>;

    /// Set volume level, range 0..1
    fn set_volume_level(&mut self, volume: VolumeLevel) -> Result<()>;

    fn select_source(&mut self, source: &str) -> Result<()>;

    fn select_sound_mode(&mut self, sound_mode: &str) -> Result<()>;

    /// Mute (true) or unmute (false)
    fn mute_volume(&mut self, mute: MuteState) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_bits_match_host_values() {
        assert_eq!(SupportedFeatures::VOLUME_SET.bits(), 4);
        assert_eq!(SupportedFeatures::VOLUME_MUTE.bits(), 8);
        assert_eq!(SupportedFeatures::TURN_ON.bits(), 128);
        assert_eq!(SupportedFeatures::TURN_OFF.bits(), 256);
        assert_eq!(SupportedFeatures::VOLUME_STEP.bits(), 1024);
        assert_eq!(SupportedFeatures::SELECT_SOURCE.bits(), 2048);
        assert_eq!(SupportedFeatures::SELECT_SOUND_MODE.bits(), 65536);
    }
}
