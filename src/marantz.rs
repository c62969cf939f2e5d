use crate::config::MarantzConfig;
use crate::error::{MarantzError, Result};
use crate::mapping::NameTable;
use crate::media_player::{MediaPlayer, SupportedFeatures};
use crate::protocol::{self, mute, power, volume, QUERY, SEPARATOR};
use crate::receiver::ReceiverControl;
use crate::types::{MuteState, PlayerState, PowerState, VolumeLevel};
use crate::volume::VolumeScale;

/// Features every Marantz receiver supports
pub const SUPPORT_MARANTZ: SupportedFeatures = SupportedFeatures::VOLUME_SET
    .union(SupportedFeatures::VOLUME_MUTE)
    .union(SupportedFeatures::TURN_ON)
    .union(SupportedFeatures::TURN_OFF)
    .union(SupportedFeatures::VOLUME_STEP)
    .union(SupportedFeatures::SELECT_SOURCE)
    .union(SupportedFeatures::SELECT_SOUND_MODE);

/// A Marantz receiver exposed as a media player
///
/// `Marantz` caches the last observed receiver state and translates media
/// player commands into calls on the [`ReceiverControl`] collaborator. Name
/// tables and the volume scale are fixed at construction.
///
/// # Example
///
/// ```
/// use marantz_tcp::{Marantz, MarantzConfig, MediaPlayer, ReceiverControl, Result};
///
/// struct Offline;
///
/// impl ReceiverControl for Offline {
///     fn main_power(&mut self, _: &str, _: &str) -> Result<Option<String>> { Ok(None) }
///     fn main_mute(&mut self, _: &str, _: &str) -> Result<Option<String>> { Ok(None) }
///     fn main_volume(&mut self, _: &str, _: &str) -> Result<Option<f64>> { Ok(None) }
///     fn main_source(&mut self, _: &str, _: Option<&str>) -> Result<Option<String>> { Ok(None) }
///     fn main_sound_mode(&mut self, _: &str, _: Option<&str>) -> Result<Option<String>> { Ok(None) }
/// }
///
/// # fn main() -> Result<()> {
/// let config = MarantzConfig::new("192.168.1.50", "23")
///     .with_source("01", "CD")
///     .with_source("02", "TUNER");
/// let mut receiver = Marantz::new(&config, Offline)?;
///
/// receiver.update()?;
/// assert_eq!(receiver.state(), None);
/// assert_eq!(receiver.source_list(), vec!["CD", "TUNER"]);
/// # Ok(())
/// # }
/// ```
pub struct Marantz<R> {
    name: String,
    receiver: R,
    scale: VolumeScale,
    sources: NameTable,
    sound_modes: NameTable,
    state: PlayerState,
}

impl<R: ReceiverControl> Marantz<R> {
    /// Create the adapter from a validated configuration
    ///
    /// Host and port are not used here; the caller has already connected
    /// `receiver` to them.
    pub fn new(config: &MarantzConfig, receiver: R) -> Result<Self> {
        let scale = config.validate()?;

        Ok(Self {
            name: config.name.clone(),
            receiver,
            scale,
            sources: NameTable::new(config.sources.clone()),
            sound_modes: NameTable::with_command_codes(
                config.sound_modes.clone(),
                protocol::sound_mode_command,
            ),
            state: PlayerState::default(),
        })
    }

    /// Get a snapshot of the observed state
    pub fn state_snapshot(&self) -> PlayerState {
        self.state.clone()
    }

    /// Get the decibel scale used for volume conversion
    pub fn volume_scale(&self) -> VolumeScale {
        self.scale
    }

    /// Get the receiver collaborator
    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    /// Command code a source name maps to
    pub fn source_code(&self, source: &str) -> Option<&str> {
        self.sources.code(source)
    }

    /// Command code a sound mode name maps to, including its leading `0`
    pub fn sound_mode_code(&self, sound_mode: &str) -> Option<&str> {
        self.sound_modes.code(sound_mode)
    }

    // ========== Strict Commands ==========

    /// Select a source, failing on names missing from the source table
    pub fn select_source_checked(&mut self, source: &str) -> Result<()> {
        if self.sources.code(source).is_none() {
            return Err(MarantzError::UnknownSource(source.to_string()));
        }
        self.select_source(source)
    }

    /// Select a sound mode, failing on names missing from the sound mode table
    pub fn select_sound_mode_checked(&mut self, sound_mode: &str) -> Result<()> {
        if self.sound_modes.code(sound_mode).is_none() {
            return Err(MarantzError::UnknownSoundMode(sound_mode.to_string()));
        }
        self.select_sound_mode(sound_mode)
    }

    /// Set the volume level, failing on levels outside 0..1
    pub fn set_volume_level_checked(&mut self, volume: VolumeLevel) -> Result<()> {
        if !(0.0..=1.0).contains(&volume) {
            return Err(MarantzError::VolumeOutOfRange(volume));
        }
        self.set_volume_level(volume)
    }

    fn poll_power(&mut self) -> Result<()> {
        if let Some(status) = self.receiver.main_power(SEPARATOR, QUERY)? {
            let state = PowerState::from_status(&status);
            tracing::debug!("{}: power status {:?} -> {:?}", self.name, status, state);
            self.state.power = Some(state);
        }
        Ok(())
    }

    fn poll_mute(&mut self) -> Result<()> {
        match self.receiver.main_mute(SEPARATOR, QUERY)?.as_deref() {
            None => {}
            Some(mute::OFF) => self.state.muted = Some(false),
            Some(mute::ON) => self.state.muted = Some(true),
            Some(status) => tracing::warn!("Unknown mute status: {}", status),
        }
        Ok(())
    }

    fn poll_volume(&mut self) -> Result<()> {
        if let Some(decibel) = self.receiver.main_volume(SEPARATOR, QUERY)? {
            let level = self.scale.decibel_to_fraction(decibel);
            tracing::debug!("{}: volume {} dB -> {:.3}", self.name, decibel, level);
            self.state.volume = Some(level);
        }
        Ok(())
    }

    fn poll_source(&mut self) -> Result<()> {
        if let Some(code) = self.receiver.main_source(SEPARATOR, Some(QUERY))? {
            self.state.source = self.sources.name(&code).map(str::to_string);
            tracing::debug!("{}: source {:?} -> {:?}", self.name, code, self.state.source);
        }
        Ok(())
    }

    fn poll_sound_mode(&mut self) -> Result<()> {
        if let Some(code) = self.receiver.main_sound_mode(SEPARATOR, Some(QUERY))? {
            self.state.sound_mode = self.sound_modes.name(&code).map(str::to_string);
            tracing::debug!(
                "{}: sound mode {:?} -> {:?}",
                self.name,
                code,
                self.state.sound_mode
            );
        }
        Ok(())
    }
}

impl<R: ReceiverControl> MediaPlayer for Marantz<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> Option<PowerState> {
        self.state.power
    }

    fn volume_level(&self) -> Option<VolumeLevel> {
        self.state.volume
    }

    fn is_volume_muted(&self) -> Option<MuteState> {
        self.state.muted
    }

    fn source(&self) -> Option<&str> {
        self.state.source.as_deref()
    }

    fn sound_mode(&self) -> Option<&str> {
        self.state.sound_mode.as_deref()
    }

    fn supported_features(&self) -> SupportedFeatures {
        SUPPORT_MARANTZ
    }

    fn source_list(&self) -> Vec<String> {
        self.sources.names()
    }

    fn sound_mode_list(&self) -> Vec<String> {
        self.sound_modes.names()
    }

    /// Poll every channel once
    ///
    /// A channel that returns no data keeps its previous value. A collaborator
    /// error aborts the remaining polls of this cycle.
    fn update(&mut self) -> Result<()> {
        self.poll_power()?;
        self.poll_mute()?;
        self.poll_volume()?;
        self.poll_source()?;
        self.poll_sound_mode()
    }

    fn turn_on(&mut self) -> Result<()> {
        self.receiver.main_power(SEPARATOR, power::ON)?;
        Ok(())
    }

    fn turn_off(&mut self) -> Result<()> {
        self.receiver.main_power(SEPARATOR, power::OFF)?;
        Ok(())
    }

    fn volume_up(&mut self) -> Result<()> {
        self.receiver.main_volume(SEPARATOR, volume::UP)?;
        Ok(())
    }

    fn volume_down(&mut self) -> Result<()> {
        self.receiver.main_volume(SEPARATOR, volume::DOWN)?;
        Ok(())
    }

    fn set_volume_level(&mut self, level: VolumeLevel) -> Result<()> {
        let command = volume::level(self.scale.fraction_to_decibel(level)?);
        tracing::debug!("{}: set volume {:.3} -> {}", self.name, level, command);
        self.receiver.main_volume(SEPARATOR, &command)?;
        Ok(())
    }

    /// Select an input source by display name
    ///
    /// Names missing from the source table are forwarded as `None`.
    fn select_source(&mut self, source: &str) -> Result<()> {
        let code = self.sources.code(source);
        tracing::debug!("{}: select source {:?} -> {:?}", self.name, source, code);
        self.receiver.main_source(SEPARATOR, code)?;
        Ok(())
    }

    /// Select a sound mode by display name
    ///
    /// Names missing from the sound mode table are forwarded as `None`.
    fn select_sound_mode(&mut self, sound_mode: &str) -> Result<()> {
        let code = self.sound_modes.code(sound_mode);
        tracing::debug!("{}: select sound mode {:?} -> {:?}", self.name, sound_mode, code);
        self.receiver.main_sound_mode(SEPARATOR, code)?;
        Ok(())
    }

    fn mute_volume(&mut self, muted: MuteState) -> Result<()> {
        let code = if muted { mute::ON } else { mute::OFF };
        self.receiver.main_mute(SEPARATOR, code)?;
        Ok(())
    }
}
