//! Rust library for exposing Marantz AV receivers as smart-home media players
//!
//! This library adapts a Marantz receiver, reached through an external
//! receiver-control library, to a generic media player interface. It supports:
//!
//! - Power on/off and power state polling
//! - Absolute and stepped volume control, mapped onto a configurable dB range
//! - Mute control
//! - Input source and sound mode selection by display name
//! - Periodic background polling with state change subscriptions
//!
//! # Quick Start
//!
//! ```no_run
//! use marantz_tcp::{setup_platform, MarantzConfig, MediaPlayer, ReceiverControl, Result};
//! # struct Serial;
//! # impl Serial { fn open(_: &str, _: &str) -> Result<Self> { Ok(Serial) } }
//! # impl ReceiverControl for Serial {
//! #     fn main_power(&mut self, _: &str, _: &str) -> Result<Option<String>> { Ok(None) }
//! #     fn main_mute(&mut self, _: &str, _: &str) -> Result<Option<String>> { Ok(None) }
//! #     fn main_volume(&mut self, _: &str, _: &str) -> Result<Option<f64>> { Ok(None) }
//! #     fn main_source(&mut self, _: &str, _: Option<&str>) -> Result<Option<String>> { Ok(None) }
//! #     fn main_sound_mode(&mut self, _: &str, _: Option<&str>) -> Result<Option<String>> { Ok(None) }
//! # }
//!
//! fn main() -> Result<()> {
//!     let config = MarantzConfig::from_json(
//!         r#"{
//!             "host": "192.168.1.50",
//!             "port": "23",
//!             "sources": {"01": "CD", "02": "TUNER"},
//!             "soundmode": {"05": "STEREO"}
//!         }"#,
//!     )?;
//!
//!     // `Serial::open` stands in for the receiver-control library
//!     let mut receiver = setup_platform(&config, Serial::open)?;
//!
//!     receiver.turn_on()?;
//!     receiver.set_volume_level(0.4)?;
//!     receiver.select_source("TUNER")?;
//!
//!     receiver.update()?;
//!     println!("{:?} at {:?}", receiver.state(), receiver.volume_level());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **Platform**: configuration validation, collaborator setup, first poll
//! - **Marantz**: the media player adapter, unit conversion and name lookup
//! - **Poller**: background polling and command serialization on tokio
//! - **Receiver**: the trait the external receiver-control library implements
//! - **Protocol**: channel and command codes
//! - **Types**: observed state and domain types

mod config;
mod error;
mod mapping;
mod marantz;
mod media_player;
mod platform;
mod poller;
pub mod protocol;
mod receiver;
mod subscription;
mod types;
mod volume;

#[cfg(test)]
mod mock;

// Public exports
pub use config::{MarantzConfig, DEFAULT_MAX_VOLUME, DEFAULT_MIN_VOLUME, DEFAULT_NAME};
pub use error::{MarantzError, Result};
pub use mapping::NameTable;
pub use marantz::{Marantz, SUPPORT_MARANTZ};
pub use media_player::{MediaPlayer, SupportedFeatures};
pub use platform::setup_platform;
pub use poller::{Poller, DEFAULT_SCAN_INTERVAL};
pub use receiver::ReceiverControl;
pub use subscription::{StateReceiver, StateUpdate};
pub use types::{Decibel, MuteState, PlayerState, PowerState, VolumeLevel};
pub use volume::VolumeScale;
