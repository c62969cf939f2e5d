//! Recording receiver used by the unit tests.

use crate::error::{MarantzError, Result};
use crate::protocol::Channel;
use crate::receiver::ReceiverControl;
use crate::types::Decibel;
use std::sync::{Arc, Mutex};

/// One call made against the mock
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub channel: Channel,
    pub sigil: String,
    pub code: Option<String>,
}

#[derive(Debug, Default)]
pub struct Script {
    pub power: Option<String>,
    pub mute: Option<String>,
    pub volume: Option<Decibel>,
    pub source: Option<String>,
    pub sound_mode: Option<String>,
    /// Fail every call on this channel
    pub fail: Option<Channel>,
    pub calls: Vec<Call>,
}

/// Cloneable handle; clones share the script and call log
#[derive(Debug, Clone, Default)]
pub struct MockReceiver {
    script: Arc<Mutex<Script>>,
}

impl MockReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script().calls.clone()
    }

    pub fn last_call(&self) -> Option<Call> {
        self.script().calls.last().cloned()
    }

    fn record(&mut self, channel: Channel, sigil: &str, code: Option<&str>) -> Result<()> {
        let mut script = self.script();
        script.calls.push(Call {
            channel,
            sigil: sigil.to_string(),
            code: code.map(str::to_string),
        });
        if script.fail == Some(channel) {
            return Err(MarantzError::receiver(format!("{:?} channel failed", channel)));
        }
        Ok(())
    }
}

impl ReceiverControl for MockReceiver {
    fn main_power(&mut self, sigil: &str, code: &str) -> Result<Option<String>> {
        self.record(Channel::Power, sigil, Some(code))?;
        Ok(self.script().power.clone())
    }

    fn main_mute(&mut self, sigil: &str, code: &str) -> Result<Option<String>> {
        self.record(Channel::Mute, sigil, Some(code))?;
        Ok(self.script().mute.clone())
    }

    fn main_volume(&mut self, sigil: &str, code: &str) -> Result<Option<Decibel>> {
        self.record(Channel::Volume, sigil, Some(code))?;
        Ok(self.script().volume)
    }

    fn main_source(&mut self, sigil: &str, code: Option<&str>) -> Result<Option<String>> {
        self.record(Channel::Source, sigil, code)?;
        Ok(self.script().source.clone())
    }

    fn main_sound_mode(&mut self, sigil: &str, code: Option<&str>) -> Result<Option<String>> {
        self.record(Channel::SoundMode, sigil, code)?;
        Ok(self.script().sound_mode.clone())
    }
}
