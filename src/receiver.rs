use crate::error::Result;
use crate::types::Decibel;

/// Control surface of the external receiver library
///
/// Each method either queries a channel (when `code` is
/// [`QUERY`](crate::protocol::QUERY)) or sends a command code. `sigil` is the
/// [`SEPARATOR`](crate::protocol::SEPARATOR) the library's framing expects.
///
/// Implementations return `Ok(None)` whenever the receiver gave no usable
/// answer, whether it timed out, disconnected, or replied with garbage. `Err`
/// is reserved for failures the caller should see and is never swallowed by
/// [`Marantz`](crate::Marantz).
pub trait ReceiverControl {
    /// Main zone power status or command
    fn main_power(&mut self, sigil: &str, code: &str) -> Result<Option<String>>;

    /// Main zone mute status or command
    fn main_mute(&mut self, sigil: &str, code: &str) -> Result<Option<String>>;

    /// Main zone volume in dB, or a volume command
    fn main_volume(&mut self, sigil: &str, code: &str) -> Result<Option<Decibel>>;

    /// Input source status or command
    ///
    /// `code` is `None` when a source name could not be mapped to a code.
    fn main_source(&mut self, sigil: &str, code: Option<&str>) -> Result<Option<String>>;

    /// Surround sound mode status or command
    ///
    /// `code` is `None` when a sound mode name could not be mapped to a code.
    fn main_sound_mode(&mut self, sigil: &str, code: Option<&str>) -> Result<Option<String>>;
}

impl<R: ReceiverControl + ?Sized> ReceiverControl for Box<R> {
    fn main_power(&mut self, sigil: &str, code: &str) -> Result<Option<String>> {
        (**self).main_power(sigil, code)
    }

    fn main_mute(&mut self, sigil: &str, code: &str) -> Result<Option<String>> {
        (**self).main_mute(sigil, code)
    }

    fn main_volume(&mut self, sigil: &str, code: &str) -> Result<Option<Decibel>> {
        (**self).main_volume(sigil, code)
    }

    fn main_source(&mut self, sigil: &str, code: Option<&str>) -> Result<Option<String>> {
        (**self).main_source(sigil, code)
    }

    fn main_sound_mode(&mut self, sigil: &str, code: Option<&str>) -> Result<Option<String>> {
        (**self).main_sound_mode(sigil, code)
    }
}
