use crate::config::MarantzConfig;
use crate::error::Result;
use crate::marantz::Marantz;
use crate::media_player::MediaPlayer;
use crate::receiver::ReceiverControl;

/// Set up a receiver the way the host platform registers it
///
/// Validates `config`, opens the collaborator with `connect(host, port)`,
/// builds the adapter and polls it once so the host sees real state from the
/// start.
///
/// # Example
///
/// ```no_run
/// use marantz_tcp::{setup_platform, MarantzConfig, MediaPlayer, ReceiverControl, Result};
/// # struct Serial;
/// # impl Serial { fn open(_: &str, _: &str) -> Result<Self> { Ok(Serial) } }
/// # impl ReceiverControl for Serial {
/// #     fn main_power(&mut self, _: &str, _: &str) -> Result<Option<String>> { Ok(None) }
/// #     fn main_mute(&mut self, _: &str, _: &str) -> Result<Option<String>> { Ok(None) }
/// #     fn main_volume(&mut self, _: &str, _: &str) -> Result<Option<f64>> { Ok(None) }
/// #     fn main_source(&mut self, _: &str, _: Option<&str>) -> Result<Option<String>> { Ok(None) }
/// #     fn main_sound_mode(&mut self, _: &str, _: Option<&str>) -> Result<Option<String>> { Ok(None) }
/// # }
///
/// # fn main() -> Result<()> {
/// let config = MarantzConfig::from_json(r#"{"host": "192.168.1.50", "port": "23"}"#)?;
/// let receiver = setup_platform(&config, Serial::open)?;
/// println!("{} is {:?}", receiver.name(), receiver.state());
/// # Ok(())
/// # }
/// ```
pub fn setup_platform<R, F>(config: &MarantzConfig, connect: F) -> Result<Marantz<R>>
where
    R: ReceiverControl,
    F: FnOnce(&str, &str) -> Result<R>,
{
    config.validate()?;

    tracing::info!(
        "Setting up {} at {}:{}",
        config.name,
        config.host,
        config.port
    );
    let receiver = connect(&config.host, &config.port)?;

    let mut player = Marantz::new(config, receiver)?;
    player.update()?;

    tracing::info!("{} ready, state {:?}", player.name(), player.state());
    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarantzError;
    use crate::mock::MockReceiver;
    use crate::types::PowerState;

    #[test]
    fn test_setup_connects_and_polls() {
        let mock = MockReceiver::new();
        mock.script().power = Some("1".to_string());
        let config = MarantzConfig::new("10.0.0.7", "4001").with_name("Den");

        let mut address = None;
        let player = setup_platform(&config, |host, port| {
            address = Some(format!("{}:{}", host, port));
            Ok(mock.clone())
        })
        .unwrap();

        assert_eq!(address.as_deref(), Some("10.0.0.7:4001"));
        assert_eq!(player.name(), "Den");
        assert_eq!(player.state(), Some(PowerState::Off));
        assert_eq!(mock.calls().len(), 5);
    }

    #[test]
    fn test_setup_validates_before_connecting() {
        let config = MarantzConfig::new("10.0.0.7", "4001").with_volume_range(0, 0);
        let mut connected = false;

        let result = setup_platform(&config, |_, _| {
            connected = true;
            Ok(MockReceiver::new())
        });

        assert!(matches!(result, Err(MarantzError::InvalidConfig(_))));
        assert!(!connected);
    }

    #[test]
    fn test_setup_propagates_connect_error() {
        let config = MarantzConfig::new("10.0.0.7", "4001");
        let result = setup_platform::<MockReceiver, _>(&config, |host, _| {
            Err(MarantzError::receiver(format!("{} unreachable", host)))
        });
        assert!(matches!(result, Err(MarantzError::Receiver { .. })));
    }
}
