use crate::error::Result;
use crate::marantz::Marantz;
use crate::media_player::MediaPlayer;
use crate::receiver::ReceiverControl;
use crate::subscription::{StateReceiver, StateUpdate};
use crate::types::PlayerState;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

/// Default time between polls
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(10);

type SharedPlayer<R> = Arc<Mutex<Marantz<R>>>;

/// Periodic driver for a [`Marantz`] adapter
///
/// The poller owns the adapter and runs every call against it on tokio's
/// blocking pool, one at a time, so scheduled polls and commands issued
/// through [`run`](Poller::run) never overlap. Subscribers receive a
/// [`StateUpdate::Changed`] whenever a poll changes the observed state.
///
/// # Example
///
/// ```no_run
/// use marantz_tcp::{Marantz, MarantzConfig, MediaPlayer, Poller, ReceiverControl, Result};
/// # struct Serial;
/// # impl ReceiverControl for Serial {
/// #     fn main_power(&mut self, _: &str, _: &str) -> Result<Option<String>> { Ok(None) }
/// #     fn main_mute(&mut self, _: &str, _: &str) -> Result<Option<String>> { Ok(None) }
/// #     fn main_volume(&mut self, _: &str, _: &str) -> Result<Option<f64>> { Ok(None) }
/// #     fn main_source(&mut self, _: &str, _: Option<&str>) -> Result<Option<String>> { Ok(None) }
/// #     fn main_sound_mode(&mut self, _: &str, _: Option<&str>) -> Result<Option<String>> { Ok(None) }
/// # }
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let config = MarantzConfig::new("192.168.1.50", "23");
///     let mut poller = Poller::new(Marantz::new(&config, Serial)?);
///     let mut updates = poller.subscribe();
///     poller.start();
///
///     poller.run(|receiver| receiver.turn_on()).await?;
///
///     while let Ok(update) = updates.recv().await {
///         println!("State update: {:?}", update);
///     }
///
///     poller.stop().await;
///     Ok(())
/// }
/// ```
pub struct Poller<R> {
    player: SharedPlayer<R>,
    interval: Duration,
    update_tx: broadcast::Sender<StateUpdate>,
    stop_tx: Option<broadcast::Sender<()>>,
    task_handle: Option<tokio::task::JoinHandle<()>>,
}

impl<R: ReceiverControl + Send + 'static> Poller<R> {
    /// Wrap an adapter, polling every [`DEFAULT_SCAN_INTERVAL`] once started
    pub fn new(player: Marantz<R>) -> Self {
        let (update_tx, _) = broadcast::channel(100);
        Self {
            player: Arc::new(Mutex::new(player)),
            interval: DEFAULT_SCAN_INTERVAL,
            update_tx,
            stop_tx: None,
            task_handle: None,
        }
    }

    /// Set the time between polls; takes effect on the next `start`
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Subscribe to state updates
    pub fn subscribe(&self) -> StateReceiver {
        StateReceiver::new(self.update_tx.subscribe())
    }

    /// Get a snapshot of the last observed state
    pub fn state_snapshot(&self) -> PlayerState {
        lock(&self.player).state_snapshot()
    }

    /// Whether the polling task is running
    pub fn is_running(&self) -> bool {
        self.task_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Poll once now, publishing the new state if it changed
    pub async fn refresh(&self) -> Result<PlayerState> {
        poll_once(&self.player, &self.update_tx).await
    }

    /// Run a call against the adapter on the blocking pool
    ///
    /// Use this for commands while polling is active.
    pub async fn run<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Marantz<R>) -> Result<T> + Send + 'static,
    {
        let player = self.player.clone();
        tokio::task::spawn_blocking(move || f(&mut lock(&player))).await?
    }

    /// Start polling in the background
    ///
    /// If polling is already running it is restarted.
    pub fn start(&mut self) {
        self.signal_stop();

        let (stop_tx, mut stop_rx) = broadcast::channel(1);
        self.stop_tx = Some(stop_tx);

        let player = self.player.clone();
        let update_tx = self.update_tx.clone();
        let interval = self.interval;

        let handle = tokio::spawn(async move {
            tracing::info!("Polling every {:?}", interval);
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = stop_rx.recv() => {
                        tracing::info!("Polling stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        if let Err(e) = poll_once(&player, &update_tx).await {
                            tracing::error!("Poll failed: {}", e);
                            let _ = update_tx.send(StateUpdate::PollFailed(Arc::new(e)));
                        }
                    }
                }
            }
        });

        self.task_handle = Some(handle);
    }

    /// Stop polling
    ///
    /// The adapter and its last observed state are kept.
    pub async fn stop(&mut self) {
        self.signal_stop();
        if let Some(handle) = self.task_handle.take() {
            // Give it a moment to stop gracefully
            let _ = tokio::time::timeout(Duration::from_millis(500), handle).await;
        }
    }

    fn signal_stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl<R> Drop for Poller<R> {
    fn drop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn lock<R>(player: &Mutex<Marantz<R>>) -> MutexGuard<'_, Marantz<R>> {
    player.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn poll_once<R: ReceiverControl + Send + 'static>(
    player: &SharedPlayer<R>,
    update_tx: &broadcast::Sender<StateUpdate>,
) -> Result<PlayerState> {
    let player = player.clone();
    let (before, after) = tokio::task::spawn_blocking(move || -> Result<_> {
        let mut player = lock(&player);
        let before = player.state_snapshot();
        player.update()?;
        Ok((before, player.state_snapshot()))
    })
    .await??;

    if after != before {
        tracing::debug!("State changed: {:?}", after);
        let _ = update_tx.send(StateUpdate::Changed(after.clone()));
    }

    Ok(after)
}
