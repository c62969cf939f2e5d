use crate::error::{MarantzError, Result};
use crate::types::PlayerState;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Update published by a [`Poller`](crate::Poller)
#[derive(Debug, Clone)]
pub enum StateUpdate {
    /// A poll changed at least one observed field
    Changed(PlayerState),

    /// A scheduled poll failed
    PollFailed(Arc<MarantzError>),
}

/// Receiver for state updates
///
/// Every [`StateUpdate::Changed`] carries the full observed state, so a slow
/// subscriber that falls behind skips the stale updates instead of failing.
pub struct StateReceiver {
    rx: broadcast::Receiver<StateUpdate>,
}

impl StateReceiver {
    pub(crate) fn new(rx: broadcast::Receiver<StateUpdate>) -> Self {
        Self { rx }
    }

    /// Wait for the next state update
    ///
    /// Returns `ConnectionClosed` once the poller has been dropped.
    pub async fn recv(&mut self) -> Result<StateUpdate> {
        loop {
            match self.rx.recv().await {
                Ok(update) => return Ok(update),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!("Subscriber skipped {} stale updates", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(MarantzError::ConnectionClosed)
                }
            }
        }
    }

    /// Drain pending updates without waiting and return the newest one
    ///
    /// Returns `None` when nothing is pending. Updates already buffered are
    /// still returned after the poller has been dropped.
    pub fn latest(&mut self) -> Result<Option<StateUpdate>> {
        let mut newest = None;
        loop {
            match self.rx.try_recv() {
                Ok(update) => newest = Some(update),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(newest),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return match newest {
                        Some(update) => Ok(Some(update)),
                        None => Err(MarantzError::ConnectionClosed),
                    }
                }
            }
        }
    }
}
