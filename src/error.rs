use thiserror::Error;

/// Result type for Marantz operations
pub type Result<T> = std::result::Result<T, MarantzError>;

/// Errors that can occur when driving a Marantz receiver
#[derive(Error, Debug)]
pub enum MarantzError {
    /// Configuration values violate an invariant
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be deserialized
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// The receiver-control collaborator failed
    #[error("Receiver error: {detail}")]
    Receiver {
        /// Error detail reported by the collaborator
        detail: String,
    },

    /// Source name is not in the configured source table
    #[error("Unknown source: {0}")]
    UnknownSource(String),

    /// Sound mode name is not in the configured sound mode table
    #[error("Unknown sound mode: {0}")]
    UnknownSoundMode(String),

    /// Volume level rejected: NaN or infinite, or outside 0..1 for strict commands
    #[error("Volume out of range: {0}")]
    VolumeOutOfRange(f64),

    /// Poller was stopped or dropped
    #[error("Connection closed")]
    ConnectionClosed,

    /// A blocking adapter call panicked or was cancelled
    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl MarantzError {
    /// Build a collaborator error from any displayable detail
    pub fn receiver(detail: impl Into<String>) -> Self {
        Self::Receiver {
            detail: detail.into(),
        }
    }
}
