//! Error types for the host layer.

use limitedwip_common::CommonError;
use thiserror::Error;

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    /// A line of the event stream is not a valid event.
    #[error("invalid event on line {line}: {source}")]
    InvalidEvent {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read events: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Settings(#[from] CommonError),
}
