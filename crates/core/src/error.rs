//! Error types for scrollsync

use thiserror::Error;

/// Main error type for scrollsync operations
#[derive(Error, Debug)]
pub enum ScrollSyncError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A recorded event trace could not be read
    #[error("Trace error: {0}")]
    Trace(String),

    /// The other end of an event or request channel is gone
    #[error("Channel error: {0}")]
    Channel(String),
}
