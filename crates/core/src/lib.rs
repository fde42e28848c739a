//! Scrollsync Core
//!
//! Shared result type, error type and logging setup for the scrollsync
//! workspace.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::ScrollSyncError;

/// Core result type for scrollsync operations
pub type Result<T> = std::result::Result<T, ScrollSyncError>;

/// Version information for scrollsync
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_error_display() {
        let err = ScrollSyncError::Trace("unexpected token".to_string());
        assert_eq!(err.to_string(), "Trace error: unexpected token");

        let err = ScrollSyncError::Channel("request channel closed".to_string());
        assert_eq!(err.to_string(), "Channel error: request channel closed");
    }
}
