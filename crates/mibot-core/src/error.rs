//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    #[error("Failed to restore terminal: {0}")]
    TerminalRestore(String),

    // ─────────────────────────────────────────────────────────────
    // Backend Errors
    // ─────────────────────────────────────────────────────────────
    /// Transport-level failure talking to the backend (connect, timeout, body read).
    #[error("Network error: {message}")]
    Http { message: String },

    /// Backend replied with `success: false` and an optional message.
    #[error("{message}")]
    Backend { message: String },

    // ─────────────────────────────────────────────────────────────
    // Local Precondition Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Robot not connected")]
    NotConnected,

    #[error("No stitched map job to execute")]
    EmptyStitchJob,

    #[error("No map selected for stitching")]
    EmptySelection,

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid backend URL: {url}")]
    InvalidBaseUrl { url: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
        }
    }

    /// Backend-reported failure, preferring the backend message when present.
    pub fn backend(message: Option<String>, fallback: impl Into<String>) -> Self {
        Self::Backend {
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallback.into()),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    pub fn invalid_base_url(url: impl Into<String>) -> Self {
        Self::InvalidBaseUrl { url: url.into() }
    }

    /// Check if this is a recoverable error
    ///
    /// Every backend and precondition failure is recoverable: the dashboard
    /// stays interactive and surfaces the failure as a notice or an error
    /// field on the affected status slice.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Http { .. }
                | Error::Backend { .. }
                | Error::NotConnected
                | Error::EmptyStitchJob
                | Error::EmptySelection
                | Error::Json(_)
                | Error::ChannelSend { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::TerminalInit(_) | Error::InvalidBaseUrl { .. } | Error::ChannelClosed
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::http("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = Error::NotConnected;
        assert_eq!(err.to_string(), "Robot not connected");
    }

    #[test]
    fn test_backend_error_prefers_backend_message() {
        let err = Error::backend(Some("Robot not found".into()), "Command failed");
        assert_eq!(err.to_string(), "Robot not found");
    }

    #[test]
    fn test_backend_error_falls_back_on_missing_message() {
        let err = Error::backend(None, "Command failed");
        assert_eq!(err.to_string(), "Command failed");

        let err = Error::backend(Some(String::new()), "Command failed");
        assert_eq!(err.to_string(), "Command failed");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::http("timeout").is_recoverable());
        assert!(Error::backend(None, "failed").is_recoverable());
        assert!(Error::NotConnected.is_recoverable());
        assert!(Error::EmptyStitchJob.is_recoverable());
        assert!(!Error::TerminalInit("no tty".into()).is_recoverable());
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::TerminalInit("no tty".into()).is_fatal());
        assert!(Error::invalid_base_url("not a url").is_fatal());
        assert!(!Error::NotConnected.is_fatal());
        assert!(!Error::http("timeout").is_fatal());
    }
}
