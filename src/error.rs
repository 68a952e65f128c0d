//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Places API refused a query; the hint says what to change
    #[error("Places API error: {message}{}", .hint.map(|h| format!(" ({h})")).unwrap_or_default())]
    Places {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Response or file parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Itinerary delivery failed or was rejected before sending
    #[error("{0}")]
    Delivery(String),

    /// System clipboard unavailable
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a Places API error with HTTP status
    pub fn places_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            400 => Some("The search query was malformed"),
            401 | 403 => Some("Check the API key (set PLACES_API_KEY or use :key)"),
            429 => Some("Quota exceeded - wait a moment and try again"),
            500..=599 => Some("Places server error - try again later"),
            _ => None,
        };
        Self::Places {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Whether this error means the transport itself failed (unreachable host,
    /// timeout, unreadable body) rather than the server answering with a refusal.
    ///
    /// Aggregation stops on transport failures and skips the keyword otherwise.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Parse { .. })
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}
