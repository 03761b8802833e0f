//! Error types for the shortcut installer.
//!
//! Only resolution, applications-directory and desktop-file errors are fatal
//! to an install run. Icon errors, including an icon directory that cannot be
//! created, are turned into a fallback icon and never reach the caller.

use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for shortcut installation.
#[derive(Debug, Error)]
pub enum ShortcutError {
    // Resolution errors
    #[error(
        "Could not find `{name}` on PATH. Make sure ~/.local/bin is in your PATH \
         (for example: export PATH=\"$HOME/.local/bin:$PATH\") and that the player is installed"
    )]
    ExecutableNotFound {
        name: String,
        /// The search path that was scanned.
        search_path: OsString,
    },

    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Download failed for {url}: {message}")]
    DownloadFailed { url: String, message: String },

    // File system errors
    #[error(
        "IO error{}: {message}",
        .path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default()
    )]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

/// Result type alias for shortcut operations.
pub type Result<T> = std::result::Result<T, ShortcutError>;

impl From<std::io::Error> for ShortcutError {
    fn from(err: std::io::Error) -> Self {
        ShortcutError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for ShortcutError {
    fn from(err: serde_json::Error) -> Self {
        ShortcutError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for ShortcutError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ShortcutError::Timeout(std::time::Duration::from_secs(0))
        } else {
            ShortcutError::Network {
                message: err.to_string(),
                source: Some(err),
            }
        }
    }
}

impl ShortcutError {
    /// Create an IO error with path context.
    ///
    /// `action` names what was being attempted; the OS error text is appended.
    pub fn io_with_path(
        err: std::io::Error,
        action: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        ShortcutError::Io {
            message: format!("{}: {}", action.into(), err),
            path: Some(path.into()),
            source: Some(err),
        }
    }
}
