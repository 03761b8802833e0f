//! Icon management for the launcher entry.
//!
//! Handles:
//! - Fetching the icon into the user's icon directory
//! - Falling back to a themed icon name when the fetch fails

use crate::config::NetworkConfig;
use crate::error::{Result, ShortcutError};
use crate::network::{DownloadManager, HttpClient};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Source of the icon image.
#[async_trait]
pub trait IconFetcher: Send + Sync {
    /// Fetch `url` into `destination`, returning the number of bytes written.
    async fn fetch(&self, url: &str, destination: &Path) -> Result<u64>;
}

/// Fetches icons over HTTP(S).
pub struct HttpIconFetcher {
    downloads: DownloadManager,
}

impl HttpIconFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = HttpClient::with_timeout(timeout)?;
        Ok(Self {
            downloads: DownloadManager::new(http)
                .with_content_types(NetworkConfig::ICON_CONTENT_TYPES),
        })
    }
}

#[async_trait]
impl IconFetcher for HttpIconFetcher {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<u64> {
        self.downloads.download(url, destination).await
    }
}

/// What ended up in the entry's `Icon=` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconOutcome {
    /// The icon was downloaded to `path`.
    Downloaded { path: PathBuf, bytes: u64 },
    /// The download failed; a themed icon name is used instead.
    Fallback { identifier: String, reason: String },
}

impl IconOutcome {
    /// The value for the desktop entry's `Icon=` key.
    pub fn icon_reference(&self) -> String {
        match self {
            IconOutcome::Downloaded { path, .. } => path.display().to_string(),
            IconOutcome::Fallback { identifier, .. } => identifier.clone(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, IconOutcome::Fallback { .. })
    }
}

/// Icon manager for the launcher icon.
pub struct IconManager {
    /// Remote location of the icon.
    url: String,
    /// Where the icon is cached.
    icon_path: PathBuf,
    /// Themed icon name used when the download fails.
    fallback: String,
}

impl IconManager {
    /// Create a new icon manager.
    ///
    /// # Arguments
    ///
    /// * `url` - Remote icon location
    /// * `icon_path` - Absolute path to cache the icon at
    /// * `fallback` - Themed icon name to use when the download fails
    pub fn new(
        url: impl Into<String>,
        icon_path: impl AsRef<Path>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            icon_path: icon_path.as_ref().to_path_buf(),
            fallback: fallback.into(),
        }
    }

    pub fn icon_path(&self) -> &Path {
        &self.icon_path
    }

    /// Install the icon.
    ///
    /// Never fails: any fetch error is logged and answered with the fallback
    /// identifier. A reported success is double-checked against the file on
    /// disk so the entry never points at a missing or empty file.
    pub async fn install(&self, fetcher: &dyn IconFetcher) -> IconOutcome {
        info!("Downloading icon from {}", self.url);

        match fetcher.fetch(&self.url, &self.icon_path).await {
            Ok(bytes) => match std::fs::metadata(&self.icon_path) {
                Ok(metadata) if metadata.is_file() && metadata.len() > 0 => {
                    IconOutcome::Downloaded {
                        path: self.icon_path.clone(),
                        bytes,
                    }
                }
                _ => self.fallback(ShortcutError::DownloadFailed {
                    url: self.url.clone(),
                    message: format!("no icon data at {}", self.icon_path.display()),
                }),
            },
            Err(e) => self.fallback(e),
        }
    }

    /// Give up on the custom icon and use the themed fallback.
    pub fn fallback(&self, err: ShortcutError) -> IconOutcome {
        warn!(
            "Failed to download icon ({}); using fallback icon '{}'",
            err, self.fallback
        );
        IconOutcome::Fallback {
            identifier: self.fallback.clone(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct StaticFetcher(&'static [u8]);

    #[async_trait]
    impl IconFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str, destination: &Path) -> Result<u64> {
            std::fs::write(destination, self.0)?;
            Ok(self.0.len() as u64)
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl IconFetcher for FailingFetcher {
        async fn fetch(&self, url: &str, _destination: &Path) -> Result<u64> {
            Err(ShortcutError::DownloadFailed {
                url: url.to_string(),
                message: "server returned status 404 Not Found".to_string(),
            })
        }
    }

    /// Claims success without writing anything.
    struct LyingFetcher;

    #[async_trait]
    impl IconFetcher for LyingFetcher {
        async fn fetch(&self, _url: &str, _destination: &Path) -> Result<u64> {
            Ok(42)
        }
    }

    fn manager(temp_dir: &TempDir) -> IconManager {
        IconManager::new(
            "https://example.com/icon.png",
            temp_dir.path().join("freethullu-icon.png"),
            "audio-x-generic",
        )
    }

    #[tokio::test]
    async fn test_install_downloaded() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let outcome = manager.install(&StaticFetcher(b"\x89PNG")).await;

        assert_eq!(
            outcome,
            IconOutcome::Downloaded {
                path: temp_dir.path().join("freethullu-icon.png"),
                bytes: 4,
            }
        );
        assert_eq!(
            outcome.icon_reference(),
            temp_dir.path().join("freethullu-icon.png").display().to_string()
        );
    }

    #[tokio::test]
    async fn test_install_falls_back_on_error() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let outcome = manager.install(&FailingFetcher).await;

        assert!(outcome.is_fallback());
        assert_eq!(outcome.icon_reference(), "audio-x-generic");
        assert!(!manager.icon_path().exists());
    }

    #[tokio::test]
    async fn test_install_falls_back_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let outcome = manager.install(&LyingFetcher).await;

        assert_eq!(outcome.icon_reference(), "audio-x-generic");
    }

    #[tokio::test]
    async fn test_install_falls_back_on_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let outcome = manager.install(&StaticFetcher(b"")).await;

        assert!(outcome.is_fallback());
    }
}
