//! File downloads.
//!
//! The body is streamed into a temp file next to the destination and renamed
//! into place once complete, so the destination is either the previous file
//! or a complete new one.

use crate::error::{Result, ShortcutError};
use crate::network::client::HttpClient;
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Download manager for single-file downloads.
pub struct DownloadManager {
    http: HttpClient,
    /// Accepted `Content-Type` prefixes. Empty accepts anything.
    accepted_content_types: Vec<String>,
}

impl DownloadManager {
    /// Create a download manager around an HTTP client.
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            accepted_content_types: Vec::new(),
        }
    }

    /// Restrict downloads to responses whose content type starts with one of `prefixes`.
    ///
    /// Responses without a `Content-Type` header are accepted.
    pub fn with_content_types<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_content_types = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Download `url` to `destination`.
    ///
    /// # Returns
    ///
    /// Total bytes written on success. Non-success statuses, rejected content
    /// types and empty bodies are errors and leave `destination` untouched.
    pub async fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        let parent = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ShortcutError::io_with_path(e, "create download directory", parent)
            })?;
        }

        let response = self.http.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(download_failed(url, format!("server returned status {}", status)));
        }

        if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default().to_ascii_lowercase();
            if !self.accepts_content_type(&content_type) {
                return Err(download_failed(
                    url,
                    format!("unexpected content type {:?}", content_type),
                ));
            }
        }

        let mut temp = NamedTempFile::new_in(parent)
            .map_err(|e| ShortcutError::io_with_path(e, "create temp file", parent))?;

        let mut bytes_downloaded: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| self.http.map_error(e))?;
            temp.write_all(&chunk)
                .map_err(|e| ShortcutError::io_with_path(e, "write temp file", temp.path()))?;
            bytes_downloaded += chunk.len() as u64;
        }

        if bytes_downloaded == 0 {
            return Err(download_failed(url, "empty response body"));
        }

        temp.flush()
            .map_err(|e| ShortcutError::io_with_path(e, "flush temp file", temp.path()))?;

        temp.persist(destination).map_err(|e| {
            ShortcutError::io_with_path(e.error, "move download into place", destination)
        })?;

        debug!("Download of {} complete", url);
        info!("Downloaded {} bytes to {}", bytes_downloaded, destination.display());
        Ok(bytes_downloaded)
    }

    fn accepts_content_type(&self, content_type: &str) -> bool {
        self.accepted_content_types.is_empty()
            || self
                .accepted_content_types
                .iter()
                .any(|prefix| content_type.starts_with(prefix.as_str()))
    }
}

fn download_failed(url: &str, message: impl Into<String>) -> ShortcutError {
    ShortcutError::DownloadFailed {
        url: url.to_string(),
        message: message.into(),
    }
}
