//! Network utilities for fetching remote assets.
//!
//! - `client` - reqwest wrapper with timeouts and user agent
//! - `download` - streaming file download with atomic placement

mod client;
mod download;

pub use client::HttpClient;
pub use download::DownloadManager;
