//! FreeThullu Shortcut - desktop launcher installation for the FreeThullu music player.
//!
//! The player itself is installed separately, typically as `musicplayer-gui`
//! in `~/.local/bin`. This crate registers it with the desktop: it writes an
//! XDG desktop entry pointing at the installed binary, caches an icon and
//! nudges the desktop environment to re-index.
//!
//! See [`ShortcutInstaller`] for the pipeline.

pub mod config;
pub mod error;
pub mod network;
pub mod platform;
pub mod shortcut;

// Re-export commonly used types
pub use config::{AppConfig, InstallerConfig, NetworkConfig};
pub use error::{Result, ShortcutError};
pub use shortcut::{DesktopEntry, IconFetcher, IconOutcome, InstallReport, ShortcutInstaller};
