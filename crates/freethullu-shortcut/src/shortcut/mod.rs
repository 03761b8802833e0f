//! Desktop launcher entry installation.
//!
//! Provides functionality for:
//! - Resolving the player executable on the search path
//! - Downloading the launcher icon (with a themed fallback)
//! - Writing the `.desktop` file to `~/.local/share/applications`
//! - Refreshing desktop database and KDE sycoca caches
//!
//! # Platform Support
//!
//! Linux and other XDG desktops (Desktop Entry Specification).
//!
//! # Example
//!
//! ```rust,ignore
//! use freethullu_shortcut::{InstallerConfig, ShortcutInstaller};
//!
//! #[tokio::main]
//! async fn main() -> freethullu_shortcut::Result<()> {
//!     let installer = ShortcutInstaller::new(InstallerConfig::default())?;
//!     let report = installer.install().await?;
//!     println!("Wrote {}", report.desktop_file.display());
//!     Ok(())
//! }
//! ```

mod cache;
mod desktop_entry;
mod executable;
mod icon;
mod installer;

pub use cache::{
    detect_refreshers, refresh_all, CacheRefresher, DesktopDatabaseRefresher, SycocaRefresher,
};
pub use desktop_entry::{DesktopEntry, DesktopEntryBuilder};
pub use executable::{find_executable, resolve_executable};
pub use icon::{HttpIconFetcher, IconFetcher, IconManager, IconOutcome};
pub use installer::{InstallReport, ShortcutInstaller};
