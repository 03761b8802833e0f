//! The install pipeline.
//!
//! resolve executable -> provision directories -> fetch icon -> write entry -> refresh caches
//!
//! Only resolution is expected to fail in practice. It runs before anything
//! touches the filesystem, so a failed run leaves no partial artifacts. The
//! applications directory and the entry itself are also fatal; every icon
//! problem, including an icon directory that cannot be created, falls back
//! to the themed icon.

use super::cache::{detect_refreshers, refresh_all};
use super::desktop_entry::DesktopEntry;
use super::executable::resolve_executable;
use super::icon::{HttpIconFetcher, IconFetcher, IconManager, IconOutcome};
use crate::config::InstallerConfig;
use crate::error::{Result, ShortcutError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of a completed install.
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Absolute path written to `Exec=`.
    pub executable: PathBuf,
    /// The desktop entry that was written.
    pub desktop_file: PathBuf,
    /// How the icon was provided.
    pub icon: IconOutcome,
    /// Cache refresh tools that ran successfully.
    pub refreshed: Vec<&'static str>,
}

/// Installs the launcher entry for the player.
pub struct ShortcutInstaller {
    config: InstallerConfig,
    fetcher: Box<dyn IconFetcher>,
}

impl ShortcutInstaller {
    /// Create an installer that downloads the icon over HTTP.
    pub fn new(config: InstallerConfig) -> Result<Self> {
        let fetcher = HttpIconFetcher::new(config.download_timeout())?;
        Self::with_fetcher(config, Box::new(fetcher))
    }

    /// Create an installer with a custom icon source.
    pub fn with_fetcher(config: InstallerConfig, fetcher: Box<dyn IconFetcher>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, fetcher })
    }

    pub fn config(&self) -> &InstallerConfig {
        &self.config
    }

    /// Run the full install.
    pub async fn install(&self) -> Result<InstallReport> {
        let search_path = self.config.search_path();

        info!("Locating {}...", self.config.executable_name);
        let executable = resolve_executable(&self.config.executable_name, &search_path)?;
        info!("Found {}", executable.display());

        let icon_dir = self.config.icon_dir()?;
        let apps_dir = self.config.apps_dir()?;
        provision_dir(&apps_dir)?;

        let icon_manager = IconManager::new(
            self.config.icon_url.clone(),
            icon_dir.join(&self.config.icon_file_name),
            self.config.fallback_icon.clone(),
        );
        // An unusable icon directory only costs us the custom icon
        let icon = match provision_dir(&icon_dir) {
            Ok(()) => icon_manager.install(self.fetcher.as_ref()).await,
            Err(e) => icon_manager.fallback(e),
        };

        let desktop_file = apps_dir.join(&self.config.desktop_file_name);
        info!("Writing {}", desktop_file.display());
        self.build_entry(&executable, &icon.icon_reference())
            .write_to_file(&desktop_file)?;

        let refreshed = if self.config.refresh_caches {
            info!("Refreshing desktop caches...");
            refresh_all(&detect_refreshers(&search_path, &apps_dir))
        } else {
            debug!("Cache refresh disabled");
            Vec::new()
        };

        info!("{} shortcut installed", self.config.display_name);

        Ok(InstallReport {
            executable,
            desktop_file,
            icon,
            refreshed,
        })
    }

    /// The entry an install would write, assuming the icon download succeeds.
    ///
    /// Resolves the executable but writes nothing.
    pub fn plan(&self) -> Result<DesktopEntry> {
        let executable =
            resolve_executable(&self.config.executable_name, &self.config.search_path())?;
        let icon_path = self.config.icon_path()?;
        Ok(self.build_entry(&executable, &icon_path.display().to_string()))
    }

    /// Build the desktop entry for a resolved executable and icon reference.
    pub fn build_entry(&self, executable: &Path, icon: &str) -> DesktopEntry {
        let config = &self.config;
        let mut builder = DesktopEntry::builder()
            .name(&config.display_name)
            .exec(executable.display().to_string())
            .icon(icon)
            .terminal(config.terminal)
            .categories(config.categories.iter().cloned())
            .keywords(config.keywords.iter().cloned());

        if !config.comment.is_empty() {
            builder = builder.comment(&config.comment);
        }
        if let Some(ref wm_class) = config.startup_wm_class {
            builder = builder.startup_wm_class(wm_class);
        }

        builder.build()
    }
}

fn provision_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| ShortcutError::io_with_path(e, "create directory", dir))?;
    debug!("Ensured directory {}", dir.display());
    Ok(())
}
