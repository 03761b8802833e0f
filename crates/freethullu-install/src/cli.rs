//! Command-line arguments.

use clap::Parser;
use freethullu_shortcut::InstallerConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "freethullu-install", version)]
#[command(about = "Install the FreeThullu desktop shortcut for the current user")]
pub struct Args {
    /// JSON config file (unset keys keep their defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Executable to look up on PATH
    #[arg(long, value_name = "NAME")]
    pub executable: Option<String>,

    /// Where to download the icon from
    #[arg(long, value_name = "URL")]
    pub icon_url: Option<String>,

    /// Directory to cache the icon in (default: ~/.local/share/icons)
    #[arg(long, value_name = "DIR")]
    pub icon_dir: Option<PathBuf>,

    /// Directory to write the desktop entry to (default: ~/.local/share/applications)
    #[arg(long, value_name = "DIR")]
    pub apps_dir: Option<PathBuf>,

    /// Skip update-desktop-database / kbuildsycoca
    #[arg(long)]
    pub no_refresh: bool,

    /// Print the desktop entry instead of installing it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, mut config: InstallerConfig) -> InstallerConfig {
        if let Some(ref name) = self.executable {
            config.executable_name = name.clone();
            // Qt takes the window class from the binary name.
            config.startup_wm_class = Some(name.clone());
        }
        if let Some(ref url) = self.icon_url {
            config.icon_url = url.clone();
        }
        if let Some(ref dir) = self.icon_dir {
            config.icon_dir = Some(dir.clone());
        }
        if let Some(ref dir) = self.apps_dir {
            config.apps_dir = Some(dir.clone());
        }
        if self.no_refresh {
            config.refresh_caches = false;
        }
        config
    }
}
