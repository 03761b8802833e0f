//! FreeThullu installer - registers the music player with the desktop.
//!
//! Finds `musicplayer-gui` on `PATH`, downloads the icon and writes
//! `~/.local/share/applications/freethullu.desktop`. Exits non-zero only when
//! the player (or the applications directory) cannot be used.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use freethullu_shortcut::{platform, IconOutcome, InstallerConfig, ShortcutInstaller};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging; RUST_LOG takes precedence over --debug
    let default_level = if args.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    if !platform::supports_desktop_entries() {
        warn!(
            "Desktop entries are an XDG feature; nothing on {} will read the file",
            platform::current_platform()
        );
    }

    let config = build_config(&args)?;
    let installer = ShortcutInstaller::new(config).context("Invalid installer configuration")?;

    if args.dry_run {
        let entry = installer.plan()?;
        let path = installer.config().desktop_file_path()?;
        info!("Dry run: would write {}", path.display());
        // Intentional stdout: the rendered entry is the output of a dry run
        print!("{}", entry);
        return Ok(());
    }

    let report = installer.install().await?;

    match &report.icon {
        IconOutcome::Downloaded { path, bytes } => {
            info!("Icon: {} ({} bytes)", path.display(), bytes);
        }
        IconOutcome::Fallback { identifier, .. } => {
            warn!("Icon: using themed fallback '{}'", identifier);
        }
    }
    if !report.refreshed.is_empty() {
        info!("Refreshed: {}", report.refreshed.join(", "));
    }
    info!(
        "Done! {} should now appear in your application menu ({})",
        installer.config().display_name,
        report.desktop_file.display()
    );

    Ok(())
}

/// Defaults, then the config file, then command-line overrides.
fn build_config(args: &Args) -> Result<InstallerConfig> {
    let base = match &args.config {
        Some(path) => InstallerConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => InstallerConfig::default(),
    };

    Ok(args.apply(base))
}
