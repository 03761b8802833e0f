//! Desktop environment cache refresh.
//!
//! After the entry is written, launchers pick it up faster if their caches are
//! rebuilt. Which tools exist depends on the desktop environment, so the
//! refreshers are chosen by probing the search path. Every refresh is
//! best-effort: a missing or failing tool is never an error.

use super::executable::find_executable;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// KDE's sycoca builders, newest first.
const SYCOCA_BUILDERS: [&str; 2] = ["kbuildsycoca6", "kbuildsycoca5"];

/// A cache the installer can ask the desktop environment to rebuild.
pub trait CacheRefresher {
    /// Name of the tool, for logging and reporting.
    fn name(&self) -> &'static str;

    /// The command to run.
    fn command(&self) -> Command;

    /// Run the tool. Returns whether it exited successfully.
    fn refresh(&self) -> bool {
        match self.command().output() {
            Ok(output) if output.status.success() => {
                debug!("{} finished", self.name());
                true
            }
            Ok(output) => {
                debug!(
                    "{} exited with {}: {}",
                    self.name(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                false
            }
            Err(e) => {
                debug!("Failed to run {}: {}", self.name(), e);
                false
            }
        }
    }
}

/// `update-desktop-database <apps_dir>` (desktop-file-utils).
pub struct DesktopDatabaseRefresher {
    program: PathBuf,
    apps_dir: PathBuf,
}

impl CacheRefresher for DesktopDatabaseRefresher {
    fn name(&self) -> &'static str {
        "update-desktop-database"
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.arg(&self.apps_dir);
        command
    }
}

/// `kbuildsycoca{6,5} --noincremental` (KDE Plasma).
pub struct SycocaRefresher {
    name: &'static str,
    program: PathBuf,
}

impl CacheRefresher for SycocaRefresher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("--noincremental");
        command
    }
}

/// Probe `search_path` for the available refresh tools.
///
/// At most one sycoca builder is returned; `kbuildsycoca6` wins over
/// `kbuildsycoca5` when both are installed.
pub fn detect_refreshers(search_path: &OsStr, apps_dir: &Path) -> Vec<Box<dyn CacheRefresher>> {
    let mut refreshers: Vec<Box<dyn CacheRefresher>> = Vec::new();

    match find_executable("update-desktop-database", search_path) {
        Some(program) => refreshers.push(Box::new(DesktopDatabaseRefresher {
            program,
            apps_dir: apps_dir.to_path_buf(),
        })),
        None => debug!("update-desktop-database not available, skipping"),
    }

    let sycoca = SYCOCA_BUILDERS
        .iter()
        .find_map(|name| find_executable(name, search_path).map(|program| (*name, program)));
    match sycoca {
        Some((name, program)) => refreshers.push(Box::new(SycocaRefresher { name, program })),
        None => debug!("kbuildsycoca not available, skipping"),
    }

    refreshers
}

/// Run every refresher, returning the names of those that succeeded.
pub fn refresh_all(refreshers: &[Box<dyn CacheRefresher>]) -> Vec<&'static str> {
    refreshers
        .iter()
        .filter(|refresher| refresher.refresh())
        .map(|refresher| refresher.name())
        .collect()
}
