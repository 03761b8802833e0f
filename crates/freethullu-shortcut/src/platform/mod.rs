//! Platform abstraction layer.
//!
//! All `#[cfg]` blocks for OS-specific behavior live here:
//! - `paths` - XDG data directories for icons and application entries
//! - `permissions` - executable bits

pub mod paths;
pub mod permissions;

pub use paths::{apps_dir, data_dir, icons_dir};
pub use permissions::{is_executable, set_executable};

/// Returns the current platform name.
pub fn current_platform() -> &'static str {
    #[cfg(target_os = "linux")]
    {
        "linux"
    }
    #[cfg(target_os = "macos")]
    {
        "macos"
    }
    #[cfg(target_os = "windows")]
    {
        "windows"
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        "other"
    }
}

/// Desktop entries are an XDG concept; other platforms have no launcher to register with.
pub fn supports_desktop_entries() -> bool {
    cfg!(all(unix, not(target_os = "macos")))
}
