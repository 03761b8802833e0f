//! Platform-specific path utilities.
//!
//! Per-user locations from the XDG Base Directory spec. `dirs` already honors
//! `XDG_DATA_HOME` and falls back to `~/.local/share`.

use crate::error::{Result, ShortcutError};
use std::path::PathBuf;

/// Get the user's data directory.
///
/// # Platform Behavior
/// - **Linux**: `$XDG_DATA_HOME` or `~/.local/share`
pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir().ok_or_else(|| ShortcutError::Config {
        message: "Could not determine user data directory".to_string(),
    })
}

/// Get the user's application entries directory (`~/.local/share/applications`).
pub fn apps_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("applications"))
}

/// Get the user's icon directory (`~/.local/share/icons`).
///
/// Icons are referenced by absolute path from the desktop entry, so this is
/// the top-level icons dir rather than a theme subdirectory.
pub fn icons_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("icons"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_share_data_root() {
        if let Ok(data) = data_dir() {
            assert_eq!(apps_dir().unwrap(), data.join("applications"));
            assert_eq!(icons_dir().unwrap(), data.join("icons"));
        }
    }
}
