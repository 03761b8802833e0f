//! File permission handling.

use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// Make a file executable.
///
/// # Platform Behavior
/// - **Unix**: Sets mode 0o755. GNOME and KDE only launch desktop entries
///   from user directories when they carry the executable bit.
/// - **Other**: No-op
pub fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use crate::error::ShortcutError;
        use std::os::unix::fs::PermissionsExt;

        let metadata = std::fs::metadata(path)
            .map_err(|e| ShortcutError::io_with_path(e, "read metadata", path))?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(0o755);
        std::fs::set_permissions(path, permissions)
            .map_err(|e| ShortcutError::io_with_path(e, "set permissions", path))?;
        debug!("Set executable permissions on: {}", path.display());
    }

    #[cfg(not(unix))]
    {
        debug!("Skipping executable bit for: {}", path.display());
    }

    Ok(())
}

/// Check whether a path is a regular file that can be executed.
///
/// # Platform Behavior
/// - **Unix**: Any execute bit (user, group or other) is set
/// - **Other**: Common executable extensions (.exe, .bat, .cmd, .com)
pub fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                matches!(ext.as_str(), "exe" | "bat" | "cmd" | "com")
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_set_executable() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("freethullu.desktop");
        File::create(&file_path).unwrap();

        set_executable(&file_path).unwrap();

        #[cfg(unix)]
        assert!(is_executable(&file_path));
    }

    #[test]
    fn test_set_executable_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        #[cfg(unix)]
        assert!(set_executable(&temp_dir.path().join("missing")).is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_is_executable_unix() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("musicplayer-gui");
        File::create(&file_path).unwrap();

        assert!(!is_executable(&file_path));

        let mut perms = std::fs::metadata(&file_path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&file_path, perms).unwrap();

        assert!(is_executable(&file_path));
    }

    #[test]
    fn test_directory_is_not_executable() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!is_executable(temp_dir.path()));
    }
}
