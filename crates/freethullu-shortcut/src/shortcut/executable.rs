//! Executable lookup on the search path.

use crate::error::{Result, ShortcutError};
use crate::platform;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Find `name` in the directories of `search_path`.
///
/// Directories are tried in order and the first executable regular file wins.
/// Empty components are skipped rather than treated as the current directory.
/// A `name` containing a path separator is checked directly.
pub fn find_executable(name: &str, search_path: &OsStr) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
        let candidate = Path::new(name);
        return platform::is_executable(candidate).then(|| absolutize(candidate));
    }

    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| platform::is_executable(candidate))
        .map(|candidate| absolutize(&candidate))
}

/// Resolve the executable the desktop entry will launch.
///
/// # Errors
///
/// Returns [`ShortcutError::ExecutableNotFound`] when no directory of
/// `search_path` holds an executable called `name`.
pub fn resolve_executable(name: &str, search_path: &OsStr) -> Result<PathBuf> {
    match find_executable(name, search_path) {
        Some(path) => {
            debug!("Resolved {} to {}", name, path.display());
            Ok(path)
        }
        None => Err(ShortcutError::ExecutableNotFound {
            name: name.to_string(),
            search_path: search_path.to_os_string(),
        }),
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn make_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    fn search_path(dirs: &[&Path]) -> OsString {
        std::env::join_paths(dirs).unwrap()
    }

    #[test]
    fn test_finds_executable_in_later_dir() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let expected = make_file(second.path(), "musicplayer-gui", 0o755);

        let path = search_path(&[first.path(), second.path()]);
        assert_eq!(find_executable("musicplayer-gui", &path), Some(expected));
    }

    #[test]
    fn test_first_match_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let expected = make_file(first.path(), "musicplayer-gui", 0o755);
        make_file(second.path(), "musicplayer-gui", 0o755);

        let path = search_path(&[first.path(), second.path()]);
        assert_eq!(find_executable("musicplayer-gui", &path), Some(expected));
    }

    #[test]
    fn test_skips_non_executable_file() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        make_file(first.path(), "musicplayer-gui", 0o644);
        let expected = make_file(second.path(), "musicplayer-gui", 0o755);

        let path = search_path(&[first.path(), second.path()]);
        assert_eq!(find_executable("musicplayer-gui", &path), Some(expected));

        let only_first = search_path(&[first.path()]);
        assert_eq!(find_executable("musicplayer-gui", &only_first), None);
    }

    #[test]
    fn test_skips_directory_with_matching_name() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("musicplayer-gui")).unwrap();

        let path = search_path(&[dir.path()]);
        assert_eq!(find_executable("musicplayer-gui", &path), None);
    }

    #[test]
    fn test_empty_components_ignored() {
        let dir = TempDir::new().unwrap();
        let expected = make_file(dir.path(), "musicplayer-gui", 0o755);

        let mut path = OsString::from("::");
        path.push(dir.path());
        assert_eq!(find_executable("musicplayer-gui", &path), Some(expected));
    }

    #[test]
    fn test_resolve_missing_executable() {
        let dir = TempDir::new().unwrap();
        let path = search_path(&[dir.path()]);

        let err = resolve_executable("musicplayer-gui", &path).unwrap_err();
        match err {
            ShortcutError::ExecutableNotFound { name, search_path } => {
                assert_eq!(name, "musicplayer-gui");
                assert_eq!(search_path, path);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_empty_search_path() {
        assert!(resolve_executable("musicplayer-gui", OsStr::new("")).is_err());
    }

    #[test]
    fn test_name_with_separator_checked_directly() {
        let dir = TempDir::new().unwrap();
        let expected = make_file(dir.path(), "musicplayer-gui", 0o755);

        let name = expected.to_str().unwrap();
        assert_eq!(find_executable(name, OsStr::new("")), Some(expected.clone()));
    }
}
