//! Configuration for the shortcut installer.
//!
//! Constants live on the `*Config` marker structs. `InstallerConfig` is the
//! per-run configuration: defaults, optionally overlaid by a JSON file, then
//! by command-line flags in the binary.

use crate::error::{Result, ShortcutError};
use crate::platform;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Application-level constants.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "FreeThullu";
    pub const EXECUTABLE_NAME: &'static str = "musicplayer-gui";
    pub const DESKTOP_FILE_NAME: &'static str = "freethullu.desktop";
    pub const ICON_FILE_NAME: &'static str = "freethullu-icon.png";
    pub const ICON_URL: &'static str =
        "https://raw.githubusercontent.com/freethullu/freethullu/main/assets/icon.png";
    /// Freedesktop icon-naming-spec name every theme ships.
    pub const FALLBACK_ICON: &'static str = "audio-x-generic";
    pub const COMMENT: &'static str =
        "Cthulhu-themed music player with YouTube, SoundCloud and lyrics";
    pub const CATEGORIES: [&'static str; 3] = ["AudioVideo", "Audio", "Player"];
    pub const KEYWORDS: [&'static str; 5] = ["music", "player", "youtube", "soundcloud", "lyrics"];
}

/// Network-related constants.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const USER_AGENT: &'static str = concat!("freethullu-install/", env!("CARGO_PKG_VERSION"));
    /// Content types accepted for the icon payload (prefix match).
    pub const ICON_CONTENT_TYPES: [&'static str; 2] = ["image/", "application/octet-stream"];
}

/// Per-run installer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerConfig {
    /// Executable looked up on the search path.
    pub executable_name: String,
    /// Search path override. `None` reads `PATH` from the environment.
    #[serde(skip)]
    pub search_path: Option<OsString>,
    /// Directory the icon is cached in. `None` uses the XDG data dir.
    pub icon_dir: Option<PathBuf>,
    /// Directory the desktop entry is written to. `None` uses the XDG data dir.
    pub apps_dir: Option<PathBuf>,
    pub icon_url: String,
    pub icon_file_name: String,
    pub desktop_file_name: String,
    /// Icon name used when the download fails.
    pub fallback_icon: String,
    pub display_name: String,
    pub comment: String,
    pub categories: Vec<String>,
    pub keywords: Vec<String>,
    /// `StartupWMClass`; Qt derives the window class from the binary name.
    pub startup_wm_class: Option<String>,
    pub terminal: bool,
    pub download_timeout_secs: u64,
    /// Run the desktop database / sycoca refresh tools after writing.
    pub refresh_caches: bool,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            executable_name: AppConfig::EXECUTABLE_NAME.to_string(),
            search_path: None,
            icon_dir: None,
            apps_dir: None,
            icon_url: AppConfig::ICON_URL.to_string(),
            icon_file_name: AppConfig::ICON_FILE_NAME.to_string(),
            desktop_file_name: AppConfig::DESKTOP_FILE_NAME.to_string(),
            fallback_icon: AppConfig::FALLBACK_ICON.to_string(),
            display_name: AppConfig::APP_NAME.to_string(),
            comment: AppConfig::COMMENT.to_string(),
            categories: AppConfig::CATEGORIES.iter().map(|s| s.to_string()).collect(),
            keywords: AppConfig::KEYWORDS.iter().map(|s| s.to_string()).collect(),
            startup_wm_class: Some(AppConfig::EXECUTABLE_NAME.to_string()),
            terminal: false,
            download_timeout_secs: NetworkConfig::DOWNLOAD_TIMEOUT.as_secs(),
            refresh_caches: true,
        }
    }
}

impl InstallerConfig {
    /// Load a configuration file, filling unspecified fields with defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ShortcutError::io_with_path(e, "read config file", path))?;

        let config: Self = serde_json::from_str(&contents).map_err(|e| ShortcutError::Json {
            message: format!("Failed to parse {}: {}", path.display(), e),
            source: Some(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check the fields that would otherwise fail halfway through a run.
    pub fn validate(&self) -> Result<()> {
        if self.executable_name.trim().is_empty() {
            return Err(config_error("executable_name must not be empty"));
        }

        for (field, value) in [
            ("icon_file_name", &self.icon_file_name),
            ("desktop_file_name", &self.desktop_file_name),
        ] {
            if value.is_empty() || value.contains(['/', std::path::MAIN_SEPARATOR]) {
                return Err(config_error(format!(
                    "{} must be a plain file name, got {:?}",
                    field, value
                )));
            }
        }

        if !self.desktop_file_name.ends_with(".desktop") {
            return Err(config_error(format!(
                "desktop_file_name must end in .desktop, got {:?}",
                self.desktop_file_name
            )));
        }

        if self.fallback_icon.trim().is_empty() {
            return Err(config_error("fallback_icon must not be empty"));
        }

        let url = Url::parse(&self.icon_url)
            .map_err(|e| config_error(format!("invalid icon_url {:?}: {}", self.icon_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(config_error(format!(
                "icon_url must be http or https, got {}",
                url.scheme()
            )));
        }

        if self.download_timeout_secs == 0 {
            return Err(config_error("download_timeout_secs must be greater than zero"));
        }

        Ok(())
    }

    /// The search path used to resolve the executable and refresh tools.
    pub fn search_path(&self) -> OsString {
        self.search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"))
            .unwrap_or_default()
    }

    /// Icon storage directory.
    pub fn icon_dir(&self) -> Result<PathBuf> {
        match &self.icon_dir {
            Some(dir) => Ok(dir.clone()),
            None => platform::icons_dir(),
        }
    }

    /// Application entries directory.
    pub fn apps_dir(&self) -> Result<PathBuf> {
        match &self.apps_dir {
            Some(dir) => Ok(dir.clone()),
            None => platform::apps_dir(),
        }
    }

    /// Absolute path the icon is cached at.
    pub fn icon_path(&self) -> Result<PathBuf> {
        Ok(self.icon_dir()?.join(&self.icon_file_name))
    }

    /// Absolute path of the desktop entry.
    pub fn desktop_file_path(&self) -> Result<PathBuf> {
        Ok(self.apps_dir()?.join(&self.desktop_file_name))
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

fn config_error(message: impl Into<String>) -> ShortcutError {
    ShortcutError::Config {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = InstallerConfig::default();
        config.validate().unwrap();

        assert_eq!(config.executable_name, "musicplayer-gui");
        assert_eq!(config.desktop_file_name, "freethullu.desktop");
        assert_eq!(config.icon_file_name, "freethullu-icon.png");
        assert_eq!(config.download_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("installer.json");
        std::fs::write(
            &path,
            r#"{ "executable_name": "musicplayer", "terminal": true, "icon_dir": "/tmp/icons" }"#,
        )
        .unwrap();

        let config = InstallerConfig::load(&path).unwrap();

        assert_eq!(config.executable_name, "musicplayer");
        assert!(config.terminal);
        assert_eq!(config.icon_dir().unwrap(), PathBuf::from("/tmp/icons"));
        assert_eq!(config.display_name, "FreeThullu");
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("installer.json");
        std::fs::write(&path, r#"{ "exec_name": "musicplayer" }"#).unwrap();

        let err = InstallerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ShortcutError::Json { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = InstallerConfig::load(&temp_dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ShortcutError::Io { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = InstallerConfig::default();
        config.icon_url = "ftp://example.com/icon.png".to_string();
        assert!(config.validate().is_err());

        let mut config = InstallerConfig::default();
        config.desktop_file_name = "../evil.desktop".to_string();
        assert!(config.validate().is_err());

        let mut config = InstallerConfig::default();
        config.desktop_file_name = "freethullu.txt".to_string();
        assert!(config.validate().is_err());

        let mut config = InstallerConfig::default();
        config.download_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_paths() {
        let config = InstallerConfig {
            icon_dir: Some(PathBuf::from("/home/u/.local/share/icons")),
            apps_dir: Some(PathBuf::from("/home/u/.local/share/applications")),
            ..Default::default()
        };

        assert_eq!(
            config.icon_path().unwrap(),
            PathBuf::from("/home/u/.local/share/icons/freethullu-icon.png")
        );
        assert_eq!(
            config.desktop_file_path().unwrap(),
            PathBuf::from("/home/u/.local/share/applications/freethullu.desktop")
        );
    }

    #[test]
    fn test_search_path_override() {
        let config = InstallerConfig {
            search_path: Some(OsString::from("/opt/bin")),
            ..Default::default()
        };
        assert_eq!(config.search_path(), OsString::from("/opt/bin"));
    }
}
