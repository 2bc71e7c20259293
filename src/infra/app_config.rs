use crate::application::TimestampNormalizer;
use crate::domain::{DateStyle, DisplayZone};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Display settings persisted between runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub style: DateStyle,
    pub zone: DisplayZone,
}

impl AppConfig {
    pub fn normalizer(&self) -> TimestampNormalizer {
        TimestampNormalizer::new(self.style, self.zone)
    }
}

pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> AppConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return AppConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|err| {
        log::warn!(
            "Ignoring unreadable config {}: {}",
            path.display(),
            err
        );
        AppConfig::default()
    })
}

pub fn save_config(config: &AppConfig) -> std::io::Result<()> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config).unwrap_or_default();
    std::fs::write(path, contents)
}

/// Config file location, from the environment or the platform data dir.
pub fn config_path() -> PathBuf {
    config_path_with(
        std::env::var_os("ORIGAMI_DATES_CONFIG_PATH"),
        std::env::var_os("ORIGAMI_DATES_DATA_HOME"),
    )
}

/// An explicit config path wins over a data home override, which wins over
/// the platform data dir.
fn config_path_with(config_path: Option<OsString>, data_home: Option<OsString>) -> PathBuf {
    if let Some(path) = config_path.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    data_home
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(platform_data_dir)
        .join("config.toml")
}

fn platform_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("OrigamiDates");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("OrigamiDates");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("origami-dates");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("origami-dates");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".origami-dates")
}
