use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::error::AppError;

pub const CONFIG_PATH_ENV: &str = "ADB_MEDIA_REMOTE_CONFIG_PATH";
const CONFIG_FILE_NAME: &str = ".adb_media_remote_config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AdbSettings {
    /// Explicit adb path; empty means search `PATH` then the bundled folder.
    pub command_path: String,
    pub bundled_dir: String,
}

impl Default for AdbSettings {
    fn default() -> Self {
        Self {
            command_path: String::new(),
            bundled_dir: "platform-tools".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackSettings {
    pub refresh_interval_secs: u64,
    pub wrap_width: usize,
    pub max_ip_output_chars: usize,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 5,
            wrap_width: 30,
            max_ip_output_chars: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkSettings {
    pub tcpip_port: u32,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self { tcpip_port: 5555 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    pub log_level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub adb: AdbSettings,
    #[serde(default)]
    pub playback: PlaybackSettings,
    #[serde(default)]
    pub network: NetworkSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}

pub fn load_config(trace_id: &str) -> Result<AppConfig, AppError> {
    load_config_from_path(&config_path(), trace_id)
}

pub fn load_config_from_path(path: &Path, trace_id: &str) -> Result<AppConfig, AppError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let raw = fs::read_to_string(path)
        .map_err(|err| AppError::system(format!("Failed to read config: {err}"), trace_id))?;
    // Missing fields default per section; a wrongly typed field fails the load.
    let config: AppConfig = serde_json::from_str(&raw)
        .map_err(|err| AppError::system(format!("Failed to parse config: {err}"), trace_id))?;
    Ok(validate_config(config))
}

fn validate_config(mut config: AppConfig) -> AppConfig {
    let defaults = AppConfig::default();
    if config.playback.refresh_interval_secs < 1 {
        config.playback.refresh_interval_secs = defaults.playback.refresh_interval_secs;
    }
    if config.playback.wrap_width < 10 {
        config.playback.wrap_width = defaults.playback.wrap_width;
    }
    if config.playback.max_ip_output_chars == 0 {
        config.playback.max_ip_output_chars = defaults.playback.max_ip_output_chars;
    }
    if !(1..=65535).contains(&config.network.tcpip_port) {
        config.network.tcpip_port = defaults.network.tcpip_port;
    }
    if config.adb.bundled_dir.trim().is_empty() {
        config.adb.bundled_dir = defaults.adb.bundled_dir;
    }
    if config.logging.log_level.trim().is_empty() {
        config.logging.log_level = defaults.logging.log_level;
    }
    config
}
