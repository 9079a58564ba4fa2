use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StudyError;

pub const APP_FOLDER_NAME: &str = "Chanakya";
pub const SETTINGS_VERSION: &str = "0.2.0";

fn default_chat_reply_delay_ms() -> u64 {
    1500
}

fn default_summary_tick_ms() -> u64 {
    200
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "default_chat_reply_delay_ms")]
    pub chat_reply_delay_ms: u64,
    #[serde(default = "default_summary_tick_ms")]
    pub summary_tick_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            chat_reply_delay_ms: default_chat_reply_delay_ms(),
            summary_tick_ms: default_summary_tick_ms(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UiSettings {
    #[serde(default)]
    pub last_route: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub version: String,
    pub base_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub ui: UiSettings,
}

impl Settings {
    pub fn with_base(base: &Path) -> Self {
        Self {
            version: SETTINGS_VERSION.to_string(),
            base_path: base.to_string_lossy().to_string(),
            log_level: default_log_level(),
            simulation: SimulationConfig::default(),
            ui: UiSettings::default(),
        }
    }
}

/// Sub-folders of the data directory: settings, the key-value store and
/// log output.
pub const DATA_FOLDERS: [&str; 3] = ["config", "storage", "logs"];

/// `data/` beside the installed binary; `~/Chanakya` when the binary's
/// location is unknown.
pub fn default_base_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .map(|install_dir| install_dir.join("data"))
        .or_else(|| dirs::home_dir().map(|home| home.join(APP_FOLDER_NAME)))
        .unwrap_or_else(|| PathBuf::from(APP_FOLDER_NAME))
}

/// Creates the data directory and its [`DATA_FOLDERS`]. Existing folders
/// are left alone.
pub fn ensure_base_folders(base: &Path) -> Result<(), StudyError> {
    for folder in DATA_FOLDERS {
        let dir = base.join(folder);
        fs::create_dir_all(&dir).map_err(|e| {
            StudyError::Storage(format!("cannot create data folder {}: {e}", dir.display()))
        })?;
    }
    Ok(())
}

/// Folders, then settings: everything the app needs before it starts.
pub fn prepare_data_dir(base: &Path) -> Result<Settings, StudyError> {
    ensure_base_folders(base)?;
    load_or_init_settings(base)
}

pub fn settings_path(base: &Path) -> PathBuf {
    base.join("config").join("settings.json")
}

pub fn load_or_init_settings(base: &Path) -> Result<Settings, StudyError> {
    let config_path = settings_path(base);

    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        let mut settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            StudyError::Config(format!("{}: {e}", config_path.display()))
        })?;

        // Keep base_path in sync with the folder it was actually loaded from
        if settings.base_path != base.to_string_lossy() {
            settings.base_path = base.to_string_lossy().to_string();
        }
        return Ok(settings);
    }

    let settings = Settings::with_base(base);
    save_settings(&settings, base)?;
    tracing::info!("wrote default settings to {}", config_path.display());

    Ok(settings)
}

pub fn save_settings(settings: &Settings, base: &Path) -> Result<(), StudyError> {
    let config_path = settings_path(base);
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(&config_path, json)?;
    Ok(())
}
